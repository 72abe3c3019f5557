//! ModelStore — owns the ConnectionPool, implements IModelStore, runs
//! migrations at startup.

use std::path::Path;

use adhere_core::errors::AdhereResult;
use adhere_core::models::{HabitModel, ModelKey};
use adhere_core::traits::IModelStore;

use crate::migrations;
use crate::pool::ConnectionPool;

/// The SQLite-backed model store.
pub struct ModelStore {
    pool: ConnectionPool,
}

impl ModelStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> AdhereResult<Self> {
        let store = Self {
            pool: ConnectionPool::open(path)?,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> AdhereResult<Self> {
        let store = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> AdhereResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn with_reader<F, T>(&self, f: F) -> AdhereResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> AdhereResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            // In-memory mode has no shared file for readers to attach to.
            None => self.pool.writer.with_conn_sync(f),
        }
    }
}

impl IModelStore for ModelStore {
    fn get(&self, key: &ModelKey) -> AdhereResult<Option<HabitModel>> {
        self.with_reader(|conn| crate::queries::model_crud::get_model(conn, key))
    }

    fn put(&self, model: &HabitModel) -> AdhereResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::model_crud::upsert_model(conn, model))
    }

    fn delete(&self, key: &ModelKey) -> AdhereResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::model_crud::delete_model(conn, key))
    }
}
