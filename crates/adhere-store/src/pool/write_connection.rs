//! The single write connection. All mutations are serialized through it.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use adhere_core::errors::{AdhereError, StoreError};

use super::pragmas::apply_pragmas;
use crate::to_store_err;

/// Owns the one connection allowed to mutate the database.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path) -> Result<Self, AdhereError> {
        let conn = Connection::open(path).map_err(|e| {
            AdhereError::Store(StoreError::Unavailable {
                message: format!("cannot open {}: {e}", path.display()),
            })
        })?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory() -> Result<Self, AdhereError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            AdhereError::Store(StoreError::Unavailable {
                message: format!("cannot open in-memory database: {e}"),
            })
        })?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with exclusive access to the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> Result<T, AdhereError>
    where
        F: FnOnce(&Connection) -> Result<T, AdhereError>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_store_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
