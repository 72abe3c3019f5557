//! # adhere-store
//!
//! Durable persistence of one `HabitModel` per (user, habit) key on SQLite.
//! Models are replaced wholesale inside a transaction (write-new-then-swap),
//! never mutated field by field, so a concurrent reader always observes a
//! complete model. Concurrent writers resolve last-writer-wins on
//! `trained_at`.

pub mod migrations;
pub mod pool;
pub mod queries;

mod engine;

pub use engine::ModelStore;

use adhere_core::errors::{AdhereError, StoreError};

/// Wrap a low-level SQLite message into the store error taxonomy.
pub(crate) fn to_store_err(message: String) -> AdhereError {
    AdhereError::Store(StoreError::Sqlite { message })
}
