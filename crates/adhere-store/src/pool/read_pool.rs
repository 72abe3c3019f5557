//! Read-only connections handed out round-robin. Under WAL a reader never
//! waits on the writer, which is what keeps predictions off the write path.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use adhere_core::errors::{AdhereError, AdhereResult, StoreError};

use super::pragmas::apply_read_pragmas;
use crate::to_store_err;

/// Model rows are a few hundred bytes and reads are single-row lookups; a
/// handful of connections covers the prediction path.
const READ_POOL_SIZE: usize = 4;

pub struct ReadPool {
    readers: Vec<Mutex<Connection>>,
    cursor: AtomicUsize,
}

impl ReadPool {
    pub fn open(path: &Path) -> AdhereResult<Self> {
        let mut readers = Vec::with_capacity(READ_POOL_SIZE);
        for _ in 0..READ_POOL_SIZE {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(|e| {
                AdhereError::Store(StoreError::Unavailable {
                    message: format!("cannot open reader for {}: {e}", path.display()),
                })
            })?;
            apply_read_pragmas(&conn)?;
            readers.push(Mutex::new(conn));
        }
        Ok(Self {
            readers,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run one read against the next connection in rotation.
    pub fn with_conn<F, T>(&self, f: F) -> AdhereResult<T>
    where
        F: FnOnce(&Connection) -> AdhereResult<T>,
    {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let guard = self.readers[idx]
            .lock()
            .map_err(|e| to_store_err(format!("read pool lock poisoned: {e}")))?;
        f(&guard)
    }
}
