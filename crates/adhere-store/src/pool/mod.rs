//! SQLite connection handling: one serialized writer plus WAL readers.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::Path;

use adhere_core::errors::AdhereResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// The writer and, for file-backed stores, a pool of read connections.
///
/// In-memory stores carry no readers: a second in-memory connection is a
/// separate database, so every in-memory read goes through the writer.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: Option<ReadPool>,
}

impl ConnectionPool {
    pub fn open(path: &Path) -> AdhereResult<Self> {
        Ok(Self {
            writer: WriteConnection::open(path)?,
            readers: Some(ReadPool::open(path)?),
        })
    }

    pub fn open_in_memory() -> AdhereResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory()?,
            readers: None,
        })
    }
}
