//! Versioned schema migrations, applied in order at engine startup.

mod v001_models_table;

use rusqlite::Connection;

use adhere_core::errors::{AdhereError, StoreError};

use crate::to_store_err;

/// Migrations in application order.
const MIGRATIONS: &[(u32, fn(&Connection) -> Result<(), AdhereError>)] =
    &[(1, v001_models_table::migrate)];

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), AdhereError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_store_err(e.to_string()))?;

    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            AdhereError::Store(StoreError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )
        .map_err(|e| to_store_err(e.to_string()))?;
    }
    Ok(())
}
