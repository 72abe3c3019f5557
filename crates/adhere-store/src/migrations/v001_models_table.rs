//! v001: habit_models.

use rusqlite::Connection;

use adhere_core::errors::AdhereError;

use crate::to_store_err;

pub fn migrate(conn: &Connection) -> Result<(), AdhereError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS habit_models (
            user_id        TEXT    NOT NULL,
            habit_id       TEXT    NOT NULL,
            weights        TEXT    NOT NULL,
            bias           REAL    NOT NULL,
            feature_mean   TEXT    NOT NULL,
            feature_std    TEXT    NOT NULL,
            trained_at     TEXT    NOT NULL,
            sample_count   INTEGER NOT NULL,
            version        INTEGER NOT NULL,
            schema_version INTEGER NOT NULL,
            PRIMARY KEY (user_id, habit_id)
        );

        CREATE INDEX IF NOT EXISTS idx_habit_models_user ON habit_models(user_id);
        ",
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}
