/// Model-store errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    /// Schema mismatch or unreadable persisted weights. Recovered by
    /// falling back to the cold-start prediction and scheduling a retrain.
    #[error("persisted model corrupt: {details}")]
    ModelCorrupt { details: String },

    /// The persistence layer itself is unreachable. Surfaced to the caller,
    /// who degrades to a neutral experience.
    #[error("model store unavailable: {message}")]
    Unavailable { message: String },
}
