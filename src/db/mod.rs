pub mod repository;
pub mod sqlite;

pub use sqlite::Database;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{entity} not found: id {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Malformed medications blob: {0}")]
    MalformedBlob(#[from] serde_json::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,
}
