pub mod repository;
pub mod sqlite;

pub use repository::*;
pub use sqlite::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Record not found: {table} with id {id}")]
    NotFound { table: &'static str, id: i64 },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
}
