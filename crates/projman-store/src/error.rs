use thiserror::Error;

/// Errors produced by the store layer.
///
/// Absence of a record is not an error: lookups return `Ok(None)` instead.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error, including constraint violations surfaced by mutations.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Generic I/O error (e.g. creating the database directory).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
