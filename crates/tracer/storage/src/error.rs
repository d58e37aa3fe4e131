use reth_db::DatabaseError;
use thiserror::Error;

/// Errors that may occur while interacting with the ledger.
///
/// This enum is used across all implementations of the ledger traits.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to create or open the database environment.
    #[error("failed to initialize database: {0}")]
    DatabaseInit(#[from] eyre::Report),

    /// DatabaseError
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// The expected entry was not found in the database.
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// The block violates the ledger invariants and was not written.
    #[error("Invalid block: {0}")]
    InvalidBlock(String),
}
