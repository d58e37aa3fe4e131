use crate::GatewayError;
use mevtrace_storage::StorageError;
use thiserror::Error;

/// Why a single block was skipped.
#[derive(Debug, Error)]
pub enum BlockProcessingError {
    /// Fetching the block trace failed or returned no entries.
    #[error("failed to fetch block trace: {0}")]
    Trace(#[source] GatewayError),

    /// Fetching the block header failed.
    #[error("failed to fetch block header: {0}")]
    Header(#[source] GatewayError),

    /// Writing the block to the ledger failed.
    #[error("failed to commit block: {0}")]
    Commit(#[source] StorageError),
}

impl BlockProcessingError {
    /// Short label of the failing step, used as a metrics label.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Trace(_) => "trace",
            Self::Header(_) => "header",
            Self::Commit(_) => "commit",
        }
    }
}
