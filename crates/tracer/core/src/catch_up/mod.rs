//! Catch-up of the ledger towards the chain head.

mod engine;
pub use engine::{BlockOutcome, CatchUpEngine, CatchUpSummary};

mod error;
pub use error::BlockProcessingError;

mod retry;
pub use retry::{RetryQueue, RetryStatus};
