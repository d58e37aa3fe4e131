//! Persistent ledger of MEV blocks for the tracer.
//!
//! Blocks that paid their proposer are stored together with their matching
//! transactions in an MDBX environment managed by reth's database layer. The
//! ledger exposes a write side used by the catch-up pipeline and a read side
//! used by the query API.

mod error;
pub use error::StorageError;

mod ledgerdb;
pub use ledgerdb::LedgerDb;

mod models;
mod providers;

mod traits;
pub use traits::{LedgerReader, LedgerWriter};
