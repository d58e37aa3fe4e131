//! Providers for ledger state.
//!
//! Providers wrap a single database transaction and implement the read and
//! write operations of the ledger on top of it. Callers own the transaction and
//! decide whether to commit.
mod ledger_provider;
pub(crate) use ledger_provider::LedgerProvider;
