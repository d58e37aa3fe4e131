//! JSON-RPC query API over the MEV ledger.
//!
//! Exposes `mev_rpc_block` and `mev_rpc_tx` through `jsonrpsee`, answering from
//! any [`mevtrace_storage::LedgerReader`].

mod jsonrpsee;
pub use self::jsonrpsee::{MevApiClient, MevApiServer};

mod lookup;
pub use lookup::{BlockLookup, BlockLookupError};

mod metrics;
pub use self::metrics::Metrics;

mod server;
pub use server::MevRpc;
