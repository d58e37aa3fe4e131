//! Core pipeline of the MEV tracer.
//!
//! A [`Poller`] periodically compares the ledger high-water mark with the chain
//! head and hands the missing range to the [`CatchUpEngine`], which traces each
//! block through a [`ChainGateway`], keeps the transfers paid to the block
//! proposer with the [`Extractor`] and commits them to the ledger.

pub mod config;
pub use config::{FLASHBOTS_RELAY_ADDRESS, TracerConfig};

mod gateway;
#[cfg(test)]
pub(crate) use gateway::MockChainGateway;
pub use gateway::{ChainGateway, GatewayError, RpcGateway};

mod extractor;
pub use extractor::{Extraction, Extractor};

mod catch_up;
pub use catch_up::{
    BlockOutcome, BlockProcessingError, CatchUpEngine, CatchUpSummary, RetryQueue, RetryStatus,
};

mod poller;
pub use poller::{Poller, TickOutcome};

mod metrics;
pub use self::metrics::Metrics;

#[cfg(test)]
mod test_utils;
