use crate::GatewayError;
use alloy_primitives::B256;
use async_trait::async_trait;
use mevtrace_types::{BlockHeader, TraceEntry};
use std::fmt::Debug;

/// The chain calls the catch-up pipeline depends on.
///
/// Every call is bounded by the implementation's timeout and reports failure
/// through [`GatewayError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainGateway: Debug + Send + Sync {
    /// Returns the number of the current chain head.
    async fn head_block_number(&self) -> Result<u64, GatewayError>;

    /// Returns the trace entries of a block.
    ///
    /// An empty trace is reported as [`GatewayError::EmptyBlock`].
    async fn trace_block(&self, block_number: u64) -> Result<Vec<TraceEntry>, GatewayError>;

    /// Returns the header of the block with the given hash.
    async fn block_header(&self, block_hash: B256) -> Result<BlockHeader, GatewayError>;
}
