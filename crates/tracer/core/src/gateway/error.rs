use alloy_primitives::B256;
use alloy_transport::TransportError;
use mevtrace_types::HexQuantityError;
use std::time::Duration;
use thiserror::Error;

/// Failures of a chain RPC call.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The call did not complete within the configured timeout.
    #[error("{method} timed out after {timeout:?}")]
    Timeout {
        /// The RPC method.
        method: &'static str,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The transport failed or the response could not be decoded.
    #[error("{method} failed: {source}")]
    Transport {
        /// The RPC method.
        method: &'static str,
        /// The underlying transport error.
        #[source]
        source: TransportError,
    },

    /// The response carried a malformed hex quantity.
    #[error("{method} returned an invalid quantity: {source}")]
    InvalidQuantity {
        /// The RPC method.
        method: &'static str,
        /// The parse failure.
        #[source]
        source: HexQuantityError,
    },

    /// The node returned no trace entries for the block.
    #[error("no trace entries for block {0}")]
    EmptyBlock(u64),

    /// The node does not know the block hash.
    #[error("block {0} not found")]
    BlockNotFound(B256),
}
