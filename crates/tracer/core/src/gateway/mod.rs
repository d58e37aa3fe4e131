//! Access to the chain RPC.
//!
//! The pipeline needs three calls from the node: the head block number, the
//! `trace_block` output of a block and the header of a block by hash. They are
//! abstracted behind [`ChainGateway`] so the pipeline can be exercised without a
//! node.

mod error;
pub use error::GatewayError;

mod traits;
pub use traits::ChainGateway;
#[cfg(test)]
pub(crate) use traits::MockChainGateway;

mod rpc;
pub use rpc::RpcGateway;
