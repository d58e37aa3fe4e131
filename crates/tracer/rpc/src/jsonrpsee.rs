//! The [`MevApi`] trait, from which `jsonrpsee` generates the server and
//! client code.

use alloy_primitives::B256;
use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use mevtrace_types::{MevBlock, MevTransaction};

/// Query endpoints of the MEV ledger.
///
/// Default namespace separator is `_`, so the methods are served as
/// `mev_rpc_block` and `mev_rpc_tx`.
#[rpc(server, client, namespace = "mev")]
pub trait MevApi {
    /// Returns the stored block for a decimal block number or a `0x`-prefixed
    /// block hash, or `null` if the ledger holds no such block.
    #[method(name = "rpc_block")]
    async fn block(&self, block: String) -> RpcResult<Option<MevBlock>>;

    /// Returns the first stored transfer of a transaction, or `null`.
    #[method(name = "rpc_tx")]
    async fn transaction(&self, tx_hash: B256) -> RpcResult<Option<MevTransaction>>;
}
