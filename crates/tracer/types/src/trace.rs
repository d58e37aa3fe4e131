//! Wire types returned by the chain RPC.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// A single entry of a `trace_block` response.
///
/// Only the fields needed to find transfers to the block proposer are decoded;
/// everything else in the entry is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceEntry {
    /// The traced action.
    pub action: TraceAction,
    /// Hash of the block owning this entry.
    pub block_hash: B256,
    /// Hash of the transaction the entry belongs to. Absent for block rewards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<B256>,
}

/// The action of a [`TraceEntry`].
///
/// Call actions carry `from`, `to` and `value`. Create and reward actions lack
/// a destination, so they never match a proposer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceAction {
    /// Source address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// Destination address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// Transferred value as a hex quantity, kept raw until a match needs it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// The subset of an `eth_getBlockByHash` response used by the tracer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block hash.
    pub hash: B256,
    /// The block proposer (coinbase).
    pub miner: Address,
}
