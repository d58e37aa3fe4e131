use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::quantity::decimal;

/// A block containing at least one value transfer to its proposer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MevBlock {
    /// Block number.
    pub block_number: u64,
    /// Block hash.
    pub block_hash: B256,
    /// The block proposer every transaction paid.
    pub miner: Address,
    /// Whether the proposer is the configured known relay address.
    #[serde(rename = "flashbot")]
    pub is_known_relay: bool,
    /// Sum of all transaction values.
    #[serde(rename = "totalMinerValue", with = "decimal")]
    pub total_value: U256,
    /// Matching transactions, in trace order.
    pub transactions: Vec<MevTransaction>,
}

impl MevBlock {
    /// Returns `true` if the block holds transactions, every transaction pays the proposer
    /// and belongs to this block, and the total equals the sum of the transaction values.
    pub fn is_consistent(&self) -> bool {
        if self.transactions.is_empty() {
            return false;
        }

        let mut sum = U256::ZERO;
        for tx in &self.transactions {
            if tx.to != self.miner || tx.block_number != self.block_number {
                return false;
            }
            let Some(next) = sum.checked_add(tx.value) else {
                return false;
            };
            sum = next;
        }
        sum == self.total_value
    }
}

/// A transfer to the block proposer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MevTransaction {
    /// Number of the block containing the transfer.
    pub block_number: u64,
    /// Hash of the transaction.
    pub tx_hash: B256,
    /// Sender of the transfer.
    pub from: Address,
    /// Recipient, always the block proposer.
    pub to: Address,
    /// Transferred value in wei.
    #[serde(with = "decimal")]
    pub value: U256,
}
