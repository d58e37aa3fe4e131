//! Models for storing MEV block summaries in the database.
//!
//! Each block is uniquely identified by its number and does not require
//! dup-sorting. A secondary table maps block hashes back to numbers for hash
//! lookups.

use alloy_primitives::{Address, B256, U256};
use mevtrace_types::{MevBlock, MevTransaction};
use reth_codecs::Compact;
use reth_db::table::Table;
use serde::{Deserialize, Serialize};

/// Summary of a single MEV block.
///
/// The block number is the key of the [`MevBlocks`] table and is not repeated
/// in the value. Transactions live in
/// [`MevTransactions`](crate::models::MevTransactions).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Compact)]
pub(crate) struct StoredMevBlock {
    /// The hash of the block.
    pub(crate) hash: B256,
    /// The block proposer.
    pub(crate) miner: Address,
    /// Whether the proposer is the known relay address.
    pub(crate) is_known_relay: bool,
    /// Sum of all transaction values.
    pub(crate) total_value: U256,
    /// Number of rows stored for this block in the transactions table.
    pub(crate) transaction_count: u32,
}

impl StoredMevBlock {
    /// Rebuilds the domain [`MevBlock`] from the stored summary and its transactions.
    pub(crate) fn into_block(
        self,
        block_number: u64,
        transactions: Vec<MevTransaction>,
    ) -> MevBlock {
        MevBlock {
            block_number,
            block_hash: self.hash,
            miner: self.miner,
            is_known_relay: self.is_known_relay,
            total_value: self.total_value,
            transactions,
        }
    }
}

impl From<&MevBlock> for StoredMevBlock {
    fn from(block: &MevBlock) -> Self {
        Self {
            hash: block.block_hash,
            miner: block.miner,
            is_known_relay: block.is_known_relay,
            total_value: block.total_value,
            transaction_count: block.transactions.len() as u32,
        }
    }
}

/// A table for storing MEV block summaries by block number.
///
/// - **Key**: `u64`: block number
/// - **Value**: [`StoredMevBlock`]: block summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub(crate) struct MevBlocks;

impl Table for MevBlocks {
    const NAME: &'static str = "mev_blocks";

    const DUPSORT: bool = false;

    type Key = u64;

    type Value = StoredMevBlock;
}

/// A table mapping block hashes to block numbers.
///
/// - **Key**: [`B256`]: block hash
/// - **Value**: `u64`: block number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub(crate) struct BlockHashNumbers;

impl Table for BlockHashNumbers {
    const NAME: &'static str = "block_hash_numbers";

    const DUPSORT: bool = false;

    type Key = B256;

    type Value = u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_mev_block_compact_roundtrip() {
        let original = StoredMevBlock {
            hash: B256::from([0x11; 32]),
            miner: Address::from([0x22; 20]),
            is_known_relay: true,
            total_value: U256::from(3_000_000_000_000_000_000u128),
            transaction_count: 4,
        };

        let mut buffer = Vec::new();
        let bytes_written = original.to_compact(&mut buffer);

        assert_eq!(bytes_written, buffer.len(), "Bytes written should match buffer length");
        let (decoded, remaining_buf) = StoredMevBlock::from_compact(&buffer, bytes_written);

        assert_eq!(original, decoded);
        assert!(remaining_buf.is_empty(), "Remaining buffer should be empty after deserialization");
    }
}
