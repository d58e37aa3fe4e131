//! Models for storing MEV transactions in the database.
//!
//! Transactions are keyed by their block number and their position among the
//! block's matching transfers, so a range walk over one block number yields
//! them in trace order.

use alloy_primitives::{Address, B256, U256};
use mevtrace_types::MevTransaction;
use reth_codecs::Compact;
use reth_db::table::Table;
use reth_db_api::{
    DatabaseError,
    table::{Decode, Encode},
};
use serde::{Deserialize, Serialize};

const ENCODED_KEY_LEN: usize = 12;

/// Composite key of the [`MevTransactions`] table.
///
/// Encoded as 12 big-endian bytes so that the lexicographic order used by MDBX
/// matches `(block_number, index)` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub(crate) struct TransactionKey {
    /// Number of the owning block.
    pub(crate) block_number: u64,
    /// Position of the transfer within the block.
    pub(crate) index: u32,
}

impl TransactionKey {
    pub(crate) const fn new(block_number: u64, index: u32) -> Self {
        Self { block_number, index }
    }

    /// First key of the given block.
    pub(crate) const fn block_start(block_number: u64) -> Self {
        Self::new(block_number, 0)
    }

    /// Last possible key of the given block.
    pub(crate) const fn block_end(block_number: u64) -> Self {
        Self::new(block_number, u32::MAX)
    }
}

impl Encode for TransactionKey {
    type Encoded = [u8; ENCODED_KEY_LEN];

    fn encode(self) -> Self::Encoded {
        let mut buf = [0u8; ENCODED_KEY_LEN];
        buf[..8].copy_from_slice(&self.block_number.to_be_bytes());
        buf[8..].copy_from_slice(&self.index.to_be_bytes());
        buf
    }
}

impl Decode for TransactionKey {
    fn decode(value: &[u8]) -> Result<Self, DatabaseError> {
        if value.len() != ENCODED_KEY_LEN {
            return Err(DatabaseError::Decode);
        }

        let block_number = value[..8].try_into().map_err(|_| DatabaseError::Decode)?;
        let index = value[8..].try_into().map_err(|_| DatabaseError::Decode)?;

        Ok(Self::new(u64::from_be_bytes(block_number), u32::from_be_bytes(index)))
    }
}

/// A single transfer to the block proposer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Compact)]
pub(crate) struct StoredMevTransaction {
    /// Hash of the transaction.
    pub(crate) tx_hash: B256,
    /// Sender of the transfer.
    pub(crate) from: Address,
    /// Recipient of the transfer.
    pub(crate) to: Address,
    /// Transferred value in wei.
    pub(crate) value: U256,
}

impl StoredMevTransaction {
    /// Rebuilds the domain [`MevTransaction`] for the given block number.
    pub(crate) const fn into_transaction(self, block_number: u64) -> MevTransaction {
        MevTransaction {
            block_number,
            tx_hash: self.tx_hash,
            from: self.from,
            to: self.to,
            value: self.value,
        }
    }
}

impl From<&MevTransaction> for StoredMevTransaction {
    fn from(tx: &MevTransaction) -> Self {
        Self { tx_hash: tx.tx_hash, from: tx.from, to: tx.to, value: tx.value }
    }
}

/// A table for storing MEV transactions.
///
/// - **Key**: [`TransactionKey`]: block number and position
/// - **Value**: [`StoredMevTransaction`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub(crate) struct MevTransactions;

impl Table for MevTransactions {
    const NAME: &'static str = "mev_transactions";

    const DUPSORT: bool = false;

    type Key = TransactionKey;

    type Value = StoredMevTransaction;
}

/// A table mapping transaction hashes to the number of the block holding them.
///
/// - **Key**: [`B256`]: transaction hash
/// - **Value**: `u64`: block number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub(crate) struct TransactionHashNumbers;

impl Table for TransactionHashNumbers {
    const NAME: &'static str = "transaction_hash_numbers";

    const DUPSORT: bool = false;

    type Key = B256;

    type Value = u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_key_encoding_preserves_order() {
        let keys = [
            TransactionKey::new(21_000_000, 0),
            TransactionKey::new(21_000_000, 1),
            TransactionKey::new(21_000_000, 256),
            TransactionKey::new(21_000_001, 0),
            TransactionKey::block_end(21_000_001),
            TransactionKey::block_start(21_000_002),
        ];

        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(
                pair[0].encode() < pair[1].encode(),
                "{:?} must sort before {:?}",
                pair[0],
                pair[1]
            );
        }

        for key in keys {
            assert_eq!(TransactionKey::decode(&key.encode()).unwrap(), key);
        }
    }

    #[test]
    fn test_transaction_key_decode_rejects_bad_length() {
        assert!(TransactionKey::decode(&[0u8; 11]).is_err());
        assert!(TransactionKey::decode(&[0u8; 13]).is_err());
        assert!(TransactionKey::decode(&[]).is_err());
    }
}
