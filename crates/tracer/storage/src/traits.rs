use crate::StorageError;
use alloy_primitives::B256;
use mevtrace_types::{MevBlock, MevTransaction};

/// Write side of the ledger, used by the catch-up pipeline.
///
/// Implementations must make [`LedgerWriter::commit_block`] atomic: either the
/// block and all of its transactions become visible, or nothing changes.
pub trait LedgerWriter {
    /// Returns the block number from which catch-up resumes.
    ///
    /// This is the highest stored block number, but never lower than the
    /// configured floor. An empty ledger reports the floor.
    ///
    /// # Returns
    /// * `Ok(u64)` the high-water mark.
    /// * `Err(StorageError)` if the ledger could not be read.
    fn high_water_mark(&self) -> Result<u64, StorageError>;

    /// Persists a [`MevBlock`] together with all of its transactions.
    ///
    /// A block already stored under the same number is replaced.
    ///
    /// # Arguments
    /// * `block` - The block to persist. It must hold at least one transaction.
    ///
    /// # Returns
    /// * `Ok(())` if the block was committed.
    /// * `Err(StorageError)` if nothing was written.
    fn commit_block(&self, block: &MevBlock) -> Result<(), StorageError>;
}

/// Read side of the ledger, used by the query API.
pub trait LedgerReader {
    /// Gets the [`MevBlock`] with the given number.
    ///
    /// Returns [`StorageError::EntryNotFound`] if no such block is stored.
    fn get_block(&self, block_number: u64) -> Result<MevBlock, StorageError>;

    /// Gets the [`MevBlock`] with the given hash.
    ///
    /// Returns [`StorageError::EntryNotFound`] if no such block is stored.
    fn get_block_by_hash(&self, block_hash: B256) -> Result<MevBlock, StorageError>;

    /// Gets the first stored [`MevTransaction`] with the given hash.
    ///
    /// Returns [`StorageError::EntryNotFound`] if no such transaction is stored.
    fn get_transaction(&self, tx_hash: B256) -> Result<MevTransaction, StorageError>;
}
