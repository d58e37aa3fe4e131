//! Provider for ledger database operations.

use crate::{
    error::StorageError,
    models::{
        BlockHashNumbers, MevBlocks, MevTransactions, StoredMevBlock, StoredMevTransaction,
        TransactionHashNumbers, TransactionKey,
    },
};
use alloy_primitives::B256;
use mevtrace_types::{MevBlock, MevTransaction};
use reth_db_api::{
    cursor::DbCursorRO,
    transaction::{DbTx, DbTxMut},
};
use tracing::{debug, error, warn};

/// Provides access to ledger storage operations within a transaction.
#[derive(Debug)]
pub(crate) struct LedgerProvider<'tx, TX> {
    tx: &'tx TX,
}

impl<'tx, TX> LedgerProvider<'tx, TX> {
    /// Creates a new [`LedgerProvider`] instance.
    pub(crate) const fn new(tx: &'tx TX) -> Self {
        Self { tx }
    }
}

impl<TX> LedgerProvider<'_, TX>
where
    TX: DbTx,
{
    /// Returns the highest stored block number, if any.
    pub(crate) fn latest_block_number(&self) -> Result<Option<u64>, StorageError> {
        let mut cursor = self.tx.cursor_read::<MevBlocks>().inspect_err(|err| {
            error!(target: "tracer_storage", ?err, "Failed to get cursor for MevBlocks");
        })?;

        let result = cursor.last().inspect_err(|err| {
            error!(target: "tracer_storage", ?err, "Failed to seek to last block");
        })?;

        Ok(result.map(|(block_number, _)| block_number))
    }

    /// Gets the [`MevBlock`] stored under the given block number.
    pub(crate) fn get_block(&self, block_number: u64) -> Result<MevBlock, StorageError> {
        let stored = self.tx.get::<MevBlocks>(block_number).inspect_err(|err| {
            error!(target: "tracer_storage", block_number, ?err, "Failed to get block");
        })?;

        let stored = stored.ok_or_else(|| {
            debug!(target: "tracer_storage", block_number, "Block not found");
            StorageError::EntryNotFound(format!("block {block_number} not found"))
        })?;

        let transactions = self
            .transactions_in_block(block_number)?
            .into_iter()
            .map(|(_, tx)| tx.into_transaction(block_number))
            .collect::<Vec<_>>();

        if transactions.len() != stored.transaction_count as usize {
            warn!(
                target: "tracer_storage",
                block_number,
                expected = stored.transaction_count,
                actual = transactions.len(),
                "Transaction count mismatch"
            );
        }

        Ok(stored.into_block(block_number, transactions))
    }

    /// Gets the [`MevBlock`] with the given block hash.
    pub(crate) fn get_block_by_hash(&self, block_hash: B256) -> Result<MevBlock, StorageError> {
        let block_number = self.tx.get::<BlockHashNumbers>(block_hash).inspect_err(|err| {
            error!(
                target: "tracer_storage",
                %block_hash,
                ?err,
                "Failed to get block number by hash"
            );
        })?;

        let block_number = block_number.ok_or_else(|| {
            debug!(target: "tracer_storage", %block_hash, "Block hash not found");
            StorageError::EntryNotFound(format!("block {block_hash} not found"))
        })?;

        let block = self.get_block(block_number)?;
        if block.block_hash != block_hash {
            warn!(
                target: "tracer_storage",
                block_number,
                expected_hash = %block_hash,
                actual_hash = %block.block_hash,
                "Block hash mismatch"
            );
            return Err(StorageError::EntryNotFound(format!("block {block_hash} not found")));
        }

        Ok(block)
    }

    /// Gets the first [`MevTransaction`] with the given transaction hash.
    pub(crate) fn get_transaction(&self, tx_hash: B256) -> Result<MevTransaction, StorageError> {
        let block_number = self.tx.get::<TransactionHashNumbers>(tx_hash).inspect_err(|err| {
            error!(
                target: "tracer_storage",
                %tx_hash,
                ?err,
                "Failed to get transaction block"
            );
        })?;

        let block_number = block_number.ok_or_else(|| {
            debug!(target: "tracer_storage", %tx_hash, "Transaction not found");
            StorageError::EntryNotFound(format!("transaction {tx_hash} not found"))
        })?;

        self.transactions_in_block(block_number)?
            .into_iter()
            .find(|(_, tx)| tx.tx_hash == tx_hash)
            .map(|(_, tx)| tx.into_transaction(block_number))
            .ok_or_else(|| {
                warn!(
                    target: "tracer_storage",
                    %tx_hash,
                    block_number,
                    "Transaction index points to a block without the transaction"
                );
                StorageError::EntryNotFound(format!("transaction {tx_hash} not found"))
            })
    }

    /// Returns all transaction rows of a block in key order.
    fn transactions_in_block(
        &self,
        block_number: u64,
    ) -> Result<Vec<(TransactionKey, StoredMevTransaction)>, StorageError> {
        let mut cursor = self.tx.cursor_read::<MevTransactions>().inspect_err(|err| {
            error!(target: "tracer_storage", ?err, "Failed to get cursor for MevTransactions");
        })?;

        let walker = cursor
            .walk_range(
                TransactionKey::block_start(block_number)..=TransactionKey::block_end(block_number),
            )
            .inspect_err(|err| {
                error!(target: "tracer_storage", block_number, ?err, "Failed to walk transactions");
            })?;

        let mut rows = Vec::new();
        for row in walker {
            rows.push(row?);
        }
        Ok(rows)
    }
}

impl<TX> LedgerProvider<'_, TX>
where
    TX: DbTxMut + DbTx,
{
    /// Saves a [`MevBlock`] and all of its transactions.
    ///
    /// Any block previously stored under the same number is removed first,
    /// together with its hash index entries.
    pub(crate) fn save_block(&self, block: &MevBlock) -> Result<(), StorageError> {
        if !block.is_consistent() {
            warn!(
                target: "tracer_storage",
                block_number = block.block_number,
                transactions = block.transactions.len(),
                total_value = %block.total_value,
                "Refusing to store inconsistent block"
            );
            return Err(StorageError::InvalidBlock(format!(
                "block {} failed consistency checks",
                block.block_number
            )));
        }

        let block_number = block.block_number;
        self.remove_block(block_number)?;

        self.tx.put::<MevBlocks>(block_number, StoredMevBlock::from(block)).inspect_err(|err| {
            error!(target: "tracer_storage", block_number, ?err, "Failed to save block");
        })?;

        self.tx.put::<BlockHashNumbers>(block.block_hash, block_number).inspect_err(|err| {
            error!(
                target: "tracer_storage",
                block_number,
                ?err,
                "Failed to save block hash index"
            );
        })?;

        for (index, tx) in (0u32..).zip(&block.transactions) {
            self.tx
                .put::<MevTransactions>(
                    TransactionKey::new(block_number, index),
                    StoredMevTransaction::from(tx),
                )
                .inspect_err(|err| {
                    error!(
                        target: "tracer_storage",
                        block_number,
                        index,
                        ?err,
                        "Failed to save transaction"
                    );
                })?;

            self.tx.put::<TransactionHashNumbers>(tx.tx_hash, block_number).inspect_err(|err| {
                error!(
                    target: "tracer_storage",
                    block_number,
                    tx_hash = %tx.tx_hash,
                    ?err,
                    "Failed to save transaction hash index"
                );
            })?;
        }

        Ok(())
    }

    /// Removes the block stored under `block_number`, if any.
    ///
    /// Hash index entries are only removed while they still point at this block.
    fn remove_block(&self, block_number: u64) -> Result<(), StorageError> {
        let Some(stored) = self.tx.get::<MevBlocks>(block_number)? else {
            return Ok(());
        };

        debug!(target: "tracer_storage", block_number, "Replacing previously stored block");

        if self.tx.get::<BlockHashNumbers>(stored.hash)? == Some(block_number) {
            self.tx.delete::<BlockHashNumbers>(stored.hash, None)?;
        }

        for (key, tx) in self.transactions_in_block(block_number)? {
            if self.tx.get::<TransactionHashNumbers>(tx.tx_hash)? == Some(block_number) {
                self.tx.delete::<TransactionHashNumbers>(tx.tx_hash, None)?;
            }
            self.tx.delete::<MevTransactions>(key, None)?;
        }

        self.tx.delete::<MevBlocks>(block_number, None).inspect_err(|err| {
            error!(target: "tracer_storage", block_number, ?err, "Failed to remove block");
        })?;
        Ok(())
    }
}
