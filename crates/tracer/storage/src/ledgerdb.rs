//! Main database access structure.

use crate::{
    error::StorageError,
    models::Tables,
    providers::LedgerProvider,
    traits::{LedgerReader, LedgerWriter},
};
use alloy_primitives::B256;
use mevtrace_types::{MevBlock, MevTransaction};
use reth_db::{
    DatabaseEnv,
    mdbx::{DatabaseArguments, init_db_for},
};
use reth_db_api::{database::Database, transaction::DbTx};
use std::path::Path;
use tracing::{error, info};

/// Manages the database environment of the ledger.
/// Provides transactional access to data via providers.
#[derive(Debug)]
pub struct LedgerDb {
    env: DatabaseEnv,
    floor_block: u64,
}

impl LedgerDb {
    /// Creates or opens a database environment at the given path.
    ///
    /// The floor block defaults to `0`; see [`LedgerDb::with_floor_block`].
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        let env = init_db_for::<_, Tables>(path, DatabaseArguments::default())?;
        info!(target: "tracer_storage", path = %path.display(), "Opened ledger database");
        Ok(Self { env, floor_block: 0 })
    }

    /// Sets the lowest block number reported by [`LedgerWriter::high_water_mark`].
    pub fn with_floor_block(mut self, floor_block: u64) -> Self {
        self.floor_block = floor_block;
        self
    }

    /// Returns the configured floor block.
    pub const fn floor_block(&self) -> u64 {
        self.floor_block
    }
}

impl LedgerWriter for LedgerDb {
    fn high_water_mark(&self) -> Result<u64, StorageError> {
        let latest = self.env.view(|tx| LedgerProvider::new(tx).latest_block_number())??;
        Ok(latest.map_or(self.floor_block, |block_number| block_number.max(self.floor_block)))
    }

    fn commit_block(&self, block: &MevBlock) -> Result<(), StorageError> {
        let tx = self.env.tx_mut()?;

        // Partial writes of a failed save must never be committed.
        if let Err(err) = LedgerProvider::new(&tx).save_block(block) {
            tx.abort();
            return Err(err);
        }

        tx.commit().inspect_err(|err| {
            error!(
                target: "tracer_storage",
                block_number = block.block_number,
                ?err,
                "Failed to commit block"
            );
        })?;
        Ok(())
    }
}

impl LedgerReader for LedgerDb {
    fn get_block(&self, block_number: u64) -> Result<MevBlock, StorageError> {
        self.env.view(|tx| LedgerProvider::new(tx).get_block(block_number))?
    }

    fn get_block_by_hash(&self, block_hash: B256) -> Result<MevBlock, StorageError> {
        self.env.view(|tx| LedgerProvider::new(tx).get_block_by_hash(block_hash))?
    }

    fn get_transaction(&self, tx_hash: B256) -> Result<MevTransaction, StorageError> {
        self.env.view(|tx| LedgerProvider::new(tx).get_transaction(tx_hash))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use tempfile::TempDir;

    const FLOOR: u64 = 21_000_000;
    const MINER: Address = Address::repeat_byte(0xaa);

    fn block(block_number: u64, values: &[u64]) -> MevBlock {
        let transactions = values
            .iter()
            .enumerate()
            .map(|(i, value)| MevTransaction {
                block_number,
                tx_hash: B256::from(U256::from(block_number * 1000 + i as u64)),
                from: Address::repeat_byte(0x01),
                to: MINER,
                value: U256::from(*value),
            })
            .collect::<Vec<_>>();
        MevBlock {
            block_number,
            block_hash: B256::from(U256::from(block_number)),
            miner: MINER,
            is_known_relay: false,
            total_value: U256::from(values.iter().sum::<u64>()),
            transactions,
        }
    }

    fn open_db(tmp_dir: &TempDir) -> LedgerDb {
        LedgerDb::new(&tmp_dir.path().join("ledger"))
            .expect("Should create or open database")
            .with_floor_block(FLOOR)
    }

    #[test]
    fn test_create_and_open_db() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let db_path = tmp_dir.path().join("ledger");
        let db = LedgerDb::new(&db_path);
        assert!(db.is_ok(), "Should create or open database");
    }

    #[test]
    fn test_high_water_mark_empty_is_floor() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let db = open_db(&tmp_dir);
        assert_eq!(db.high_water_mark().unwrap(), FLOOR);
    }

    #[test]
    fn test_high_water_mark_never_below_floor() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let db = open_db(&tmp_dir);

        db.commit_block(&block(100, &[42])).unwrap();
        assert_eq!(db.high_water_mark().unwrap(), FLOOR);

        db.commit_block(&block(FLOOR + 5, &[1])).unwrap();
        db.commit_block(&block(FLOOR + 2, &[1])).unwrap();
        assert_eq!(db.high_water_mark().unwrap(), FLOOR + 5);
    }

    #[test]
    fn test_commit_and_lookup() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let db = open_db(&tmp_dir);
        let committed = block(FLOOR + 1, &[42, 8]);
        db.commit_block(&committed).unwrap();

        assert_eq!(db.get_block(FLOOR + 1).unwrap(), committed);
        assert_eq!(db.get_block_by_hash(committed.block_hash).unwrap(), committed);
        assert_eq!(
            db.get_transaction(committed.transactions[1].tx_hash).unwrap(),
            committed.transactions[1]
        );
        assert!(matches!(db.get_block(FLOOR + 2), Err(StorageError::EntryNotFound(_))));
    }

    #[test]
    fn test_failed_commit_keeps_previous_state() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let db = open_db(&tmp_dir);
        let committed = block(FLOOR + 1, &[42]);
        db.commit_block(&committed).unwrap();

        let mut broken = block(FLOOR + 1, &[7, 7]);
        broken.total_value = U256::from(1);
        assert!(matches!(db.commit_block(&broken), Err(StorageError::InvalidBlock(_))));

        assert_eq!(db.get_block(FLOOR + 1).unwrap(), committed);
    }

    #[test]
    fn test_data_survives_reopen() {
        let tmp_dir = TempDir::new().expect("create temp dir");
        let committed = block(FLOOR + 3, &[5]);
        {
            let db = open_db(&tmp_dir);
            db.commit_block(&committed).unwrap();
        }

        let db = open_db(&tmp_dir);
        assert_eq!(db.high_water_mark().unwrap(), FLOOR + 3);
        assert_eq!(db.get_block(FLOOR + 3).unwrap(), committed);
    }
}
