//! In-memory doubles of the chain and the ledger.

use crate::{ChainGateway, GatewayError};
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use mevtrace_storage::{LedgerWriter, StorageError};
use mevtrace_types::{BlockHeader, MevBlock, TraceAction, TraceEntry};
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Mutex,
};

/// Hash used for block `block_number` by [`FakeChain`].
pub(crate) fn block_hash(block_number: u64) -> B256 {
    B256::from(U256::from(block_number))
}

/// A chain whose traces, headers and failures are scripted by the test.
#[derive(Debug, Default)]
pub(crate) struct FakeChain {
    head: Mutex<u64>,
    traces: Mutex<HashMap<u64, Vec<TraceEntry>>>,
    headers: Mutex<HashMap<B256, BlockHeader>>,
    failing_traces: Mutex<HashSet<u64>>,
    failing_headers: Mutex<HashSet<B256>>,
    trace_calls: Mutex<Vec<u64>>,
}

impl FakeChain {
    pub(crate) fn new(head: u64) -> Self {
        let chain = Self::default();
        chain.set_head(head);
        chain
    }

    pub(crate) fn set_head(&self, head: u64) {
        *self.head.lock().unwrap() = head;
    }

    /// Adds a block mined by `miner` with one call entry per `(to, value)` transfer.
    pub(crate) fn add_block(
        &self,
        block_number: u64,
        miner: Address,
        transfers: &[(Address, &str)],
    ) {
        let hash = block_hash(block_number);
        let entries = transfers
            .iter()
            .enumerate()
            .map(|(i, (to, value))| TraceEntry {
                action: TraceAction {
                    from: Some(Address::repeat_byte(0x01)),
                    to: Some(*to),
                    value: Some(value.to_string()),
                },
                block_hash: hash,
                transaction_hash: Some(B256::from(U256::from(block_number * 1_000 + i as u64))),
            })
            .collect();

        self.traces.lock().unwrap().insert(block_number, entries);
        self.headers.lock().unwrap().insert(hash, BlockHeader { hash, miner });
    }

    pub(crate) fn fail_trace(&self, block_number: u64) {
        self.failing_traces.lock().unwrap().insert(block_number);
    }

    pub(crate) fn heal_trace(&self, block_number: u64) {
        self.failing_traces.lock().unwrap().remove(&block_number);
    }

    pub(crate) fn fail_header(&self, block_number: u64) {
        self.failing_headers.lock().unwrap().insert(block_hash(block_number));
    }

    /// Block numbers passed to `trace_block`, in call order.
    pub(crate) fn trace_calls(&self) -> Vec<u64> {
        self.trace_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainGateway for FakeChain {
    async fn head_block_number(&self) -> Result<u64, GatewayError> {
        Ok(*self.head.lock().unwrap())
    }

    async fn trace_block(&self, block_number: u64) -> Result<Vec<TraceEntry>, GatewayError> {
        self.trace_calls.lock().unwrap().push(block_number);
        if self.failing_traces.lock().unwrap().contains(&block_number) {
            return Err(GatewayError::Timeout {
                method: "trace_block",
                timeout: std::time::Duration::from_secs(10),
            });
        }
        self.traces
            .lock()
            .unwrap()
            .get(&block_number)
            .filter(|entries| !entries.is_empty())
            .cloned()
            .ok_or(GatewayError::EmptyBlock(block_number))
    }

    async fn block_header(&self, block_hash: B256) -> Result<BlockHeader, GatewayError> {
        if self.failing_headers.lock().unwrap().contains(&block_hash) {
            return Err(GatewayError::BlockNotFound(block_hash));
        }
        self.headers
            .lock()
            .unwrap()
            .get(&block_hash)
            .copied()
            .ok_or(GatewayError::BlockNotFound(block_hash))
    }
}

/// A ledger keeping committed blocks in a map.
#[derive(Debug, Default)]
pub(crate) struct MemoryLedger {
    floor_block: u64,
    blocks: Mutex<BTreeMap<u64, MevBlock>>,
    commits: Mutex<Vec<u64>>,
    failing_commits: Mutex<HashSet<u64>>,
    failing_reads: Mutex<bool>,
}

impl MemoryLedger {
    pub(crate) fn new(floor_block: u64) -> Self {
        Self { floor_block, ..Default::default() }
    }

    pub(crate) fn fail_commit(&self, block_number: u64) {
        self.failing_commits.lock().unwrap().insert(block_number);
    }

    pub(crate) fn fail_reads(&self) {
        *self.failing_reads.lock().unwrap() = true;
    }

    /// Block numbers successfully committed, in commit order.
    pub(crate) fn commits(&self) -> Vec<u64> {
        self.commits.lock().unwrap().clone()
    }

    pub(crate) fn block(&self, block_number: u64) -> Option<MevBlock> {
        self.blocks.lock().unwrap().get(&block_number).cloned()
    }
}

impl LedgerWriter for MemoryLedger {
    fn high_water_mark(&self) -> Result<u64, StorageError> {
        if *self.failing_reads.lock().unwrap() {
            return Err(StorageError::EntryNotFound("ledger unavailable".to_string()));
        }
        let latest = self.blocks.lock().unwrap().keys().next_back().copied();
        Ok(latest.map_or(self.floor_block, |block_number| block_number.max(self.floor_block)))
    }

    fn commit_block(&self, block: &MevBlock) -> Result<(), StorageError> {
        if self.failing_commits.lock().unwrap().contains(&block.block_number) {
            return Err(StorageError::InvalidBlock(format!("block {}", block.block_number)));
        }
        self.blocks.lock().unwrap().insert(block.block_number, block.clone());
        self.commits.lock().unwrap().push(block.block_number);
        Ok(())
    }
}
