//! Turns the trace of a block into a [`MevBlock`].

use crate::Metrics;
use alloy_primitives::{Address, U256};
use mevtrace_types::{BlockHeader, MevBlock, MevTransaction, TraceEntry, parse_hex_quantity};
use tracing::{debug, warn};

/// Result of running the [`Extractor`] over a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// At least one transfer paid the proposer.
    Block(MevBlock),
    /// No transfer paid the proposer; nothing should be persisted.
    NoMatches,
}

/// Filters trace entries down to value transfers received by the block proposer.
///
/// The extractor holds no state besides its configuration, so the same input
/// always yields the same [`Extraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extractor {
    relay_address: Address,
}

impl Extractor {
    /// Creates a new [`Extractor`] flagging `relay_address` as the known relay.
    pub const fn new(relay_address: Address) -> Self {
        Self { relay_address }
    }

    /// Extracts the transfers to `header.miner` from `entries`.
    ///
    /// Entries are kept in trace order. A matching entry without a sender is
    /// kept with the zero address as sender. A matching entry with a missing or
    /// unparsable value, no transaction hash to index it by, or a value that
    /// would overflow the total is logged and dropped without affecting the
    /// rest of the block.
    pub fn extract(
        &self,
        block_number: u64,
        header: &BlockHeader,
        entries: &[TraceEntry],
    ) -> Extraction {
        let miner = header.miner;
        let mut total_value = U256::ZERO;
        let mut transactions = Vec::new();

        for (position, entry) in entries.iter().enumerate() {
            if entry.action.to != Some(miner) {
                continue;
            }

            let Some(transaction) = Self::to_transaction(block_number, miner, position, entry)
            else {
                Metrics::record_dropped_entry();
                continue;
            };

            let Some(next_total) = total_value.checked_add(transaction.value) else {
                warn!(
                    target: "tracer::extractor",
                    block_number,
                    position,
                    value = %transaction.value,
                    "Transfer value overflows the block total, dropping entry"
                );
                Metrics::record_dropped_entry();
                continue;
            };

            total_value = next_total;
            transactions.push(transaction);
        }

        if transactions.is_empty() {
            debug!(target: "tracer::extractor", block_number, %miner, "No transfers to proposer");
            return Extraction::NoMatches;
        }

        Extraction::Block(MevBlock {
            block_number,
            block_hash: header.hash,
            miner,
            is_known_relay: miner == self.relay_address,
            total_value,
            transactions,
        })
    }

    fn to_transaction(
        block_number: u64,
        miner: Address,
        position: usize,
        entry: &TraceEntry,
    ) -> Option<MevTransaction> {
        let Some(raw_value) = entry.action.value.as_deref() else {
            warn!(target: "tracer::extractor", block_number, position, "Transfer has no value");
            return None;
        };

        let value = parse_hex_quantity(raw_value)
            .inspect_err(|err| {
                warn!(
                    target: "tracer::extractor",
                    block_number,
                    position,
                    %err,
                    "Failed to parse transfer value"
                );
            })
            .ok()?;

        let Some(tx_hash) = entry.transaction_hash else {
            warn!(
                target: "tracer::extractor",
                block_number,
                position,
                "Transfer has no transaction hash"
            );
            return None;
        };

        let from = entry.action.from.unwrap_or_else(|| {
            debug!(target: "tracer::extractor", block_number, %tx_hash, "Transfer has no sender");
            Address::ZERO
        });

        Some(MevTransaction { block_number, tx_hash, from, to: miner, value })
    }
}
