use crate::{
    BlockProcessingError, ChainGateway, Extraction, Extractor, GatewayError, Metrics,
    RetryQueue, RetryStatus, TracerConfig,
};
use alloy_primitives::U256;
use mevtrace_storage::LedgerWriter;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// What processing a single block produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    /// The block paid its proposer and was committed.
    Committed {
        /// Number of transfers stored.
        transactions: usize,
        /// Total value paid to the proposer.
        total_value: U256,
    },
    /// The block has no transfer to its proposer; nothing was stored.
    NoMatches,
}

/// Per-outcome counts of a catch-up or retry pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatchUpSummary {
    /// Blocks committed to the ledger.
    pub committed: u64,
    /// Blocks without transfers to their proposer.
    pub no_matches: u64,
    /// Blocks skipped because of a failure.
    pub skipped: u64,
    /// Whether cancellation stopped the pass before its last block.
    pub interrupted: bool,
}

impl CatchUpSummary {
    const fn record(&mut self, outcome: BlockOutcome) {
        match outcome {
            BlockOutcome::Committed { .. } => self.committed += 1,
            BlockOutcome::NoMatches => self.no_matches += 1,
        }
    }
}

/// Walks block ranges, extracting and committing the transfers of every block.
///
/// Failures are contained per block: a failing block is logged, queued for a
/// later retry and the walk continues with the next number. The cancellation
/// token is checked before every block; a block that already started runs to
/// completion.
#[derive(Debug)]
pub struct CatchUpEngine<G, L> {
    gateway: Arc<G>,
    ledger: Arc<L>,
    extractor: Extractor,
    retries: RetryQueue,
    cancellation: CancellationToken,
}

impl<G, L> CatchUpEngine<G, L>
where
    G: ChainGateway,
    L: LedgerWriter + Send + Sync,
{
    /// Creates a new [`CatchUpEngine`] instance.
    pub const fn new(
        gateway: Arc<G>,
        ledger: Arc<L>,
        config: &TracerConfig,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            gateway,
            ledger,
            extractor: Extractor::new(config.relay_address),
            retries: RetryQueue::new(config.max_block_retries),
            cancellation,
        }
    }

    /// Returns the queue of skipped blocks awaiting a retry.
    pub const fn retries(&self) -> &RetryQueue {
        &self.retries
    }

    /// Processes every block number in `from..=to` once, in ascending order.
    ///
    /// Stops early, before the next block, once the cancellation token fires.
    pub async fn catch_up(&mut self, from: u64, to: u64) -> CatchUpSummary {
        let mut summary = CatchUpSummary::default();
        if from > to {
            debug!(target: "tracer::catch_up", from, to, "Empty catch-up range");
            return summary;
        }

        info!(target: "tracer::catch_up", from, to, "Catching up");

        for block_number in from..=to {
            if self.cancellation.is_cancelled() {
                info!(target: "tracer::catch_up", block_number, "Catch-up cancelled");
                summary.interrupted = true;
                break;
            }

            match self.process_block(block_number).await {
                Ok(outcome) => {
                    self.retries.resolve(block_number);
                    summary.record(outcome);
                }
                Err(err) => {
                    let queued = self.retries.schedule(block_number);
                    warn!(
                        target: "tracer::catch_up",
                        block_number,
                        %err,
                        queued_for_retry = queued,
                        "Skipping block"
                    );
                    Metrics::record_skipped_block(err.reason());
                    summary.skipped += 1;
                }
            }
        }

        info!(
            target: "tracer::catch_up",
            from,
            to,
            committed = summary.committed,
            no_matches = summary.no_matches,
            skipped = summary.skipped,
            interrupted = summary.interrupted,
            "Catch-up pass finished"
        );
        summary
    }

    /// Retries every queued block once, in ascending order.
    ///
    /// A block that succeeds or has no matches leaves the queue. A block that
    /// fails again is dropped once it runs out of retries. Blocks not reached
    /// before cancellation stay queued.
    pub async fn retry_pending(&mut self) -> CatchUpSummary {
        let mut summary = CatchUpSummary::default();

        for block_number in self.retries.pending() {
            if self.cancellation.is_cancelled() {
                info!(target: "tracer::catch_up", block_number, "Retries cancelled");
                summary.interrupted = true;
                break;
            }

            match self.process_block(block_number).await {
                Ok(outcome) => {
                    self.retries.resolve(block_number);
                    info!(target: "tracer::catch_up", block_number, ?outcome, "Retried block");
                    summary.record(outcome);
                }
                Err(err) => {
                    summary.skipped += 1;
                    Metrics::record_skipped_block(err.reason());
                    match self.retries.record_failure(block_number) {
                        RetryStatus::Pending { attempts } => {
                            warn!(
                                target: "tracer::catch_up",
                                block_number,
                                attempts,
                                %err,
                                "Retry failed"
                            );
                        }
                        RetryStatus::DeadLettered { attempts } => {
                            error!(
                                target: "tracer::catch_up",
                                block_number,
                                attempts,
                                %err,
                                "Giving up on block"
                            );
                            Metrics::record_dead_lettered_block();
                        }
                    }
                }
            }
        }

        summary
    }

    /// Fetches, extracts and commits a single block.
    pub async fn process_block(
        &self,
        block_number: u64,
    ) -> Result<BlockOutcome, BlockProcessingError> {
        let entries =
            self.gateway.trace_block(block_number).await.map_err(BlockProcessingError::Trace)?;

        let Some(first) = entries.first() else {
            return Err(BlockProcessingError::Trace(GatewayError::EmptyBlock(block_number)));
        };

        let header = self
            .gateway
            .block_header(first.block_hash)
            .await
            .map_err(BlockProcessingError::Header)?;

        let block = match self.extractor.extract(block_number, &header, &entries) {
            Extraction::Block(block) => block,
            Extraction::NoMatches => {
                Metrics::record_block_without_transfers();
                return Ok(BlockOutcome::NoMatches);
            }
        };

        self.ledger.commit_block(&block).map_err(BlockProcessingError::Commit)?;

        info!(
            target: "tracer::catch_up",
            block_number,
            block_hash = %block.block_hash,
            miner = %block.miner,
            is_known_relay = block.is_known_relay,
            transactions = block.transactions.len(),
            total_value = %block.total_value,
            "Committed MEV block"
        );
        Metrics::record_committed_block();

        Ok(BlockOutcome::Committed {
            transactions: block.transactions.len(),
            total_value: block.total_value,
        })
    }
}
