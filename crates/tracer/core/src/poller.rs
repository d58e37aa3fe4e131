//! Periodic driver of the [`CatchUpEngine`].

use crate::{CatchUpEngine, CatchUpSummary, ChainGateway, Metrics, TracerConfig};
use mevtrace_storage::LedgerWriter;
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Result of a single poller tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The ledger already covers the chain head.
    InSync {
        /// Observed chain head.
        head: u64,
    },
    /// A catch-up pass ran over `from..=to`.
    CaughtUp {
        /// First block of the pass, the high-water mark.
        from: u64,
        /// Last block of the pass, the chain head.
        to: u64,
        /// Outcome counts of the pass.
        summary: CatchUpSummary,
    },
    /// The tick was abandoned because the ledger or the chain could not be read.
    Skipped,
    /// Cancellation fired while retrying skipped blocks.
    Cancelled,
}

/// Runs a catch-up pass every poll interval until cancelled.
#[derive(Debug)]
pub struct Poller<G, L> {
    gateway: Arc<G>,
    ledger: Arc<L>,
    engine: CatchUpEngine<G, L>,
    poll_interval: Duration,
    cancellation: CancellationToken,
}

impl<G, L> Poller<G, L>
where
    G: ChainGateway,
    L: LedgerWriter + Send + Sync,
{
    /// Creates a new [`Poller`] instance.
    pub fn new(
        gateway: Arc<G>,
        ledger: Arc<L>,
        config: &TracerConfig,
        cancellation: CancellationToken,
    ) -> Self {
        let engine =
            CatchUpEngine::new(gateway.clone(), ledger.clone(), config, cancellation.clone());
        Self { gateway, ledger, engine, poll_interval: config.poll_interval, cancellation }
    }

    /// Runs the polling loop.
    ///
    /// The first tick happens one poll interval after the call. Returns once the
    /// cancellation token fires; a running tick stops after its current block.
    pub async fn run(mut self) {
        info!(
            target: "tracer::poller",
            poll_interval = ?self.poll_interval,
            "Starting poller"
        );

        loop {
            tokio::select! {
                biased;

                _ = self.cancellation.cancelled() => {
                    info!(target: "tracer::poller", "Poller cancelled, stopping");
                    break;
                }
                _ = tokio::time::sleep(self.poll_interval) => {
                    self.tick().await;
                }
            }
        }
    }

    /// Retries skipped blocks, then catches up from the high-water mark to the
    /// chain head.
    pub async fn tick(&mut self) -> TickOutcome {
        if !self.engine.retries().is_empty() {
            let summary = self.engine.retry_pending().await;
            debug!(target: "tracer::poller", ?summary, "Retried skipped blocks");
            if summary.interrupted {
                return TickOutcome::Cancelled;
            }
        }

        let high_water_mark = match self.ledger.high_water_mark() {
            Ok(high_water_mark) => high_water_mark,
            Err(err) => {
                error!(target: "tracer::poller", %err, "Failed to read high-water mark");
                return TickOutcome::Skipped;
            }
        };

        let head = match self.gateway.head_block_number().await {
            Ok(head) => head,
            Err(err) => {
                warn!(target: "tracer::poller", %err, "Failed to fetch chain head");
                return TickOutcome::Skipped;
            }
        };

        Metrics::record_positions(head, high_water_mark);

        if head <= high_water_mark {
            info!(target: "tracer::poller", head, high_water_mark, "Ledger in sync");
            return TickOutcome::InSync { head };
        }

        let summary = self.engine.catch_up(high_water_mark, head).await;
        TickOutcome::CaughtUp { from: high_water_mark, to: head, summary }
    }
}
