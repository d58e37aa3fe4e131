//! Contains the tracer CLI.

use crate::flags::TracerArgs;
use alloy_rpc_client::RpcClient;
use anyhow::{Context as _, Result};
use clap::Parser;
use mevtrace_cli::{LogArgs, MetricsArgs, cli_styles};
use mevtrace_core::{Metrics, Poller, RpcGateway};
use mevtrace_rpc::MevRpc;
use mevtrace_storage::LedgerDb;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Traces value transfers to block proposers and serves them over JSON-RPC.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, styles = cli_styles(), long_about = None)]
pub(crate) struct Cli {
    /// Logging arguments.
    #[command(flatten)]
    pub(crate) log: LogArgs,
    /// Prometheus CLI arguments.
    #[command(flatten)]
    pub(crate) metrics: MetricsArgs,
    /// Tracer arguments.
    #[command(flatten)]
    pub(crate) tracer: TracerArgs,
}

impl Cli {
    /// Runs the CLI.
    pub(crate) fn run(self) -> Result<()> {
        // Initialize the telemetry stack.
        self.init_stack()?;

        Self::run_until_shutdown(self.start())
    }

    /// Initialize the tracing stack and Prometheus metrics recorder.
    ///
    /// This function should be called at the beginning of the program.
    pub(crate) fn init_stack(&self) -> Result<()> {
        self.log.init_tracing_subscriber().context("Failed to initialize tracing")?;

        if let Some(addr) =
            self.metrics.init_metrics().context("Failed to start prometheus exporter")?
        {
            info!(target: "tracer", %addr, "Prometheus exporter started");
        }
        Metrics::init();

        Ok(())
    }

    /// Starts the tracer and blocks until a shutdown signal arrives.
    pub(crate) async fn start(self) -> Result<()> {
        let config = self.tracer.tracer_config();

        let ledger = LedgerDb::new(&self.tracer.datadir)
            .with_context(|| {
                format!("Failed to open ledger at '{}'", self.tracer.datadir.display())
            })?
            .with_floor_block(config.floor_block);
        let ledger = Arc::new(ledger);

        let rpc_client = RpcClient::new_http(self.tracer.rpc_endpoint.clone());
        let gateway = Arc::new(RpcGateway::new(rpc_client, config.call_timeout));

        let (rpc_addr, rpc_handle) = MevRpc::new(ledger.clone())
            .launch(self.tracer.rpc_socket())
            .await
            .with_context(|| format!("Failed to start query API on {}", self.tracer.rpc_socket()))?;

        let cancellation = CancellationToken::new();
        let poller = Poller::new(gateway, ledger, &config, cancellation.clone());
        let poller_task = tokio::spawn(poller.run());

        info!(
            target: "tracer",
            rpc_endpoint = %self.tracer.rpc_endpoint,
            %rpc_addr,
            floor_block = config.floor_block,
            relay_address = %config.relay_address,
            "Tracer started"
        );

        shutdown_signal().await?;
        info!(target: "tracer", "Shutting down");

        cancellation.cancel();
        poller_task.await.context("Poller task failed")?;

        if rpc_handle.stop().is_ok() {
            rpc_handle.stopped().await;
        } else {
            warn!(target: "tracer", "Query API already stopped");
        }

        Ok(())
    }

    /// Runs `fut` to completion on a new tokio runtime.
    pub(crate) fn run_until_shutdown<F>(fut: F) -> Result<()>
    where
        F: std::future::Future<Output = Result<()>>,
    {
        let rt = Self::tokio_runtime().context("Failed to build tokio runtime")?;
        rt.block_on(fut)
    }

    /// Creates a new default tokio multi-thread [Runtime](tokio::runtime::Runtime) with all
    /// features enabled
    pub(crate) fn tokio_runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
        tokio::runtime::Builder::new_multi_thread().enable_all().build()
    }
}

/// Waits for SIGINT (ctrl-c) or, on unix, SIGTERM.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    let mut terminate =
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?;
    #[cfg(unix)]
    let terminate = terminate.recv();

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Option<()>>();

    tokio::select! {
        result = ctrl_c => {
            result.context("Failed to listen for ctrl-c")?;
            info!(target: "tracer", "Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!(target: "tracer", "Received SIGTERM");
        }
    }
    Ok(())
}
