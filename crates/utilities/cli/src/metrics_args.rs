//! Prometheus metrics arguments.

use crate::{CliResult, init_prometheus_server};
use clap::Args;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Configuration of the prometheus exporter.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MetricsArgs {
    /// Serve prometheus metrics.
    #[arg(long = "metrics.enabled", env = "METRICS_ENABLED", default_value_t = false)]
    pub enabled: bool,
    /// Address the metrics exporter listens on.
    #[arg(long = "metrics.addr", env = "METRICS_ADDR", default_value_t = Self::DEFAULT_ADDR)]
    pub addr: IpAddr,
    /// Port the metrics exporter listens on.
    #[arg(long = "metrics.port", env = "METRICS_PORT", default_value_t = Self::DEFAULT_PORT)]
    pub port: u16,
}

impl MetricsArgs {
    /// Default exporter address.
    pub const DEFAULT_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
    /// Default exporter port.
    pub const DEFAULT_PORT: u16 = 8090;

    /// Starts the exporter if metrics are enabled.
    ///
    /// Returns the listening address, or `None` when metrics are disabled.
    pub fn init_metrics(&self) -> CliResult<Option<SocketAddr>> {
        if !self.enabled {
            return Ok(None);
        }
        Ok(Some(init_prometheus_server(self.addr, self.port)?))
    }
}

impl Default for MetricsArgs {
    fn default() -> Self {
        Self { enabled: false, addr: Self::DEFAULT_ADDR, port: Self::DEFAULT_PORT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        metrics: MetricsArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        assert_eq!(cli.metrics, MetricsArgs::default());
    }

    #[test]
    fn test_custom_listener() {
        let cli = TestCli::try_parse_from([
            "test",
            "--metrics.enabled",
            "--metrics.addr",
            "0.0.0.0",
            "--metrics.port",
            "9100",
        ])
        .unwrap();

        assert!(cli.metrics.enabled);
        assert_eq!(cli.metrics.addr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(cli.metrics.port, 9100);
    }

    #[test]
    fn test_disabled_metrics_start_nothing() {
        assert_eq!(MetricsArgs::default().init_metrics().unwrap(), None);
    }
}
