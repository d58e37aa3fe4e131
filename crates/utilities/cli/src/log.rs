//! Logging arguments.

use crate::CliResult;
use clap::{ArgAction, Args};

/// Logging arguments shared by the binaries.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LogArgs {
    /// Verbosity level. Repeat to increase it (`-v` debug, `-vv` trace).
    #[arg(short = 'v', long = "verbosity", action = ArgAction::Count, global = true)]
    pub v: u8,
    /// Emit logs as JSON objects.
    #[arg(long = "log.json", env = "LOG_JSON", default_value_t = false, global = true)]
    pub json: bool,
}

impl LogArgs {
    /// Installs the global tracing subscriber for these arguments.
    pub fn init_tracing_subscriber(&self) -> CliResult<()> {
        crate::init_tracing_subscriber(self.v, self.json, None)?;
        Ok(())
    }
}
