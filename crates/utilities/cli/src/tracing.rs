//! Global tracing subscriber setup.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

/// Maps the `-v` count to the default log level.
///
/// No flag logs at `INFO`; each `-v` lowers the threshold by one level.
pub(crate) const fn verbosity_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global tracing subscriber.
///
/// Without an explicit `env_filter`, directives are read from `RUST_LOG` on top
/// of the level selected by `verbosity`. Set `json` to emit one JSON object per
/// event instead of human-readable lines.
pub fn init_tracing_subscriber(
    verbosity: u8,
    json: bool,
    env_filter: Option<EnvFilter>,
) -> Result<(), TryInitError> {
    let filter = env_filter.unwrap_or_else(|| {
        EnvFilter::builder()
            .with_default_directive(verbosity_level(verbosity).into())
            .from_env_lossy()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json().with_current_span(false)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    }
}
