//! Structured logging shared by connectors and the hosts embedding them.
//!
//! Connectors log through the `tracing` macros re-exported here. A host
//! calls [`setup`] once at startup to print those events.

pub use tracing::metadata::LevelFilter;
pub use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// HTTP plumbing crates held at `warn` unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: &[&str] = &["hyper", "reqwest"];

/// Install a global subscriber printing events at `level` (INFO if `None`).
///
/// `RUST_LOG`, when set, replaces the default directives. Once a subscriber
/// is installed, further calls do nothing.
pub fn setup(level: Option<LevelFilter>) {
    let level = level.unwrap_or(LevelFilter::INFO);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_filter(level))
        .try_init();
    if installed.is_ok() {
        debug!(%level, "logging set up");
    }
}

fn default_filter(level: LevelFilter) -> EnvFilter {
    QUIET_TARGETS
        .iter()
        .fold(EnvFilter::new(level.to_string()), |filter, target| {
            match format!("{target}=warn").parse() {
                Ok(directive) => filter.add_directive(directive),
                Err(_) => filter,
            }
        })
}
