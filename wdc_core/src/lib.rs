//!
//! Web data connector core
//!
//! Provides the contract between a host analytics tool and the connectors
//! that feed it tables: the three-callback [`Connector`] lifecycle, the
//! [`Host`] and [`Table`] capabilities a host hands to a connector, and the
//! schema types used to declare tables.
#![deny(missing_docs)]

pub use connectors::{Connector, Host, Table};

pub mod connectors;
pub mod host;
pub mod logging;
pub mod schema;

/// Evaluate `$body` and log how long it took, at debug level, under the
/// step name `$step`.
#[macro_export]
macro_rules! log_runtime {
    ($step:expr, $body:expr) => {{
        let started = std::time::Instant::now();
        $crate::logging::debug!(step = $step, "starting");
        let result = $body;
        $crate::logging::debug!(step = $step, elapsed = ?started.elapsed(), "finished");
        result
    }};
}
