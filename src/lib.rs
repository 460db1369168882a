#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Analysis input — loads the JSON document that drives a control vs. treated
//! clone comparison and echoes it back as a status report.
//!
//! Modules:
//! - `config`: the `AnalysisConfig` model, loader, errors and schema helpers.
//! - `report`: the status document written after a successful load.
//!
//! Use `analysis_input::prelude::*` to bring commonly used items into scope quickly.

/// Public module: configuration (model, loader, errors, schema helpers).
pub mod config;
/// Public module: status report output.
pub mod report;

/// Crate-level constants for consumers that want to inspect package metadata at runtime.
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version (e.g., "0.1.0").
#[inline]
pub const fn version() -> &'static str {
    PKG_VERSION
}

/// Parse a simple level name (trace|debug|info|warn|error).
pub fn parse_level(s: &str) -> Option<tracing::Level> {
    use tracing::Level;
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Initialize tracing (logging) on stderr.
/// - `level` wins if given, then the `RUST_LOG` environment variable.
/// - Falls back to `info` level.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init_tracing(level: Option<&str>) {
    use tracing::Level;
    use tracing_subscriber::fmt;

    let level = level
        .and_then(parse_level)
        .or_else(|| std::env::var("RUST_LOG").ok().as_deref().and_then(parse_level))
        .unwrap_or(Level::INFO);

    // Ignore the error if the global subscriber was already set.
    let _ = fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// A convenient set of exports for most consumers.
///
/// Bring this into scope with:
/// `use analysis_input::prelude::*;`
pub mod prelude {
    // Common result/error handling
    pub use anyhow::{Context, Error, Result, anyhow, bail, ensure};

    // Serialization
    pub use serde::Serialize;

    // Tracing macros
    pub use tracing::{debug, error, info, instrument, trace, warn};

    pub use crate as analysis_input;

    // Frequently used items
    pub use crate::config::{AnalysisConfig, ConfigError, ErrorKind};
    pub use crate::report::StatusReport;
    pub use crate::{config, report};
}
