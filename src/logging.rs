//! Tracing subscriber setup for the `synx` binary.
//!
//! Log lines go to **stderr** so stdout stays parseable (`synx search --json`).
//! `RUST_LOG` takes precedence over `[logging].level`; `--verbose` forces
//! `debug`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Pick the filter directive: `--verbose`, then `rust_log`, then config.
///
/// A blank `rust_log` counts as unset.
pub fn filter_directive(config: &LoggingConfig, verbose: bool, rust_log: Option<&str>) -> String {
    if verbose {
        return "debug".to_string();
    }
    match rust_log {
        Some(env) if !env.trim().is_empty() => env.to_string(),
        _ => config.level.clone(),
    }
}

pub fn init_logger(config: &LoggingConfig, verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(config, verbose, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    // A second init (tests, embedding) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
