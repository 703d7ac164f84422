//! Tracing setup for the CLI.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Installs the `fmt` subscriber on stderr before anything else runs.
///
/// `--verbose` forces debug and `RUST_LOG` wins next; both are fixed here.
/// Otherwise logging starts at info and the returned function switches it to
/// the `[logging] level` from the config once that has been read.
pub fn init(verbose: bool) -> impl FnOnce(&str) -> Result<()> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let fixed = verbose || from_env.is_some();
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        from_env.unwrap_or_else(|| EnvFilter::new("info"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_filter_reloading();
    let handle = builder.reload_handle();
    builder.init();

    move |level: &str| {
        if fixed {
            return Ok(());
        }
        handle
            .reload(EnvFilter::new(level))
            .context("Failed to apply configured log level")
    }
}
