//! Tracing setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVES: &str = "warn,searchdeck=info";

/// Filter used with `--verbose`.
const VERBOSE_DIRECTIVES: &str = "info,searchdeck=debug,searchdeck_core=debug,searchdeck_sources=debug";

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// results.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_DIRECTIVES)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
    };

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
