//! Tracing subscriber setup for the binary.
//!
//! `RUST_LOG` controls verbosity; without it the crate logs at `info`.
//! Events go to stderr so the board and prompts on stdout stay readable.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "bitboard_duel=info";

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
