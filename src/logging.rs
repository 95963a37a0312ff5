//! Diagnostic logging setup
//!
//! Installs a `tracing` fmt subscriber writing to stderr. `RUST_LOG` takes
//! precedence; otherwise only this crate logs, at `warn` (or `debug` when
//! verbose output was requested).

use std::sync::Once;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Initialize the global tracing subscriber. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let level = if verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        };

        let filter = match std::env::var_os("RUST_LOG") {
            Some(_) => EnvFilter::from_default_env(),
            None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_twice_does_not_panic() {
        super::init_tracing(false);
        super::init_tracing(true);
    }
}
