//! Logging for tests: installed once per test binary.

use std::sync::Once;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Route famtree's events into the captured test output.
///
/// `RUST_LOG` replaces the default `famtree=trace` filter. Safe to call
/// from every test.
pub fn init_test_setup() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("famtree=trace,rayon=off,rayon_core=off"));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_span_events(FmtSpan::CLOSE)
            .try_init();
        if let Err(e) = installed {
            // another subscriber won the race, its output is good enough
            eprintln!("test logging not installed: {e}");
        }
        tracing::info!("test logging ready");
    });
}
