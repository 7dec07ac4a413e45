pub mod builders;
pub mod fake_executor;

use std::sync::Once;
use std::time::Duration;

use hybrid_polisher::logging::{LOG_ENV_VAR, parse_level_str};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;

static INIT: Once = Once::new();

/// Upper bound for a single pipeline run driven by the fake executor.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Initialise tracing for tests.
///
/// Reads the level from `HYBRID_POLISHER_LOG` like the binary does, but
/// defaults to `warn` so the driver's per-stage info lines stay out of the
/// way. Output goes through the test writer, so it only shows for failing
/// tests unless run with `--nocapture`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let level = std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|s| parse_level_str(&s))
            .map(LevelFilter::from_level)
            .unwrap_or(LevelFilter::WARN);

        let _ = fmt()
            .with_max_level(level)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Run a pipeline future, failing the test if it exceeds [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(TEST_TIMEOUT, f)
        .await
        .expect("pipeline run did not finish within the test timeout")
}
