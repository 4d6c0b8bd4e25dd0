pub mod builders;
pub mod fake_stage;
pub mod fake_supervisor;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use autoupconvert::logging::LOG_ENV_VAR;
use tracing_subscriber::{fmt, EnvFilter};

/// Upper bound for one pipeline run, watcher delivery, or real `sh` converter
/// in tests. A scripted converter that never reaches its exit marker trips it.
pub const RUN_TIMEOUT: Duration = Duration::from_secs(10);

static INIT: Once = Once::new();

/// Initialise tracing for tests, captured per test by the harness.
///
/// Uses the same `AUTOUPCONVERT_LOG` variable as the binary, falling back to
/// `RUST_LOG` and then to `autoupconvert=debug` so stage and dispatch events
/// show up when a test fails.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("autoupconvert=debug"));

        fmt().with_env_filter(filter).with_test_writer().init();
    });
}

/// Await `f`, failing the test if it outlives [`RUN_TIMEOUT`].
pub async fn within_run_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(RUN_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("no result within {RUN_TIMEOUT:?}; is a converter stuck?"),
    }
}
