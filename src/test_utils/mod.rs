//! Test utilities
//!
//! Helpers shared by unit tests and the integration suite: log capture and
//! on-disk deployment fixtures.
//!
//! # Example
//!
//! ```rust,no_run
//! use erddap_dataset_xml::test_utils::{DeploymentFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let fixture = DeploymentFixture::new().unwrap();
//! let config = fixture.config();
//! ```

pub mod fixtures;

pub use fixtures::{
    DeploymentFixture, FIXTURE_DEPLOYMENT, definitions_yaml, trajectory_names,
};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging stays
/// off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
