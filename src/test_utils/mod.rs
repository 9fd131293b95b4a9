//! Test utilities for variant-matrix
//!
//! Helpers shared by unit tests and the integration suite:
//! - [`ProductFixture`] builds products with a given field layout and variants
//! - [`RecordingFieldType`], [`MarkerScriptFieldType`] and [`FailingFieldType`]
//!   are field types that expose what the renderer asked of them
//!
//! # Example
//!
//! ```rust,no_run
//! use variant_matrix::test_utils::{ProductFixture, RecordingFieldType};
//!
//! let recorder = RecordingFieldType::new("recorded");
//! let product = ProductFixture::new("Tee")
//!     .field("color", "recorded")
//!     .variant(Some(1), "TEE-S")
//!     .build();
//! ```

pub mod field_types;
pub mod fixtures;

pub use field_types::{FailingFieldType, MarkerScriptFieldType, RecordedCall, RecordingFieldType};
pub use fixtures::{ProductFixture, sample_product};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=variant_matrix=debug cargo test
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
            .try_init();
    });
}
