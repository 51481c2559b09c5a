//! spotfishing-test - Regression test framework for spotfishing
//!
//! This crate provides the shared test harness for the workspace. `RegParams`
//! counts numbered comparisons of values, volumes, label maps and tables, and
//! reports every failure at `cleanup`.
//!
//! It also builds seeded synthetic volumes and installs a stderr logger for
//! tests.
//!
//! # Usage
//!
//! ```ignore
//! use spotfishing_test::RegParams;
//!
//! let mut rp = RegParams::new("detect");
//! rp.compare_values(3.0, table.n_rows() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log filter for test output (default "warn")

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::RegParams;
pub use synth::{blob_volume, noisy_background, stamp_gaussian_blob, to_u16};

use flexi_logger::{Logger, LoggerHandle};
use log::debug;
use spotfishing_core::{ImageData, Volume};
use std::sync::OnceLock;

static LOGGER: OnceLock<Option<LoggerHandle>> = OnceLock::new();

/// Install the test logger once per process
///
/// Logs go to stderr, filtered by `RUST_LOG` with "warn" as the default.
/// Later calls, and calls after another logger was installed, do nothing.
pub fn init_logging() {
    LOGGER.get_or_init(|| {
        Logger::try_with_env_or_str("warn")
            .ok()
            .and_then(|logger| logger.log_to_stderr().start().ok())
    });
}

/// Load a test stack from the test data directory
///
/// # Arguments
///
/// * `name` - File name (e.g., "spots_small.npy")
pub fn load_test_image(name: &str) -> TestResult<ImageData> {
    let path = test_data_path(name);
    debug!("load_test_image: {path}");
    spotfishing_io::read_stack(&path).map_err(|e| TestError::VolumeLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Load a test stack as a 3D `f64` volume
pub fn load_test_volume(name: &str) -> TestResult<Volume> {
    load_test_image(name)?
        .to_volume()
        .ok_or_else(|| TestError::NotAVolume {
            path: test_data_path(name),
        })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // spotfishing-test is at crates/spotfishing-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/inputs/{}", workspace_root(), name)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
