//! File logging. The terminal belongs to the renderer, so log lines go to
//! `textrain.log` in the platform data directory.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TEXTRAIN_LOG=debug`.
pub const LOG_ENV: &str = "TEXTRAIN_LOG";

/// Path of the log file, if the platform has a data directory.
pub fn log_path() -> Option<PathBuf> {
    textrain_config::project_dirs().map(|dirs| dirs.data_local_dir().join("textrain.log"))
}

/// Install the global subscriber. Logging stays off when the file cannot be
/// opened.
pub fn init() {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(dir) = path.parent()
        && fs::create_dir_all(dir).is_err()
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
