//! Shared components for CLI commands
//!
//! Logging setup, file reading/writing with contextual errors, and the
//! summary value every command reports back to `main`.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of a command, reported to the operator on success
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// File the command wrote
    pub output_path: PathBuf,
    /// Number of data rows in the output
    pub rows: usize,
    /// Wall-clock time spent
    pub duration: Duration,
}

/// Set up structured logging to stderr at the given level
pub fn setup_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("run_report_merger={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("logging initialized at level: {}", level);
}

/// Read an input file into memory
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.extension().and_then(|e| e.to_str()).is_none_or(|e| {
        !e.eq_ignore_ascii_case("csv") && !e.eq_ignore_ascii_case("html") && !e.eq_ignore_ascii_case("txt")
    }) {
        warn!("'{}' does not look like a CSV/HTML/text file", path.display());
    }

    std::fs::read(path)
        .map_err(|e| Error::io(format!("failed to read '{}'", path.display()), e))
}

/// Write the produced bytes under the destination directory, creating it if
/// necessary, and return the full output path
pub fn write_output(destination: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(destination).map_err(|e| {
        Error::io(
            format!("failed to create destination '{}'", destination.display()),
            e,
        )
    })?;

    let output_path = destination.join(file_name);
    std::fs::write(&output_path, bytes).map_err(|e| {
        Error::io(
            format!(
                "failed to write '{}' (is the file open elsewhere, or the folder restricted?)",
                output_path.display()
            ),
            e,
        )
    })?;

    debug!("wrote {} bytes to {}", bytes.len(), output_path.display());
    Ok(output_path)
}

/// Destination directory for report outputs: the given directory or the
/// current directory
pub fn resolve_destination(destination: Option<PathBuf>) -> PathBuf {
    destination.unwrap_or_else(|| PathBuf::from("."))
}

/// Destination directory for templates: the given directory, else the
/// operator's Downloads folder, else the current directory
pub fn resolve_template_destination(destination: Option<PathBuf>) -> PathBuf {
    destination
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
