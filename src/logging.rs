use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

pub const LOG_FILE_NAME: &str = "friends-renamer.log";

/// Where diagnostic logging ends up for this run
#[derive(Debug)]
pub enum LogTarget {
    File { path: PathBuf, file: File },
    /// The log file couldn't be opened; warnings go to stderr instead
    Stderr { path: PathBuf, error: io::Error },
}

/// `~/friends-renamer.log`, or the working directory without a home
pub fn default_log_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

/// Open (and truncate) the log file, falling back to stderr on failure
pub fn open_target(path: &Path) -> LogTarget {
    let opened = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path);

    match opened {
        Ok(file) => LogTarget::File {
            path: path.to_path_buf(),
            file,
        },
        Err(error) => LogTarget::Stderr {
            path: path.to_path_buf(),
            error,
        },
    }
}

/// Install the global subscriber for the chosen target
pub fn init(target: LogTarget) {
    match target {
        LogTarget::File { path, file } => {
            tracing_subscriber::fmt()
                .with_writer(std::sync::Arc::new(file))
                .with_ansi(false)
                .init();
            eprintln!("\x1b[36m📝 Logging to:\x1b[0m {}", path.display());
        }
        LogTarget::Stderr { path, error } => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_max_level(tracing::Level::WARN)
                .init();
            eprintln!(
                "\x1b[33m⚠️  Could not open {} ({}), logging warnings to stderr\x1b[0m",
                path.display(),
                error
            );
        }
    }
}
