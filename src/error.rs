//! Centralized error handling for bsdfetch

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Everything that can abort a report.
///
/// Probes never recover from these: a host-fact report with a missing
/// core field is treated as worse than no report at all.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The host does not know this metric name
    #[error("{name}: no such host metric")]
    NotFound { name: String },

    /// The host refused the query
    #[error("{name}: permission denied")]
    PermissionDenied { name: String },

    /// Any other OS-level failure while querying `name`
    #[error("{name} failed: {source}")]
    Unavailable {
        name: String,
        #[source]
        source: io::Error,
    },

    /// A fixed-layout record came back with the wrong size
    #[error("{name}: expected {expected} bytes, got {actual}")]
    Decode {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}")]
    CommandFailed { command: String, status: ExitStatus },

    /// Password database lookup for the current uid failed
    #[error("getpwuid() failed: {source}")]
    Account {
        #[source]
        source: io::Error,
    },

    #[error("getloadavg() failed: got {got} of 3 samples")]
    ShortLoadAverage { got: usize },

    #[error("unsupported operating system: {sysname}")]
    UnsupportedOs { sysname: String },

    #[error("unable to open logo file {file} (searched {})", .searched.len())]
    LogoNotFound { file: String, searched: Vec<PathBuf> },

    #[error("config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    #[error("write to stdout failed: {source}")]
    Write {
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FetchError {
    /// Map a raw OS error from a named query onto the query taxonomy.
    pub fn from_os(name: impl Into<String>, err: io::Error) -> Self {
        let name = name.into();
        match err.raw_os_error() {
            Some(libc::ENOENT) => FetchError::NotFound { name },
            Some(libc::EPERM) | Some(libc::EACCES) => FetchError::PermissionDenied { name },
            _ => FetchError::Unavailable { name, source: err },
        }
    }

    /// True for the "this metric does not exist here" case
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}

/// Type alias for Results in bsdfetch
pub type Result<T> = std::result::Result<T, FetchError>;
