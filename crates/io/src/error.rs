//! Error types for janus-io.

use std::path::PathBuf;

use janus_panel::PanelError;

/// Error type for all fallible operations in the janus-io crate.
///
/// Covers missing files, malformed CSV input, bundle (de)serialisation and
/// panels that fail validation once loaded.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a CSV parse failure, including rows of the wrong length.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when a requested column is not in the file header.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a year cell is not an integer.
    #[error("invalid year '{value}' on line {line}")]
    InvalidYear {
        /// Raw cell contents.
        value: String,
        /// 1-based line number in the file, header included.
        line: u64,
    },

    /// Wraps a JSON encode or decode failure.
    #[error("json error: {reason}")]
    Json {
        /// Description of the underlying JSON failure.
        reason: String,
    },

    /// Returned when loaded data does not form a valid panel.
    #[error("invalid panel: {0}")]
    Panel(#[from] PanelError),

    /// Wraps an operating-system I/O failure.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json {
            reason: e.to_string(),
        }
    }
}

impl IoError {
    /// Maps an I/O error on `path`, turning `NotFound` into
    /// [`IoError::FileNotFound`].
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
