//! Error types for schema loading and artifact generation.

use std::path::PathBuf;

/// Errors raised while loading a schema document.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema file does not exist.
    #[error("Error: File '{}' not found.", .0.display())]
    NotFound(PathBuf),

    /// The schema file exists but could not be read.
    #[error("Error: could not read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not valid JSON, or not shaped like a schema.
    #[error("Error: '{}' is not a valid JSON file.", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by a generator while producing its output files.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Writing an output file or directory failed.
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a JSON artifact failed.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The spreadsheet writer rejected the workbook.
    #[error("failed to build workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// A table has more columns than a worksheet can hold.
    #[error("table '{table}' has {count} columns, more than a worksheet holds")]
    TooManyColumns { table: String, count: usize },

    /// The generator configuration could not be loaded.
    #[error("invalid configuration '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }
}
