use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

/// Load-phase failures. Every variant is fatal to startup; schema problems
/// are not errors here but a degraded [`crate::LoadStatus`].
#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("No file matching '{base_name}' found in {}", .dir.display())]
    ReportNotFound { base_name: String, dir: PathBuf },

    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Report has no header row: {}", .0.display())]
    MissingHeader(PathBuf),

    #[error("{0}")]
    Other(String),
}
