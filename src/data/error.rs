use thiserror::Error;

/// Errors raised while loading or exporting record data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("expected a top-level JSON array")]
    NotAnArray,

    #[error("row {row} is not a JSON object")]
    RowNotObject { row: usize },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("no dataset loaded")]
    NoDataset,

    #[error("filtered result belongs to dataset #{result}, but dataset #{current} is loaded")]
    StaleResult { result: u64, current: u64 },
}

pub type Result<T> = std::result::Result<T, DataError>;
