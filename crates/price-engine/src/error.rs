//! Error types for price-engine operations.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("Invalid day of year: {day} is not a date in {year}")]
    InvalidDayOfYear { day: u32, year: i32 },

    #[error("Empty input: no price records supplied")]
    EmptyInput,

    #[error("No numeric price: every record has a missing or non-numeric price")]
    NoNumericPrice,

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Model artifact error: {0}")]
    ModelArtifact(String),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PriceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PriceError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PriceError>;
