use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CutPlanError>;

#[derive(Debug, Error)]
pub enum CutPlanError {
    #[error("Invalid input for material '{material}': {reason}")]
    InvalidInput { material: String, reason: String },

    #[error(
        "A required cut ({length} + kerf {kerf}) is longer than the stock length ({stock_length}) for material '{material}'"
    )]
    InfeasibleCut {
        material: String,
        length: f64,
        kerf: f64,
        stock_length: f64,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid CSV header: {0}")]
    CsvHeader(String),

    #[error("Invalid CSV row {row}: expected at least 2 columns, got {got}")]
    CsvRow { row: usize, got: usize },

    #[error("Invalid {field} at row {row}: {value}")]
    FieldParse {
        row: usize,
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for CutPlanError {
    fn from(err: toml::de::Error) -> Self {
        CutPlanError::Config(format!("TOML parse error: {}", err))
    }
}
