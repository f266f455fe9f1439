use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning score markup into chart records.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("No part found in score")]
    NoPartFound,

    #[error("Malformed score: {0}")]
    MalformedInput(String),
}

/// Rejected chart settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Columns per row must be between 4 and 8, got {0}")]
    ColumnsOutOfRange(u32),

    #[error("Start measure must be at least 1")]
    StartMeasureZero,

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Any failure of the end-to-end pipeline.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PDF output failed: {0}")]
    Pdf(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
