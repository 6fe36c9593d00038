// crates/collegeviz-core/src/error.rs

use std::path::PathBuf;

use polars::error::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{table} table is missing column '{column}'")]
    MissingColumn { table: &'static str, column: String },

    #[error("column '{column}' contains no numeric values")]
    NonNumericColumn { column: String },

    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),

    #[error("Configuration could not be parsed: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
