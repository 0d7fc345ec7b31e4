use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Input must be a table containing an 'id' column")]
    MissingIdColumn,

    #[error("Dataset id in row {row} is null")]
    NullId { row: usize },

    #[error("Failed to read the 'id' column")]
    IdColumn(#[source] PolarsError),

    #[error("Could not parse date '{input}'")]
    InvalidDate { input: String },
}
