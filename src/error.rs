use crate::config::error::ConfigError;
use crate::request::error::ValidationError;
use crate::transport::error::UpstreamError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservationsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrame(#[from] PolarsError),
}
