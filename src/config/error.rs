use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to find API key. Set the {variable} environment variable")]
    MissingCredential { variable: String },

    #[error("API key is empty")]
    EmptyCredential,

    #[error("API key cannot be used in an Authorization header")]
    InvalidCredential(#[source] InvalidHeaderValue),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}
