//! Error types for the command line

use estimate_core::CalcError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Length, width and height must all be positive numbers")]
    IncompleteDimensions,

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
