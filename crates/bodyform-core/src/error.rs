//! Error types for the Bodyform system.

use thiserror::Error;

use crate::types::ImageId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate geometry: model height {model_height} is too small to calibrate")]
    DegenerateGeometry { model_height: f64 },

    #[error("No analyses available to aggregate")]
    NoData,

    #[error("Image {0} has already been analyzed")]
    AlreadyAnalyzed(ImageId),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid subject identifier: {0}")]
    InvalidSubjectId(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
