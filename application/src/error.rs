use std::io;
use std::path::PathBuf;
use thiserror::Error;

use domain::error::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unsupported image format: {message}")]
    UnsupportedFormat { message: String },

    #[error("No codec registered for {format}")]
    CodecMissing { format: String },

    #[error("I/O error on {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
