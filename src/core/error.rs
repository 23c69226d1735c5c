use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowError {
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Configuration error: identifier quote string is empty (key '{0}')")]
    ConfigurationError(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
}

pub type Result<T> = std::result::Result<T, RowError>;
