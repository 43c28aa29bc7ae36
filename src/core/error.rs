use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Entry at position {0} not found")]
    NotFound(usize),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Photo conversion failed: {0}")]
    PhotoConversion(String),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Lock error: {0}")]
    LockError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

pub type Result<T> = std::result::Result<T, NotesError>;

impl<T> From<std::sync::PoisonError<T>> for NotesError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

impl From<serde_json::Error> for NotesError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for NotesError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}
