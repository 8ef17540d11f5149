use crate::validation::PinValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Id prefix '{0}' matches more than one item")]
    AmbiguousId(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0}")]
    InvalidPin(#[from] PinValidationError),

    #[error("Private Space is locked")]
    PrivateSpaceLocked,

    #[error("Invalid backup file: {0}")]
    InvalidBackup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    /// A well-formed request the application turned down, such as a wrong PIN.
    #[error("{0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, ShelfError>;
