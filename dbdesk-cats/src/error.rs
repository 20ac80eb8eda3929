/// Error handling for the cat store
use dbdesk_shared::{ConfigError, InputError};
use thiserror::Error;

/// Cat store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Unified cat store error type
#[derive(Debug, Error)]
pub enum StoreError {
    /// The server could not be reached or rejected an operation
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// User input was invalid
    #[error(transparent)]
    Input(#[from] InputError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}
