//! Unified error type for callers that set up a cart store.
//!
//! Cart operations themselves never fail: storage problems are logged and the
//! store keeps working from memory. Errors surface only while wiring things
//! together (loading configuration, creating a storage directory).

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the cart library.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend could not be created or accessed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
