//! Persisted key/value storage for cart state.
//!
//! Backends mirror the browser's `localStorage`: string keys, string values,
//! whole-value overwrites. The cart and the session id live under separate
//! well-known keys ([`StorageKeys`]).

pub mod file;
pub mod memory;
pub mod traits;

use std::io;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use traits::Storage;

/// Default key for the serialized cart lines.
pub const DEFAULT_CART_KEY: &str = "urithi_cart";

/// Default key for the session identifier.
pub const DEFAULT_SESSION_KEY: &str = "urithi_session_id";

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Key cannot be mapped onto the backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// A writer panicked while holding the lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Well-known keys under which cart state is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Key holding the JSON array of cart lines.
    pub cart: String,
    /// Key holding the session identifier.
    pub session: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            cart: DEFAULT_CART_KEY.to_string(),
            session: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}
