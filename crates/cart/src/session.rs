//! Per-profile session identifiers.
//!
//! A session id correlates an anonymous cart with backend orders. It is
//! created lazily on first access, persisted under its own key, and never
//! changed afterwards. Clearing the cart does not touch it.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};

use urithi_core::SessionId;

use crate::storage::Storage;

/// Prefix of every generated session id.
pub const SESSION_PREFIX: &str = "sess_";

/// Length of the random suffix.
const RANDOM_SUFFIX_LEN: usize = 13;

/// Lazily created, persisted session identifier.
pub struct SessionIds {
    storage: Arc<dyn Storage>,
    key: String,
    /// Used only while storage is unusable, so the id stays stable for the
    /// lifetime of this process.
    fallback: Mutex<Option<SessionId>>,
}

impl SessionIds {
    /// Create a provider reading and writing `key` in `storage`.
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            fallback: Mutex::new(None),
        }
    }

    /// Return the persisted session id, creating and persisting one if absent.
    ///
    /// Repeated calls against the same storage return the same value. Once
    /// the storage is wiped, the next call creates a new id.
    pub fn get_or_create(&self) -> SessionId {
        match self.storage.get_item(&self.key) {
            Ok(Some(existing)) if !existing.is_empty() => return SessionId::new(existing),
            Ok(_) => {}
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read session id, using in-memory id");
                return self.fallback(None);
            }
        }

        let id = generate();
        if let Err(e) = self.storage.set_item(&self.key, id.as_str()) {
            warn!(key = %self.key, error = %e, "Failed to persist session id");
            return self.fallback(Some(id));
        }

        debug!(session_id = %id, "Created session id");
        id
    }

    fn fallback(&self, candidate: Option<SessionId>) -> SessionId {
        let Ok(mut slot) = self.fallback.lock() else {
            return candidate.unwrap_or_else(generate);
        };
        slot.get_or_insert_with(|| candidate.unwrap_or_else(generate))
            .clone()
    }
}

impl std::fmt::Debug for SessionIds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIds")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Generate a new id: `sess_<unix-millis>_<13 base36 chars>`.
#[must_use]
pub fn generate() -> SessionId {
    let mut rng = rand::rng();
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| std::char::from_digit(rng.random_range(0..36), 36).unwrap_or('0'))
        .collect();
    SessionId::new(format!(
        "{SESSION_PREFIX}{}_{suffix}",
        Utc::now().timestamp_millis()
    ))
}

/// Whether `id` has the shape produced by [`generate`].
#[must_use]
pub fn is_well_formed(id: &str) -> bool {
    let Some(rest) = id.strip_prefix(SESSION_PREFIX) else {
        return false;
    };
    let Some((millis, suffix)) = rest.split_once('_') else {
        return false;
    };
    !millis.is_empty()
        && millis.chars().all(|c| c.is_ascii_digit())
        && suffix.len() == RANDOM_SUFFIX_LEN
        && suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
}
