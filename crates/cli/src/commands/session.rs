//! Session id command.

use tracing::info;

use urithi_cart::CartConfig;

use super::open_store;

/// Print the profile's session id, creating and persisting one if absent.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be opened.
pub fn show(config: &CartConfig) -> Result<(), urithi_cart::Error> {
    let store = open_store(config)?;
    info!("Session: {}", store.session_id());
    Ok(())
}
