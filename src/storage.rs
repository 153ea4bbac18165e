use crate::constants::storage_key;
use kitty_core::error::PreferenceError;
use kitty_core::prefs::{PreferenceStore, Preferences};
use kitty_core::session::Identity;
use web_sys as web;

/// Preferences as JSON documents in `localStorage`, one key per identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage(&self) -> Result<web::Storage, PreferenceError> {
        web::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| PreferenceError::Storage("localStorage unavailable".to_string()))
    }
}

impl PreferenceStore for LocalStorageStore {
    fn load(&self, identity: &Identity) -> Result<Option<Preferences>, PreferenceError> {
        let raw = self
            .storage()?
            .get_item(&storage_key(identity.as_str()))
            .map_err(|e| PreferenceError::Storage(format!("{:?}", e)))?;
        raw.map(|json| Preferences::from_json(&json)).transpose()
    }

    fn save(&self, identity: &Identity, prefs: &Preferences) -> Result<(), PreferenceError> {
        self.storage()?
            .set_item(&storage_key(identity.as_str()), &prefs.to_json()?)
            .map_err(|e| PreferenceError::Storage(format!("{:?}", e)))
    }
}
