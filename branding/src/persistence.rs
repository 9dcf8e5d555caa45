//! Session persistence
//!
//! A subset of [`BrandingState`] is written to a key-value medium after every
//! reducer step that changes it, and read back on startup. The auth token is
//! kept under its own key.

use crate::state::{BrandingState, TrackingPolicy};
use brandkit_api::{AuthToken, Brand, BrandKit, User};
use brandkit_core::storage::{KeyValueStore, StorageError};
use brandkit_core::{Effect, Reducer, SmallVec};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Key of the persisted state record
pub const STATE_KEY: &str = "branding-store";

/// Key of the persisted auth token
pub const TOKEN_KEY: &str = "auth_token";

/// Schema version of the persisted state record
pub const STATE_VERSION: u32 = 0;

/// The part of [`BrandingState`] that survives a reload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    /// Signed-in user
    pub user: Option<User>,
    /// Whether a session is established
    pub is_authenticated: bool,
    /// Brands owned by the user
    pub brands: Vec<Brand>,
    /// Brand being edited
    pub current_brand: Option<Brand>,
    /// Purchasable brand kits
    pub brand_kits: Vec<BrandKit>,
}

impl From<&BrandingState> for PersistedState {
    fn from(state: &BrandingState) -> Self {
        Self {
            user: state.user.clone(),
            is_authenticated: state.is_authenticated,
            brands: state.brands.clone(),
            current_brand: state.current_brand.clone(),
            brand_kits: state.brand_kits.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    version: u32,
}

/// Serialize the persisted subset of `state` into its stored form
///
/// # Errors
///
/// Returns [`StorageError::Serialization`] if encoding fails.
pub fn encode(state: &PersistedState) -> Result<String, StorageError> {
    serde_json::to_string(&Envelope {
        state,
        version: STATE_VERSION,
    })
    .map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parse a stored record
///
/// # Errors
///
/// Returns [`StorageError::Serialization`] if the record is corrupt or was
/// written with another schema version.
pub fn decode(raw: &str) -> Result<PersistedState, StorageError> {
    let envelope: Envelope<PersistedState> =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    if envelope.version != STATE_VERSION {
        return Err(StorageError::Serialization(format!(
            "unsupported state version {} (expected {STATE_VERSION})",
            envelope.version
        )));
    }
    Ok(envelope.state)
}

/// Write the persisted subset
///
/// # Errors
///
/// Returns [`StorageError`] if encoding or the write fails.
pub fn save_state(storage: &dyn KeyValueStore, state: &PersistedState) -> Result<(), StorageError> {
    storage.set(STATE_KEY, &encode(state)?)
}

/// Write or clear the token
///
/// # Errors
///
/// Returns [`StorageError`] if the write fails.
pub fn save_token(storage: &dyn KeyValueStore, token: Option<&AuthToken>) -> Result<(), StorageError> {
    match token {
        Some(token) => storage.set(TOKEN_KEY, token.as_str()),
        None => storage.remove(TOKEN_KEY),
    }
}

impl BrandingState {
    /// Restore a session from storage
    ///
    /// A missing record yields defaults. A corrupt record, an unsupported
    /// version or an unreadable medium is logged and also yields defaults.
    #[must_use]
    pub fn hydrate(storage: &dyn KeyValueStore, policy: TrackingPolicy) -> Self {
        let mut state = Self::with_policy(policy);

        match storage.get(STATE_KEY).and_then(|raw| raw.as_deref().map(decode).transpose()) {
            Ok(Some(persisted)) => {
                state.user = persisted.user;
                state.is_authenticated = persisted.is_authenticated;
                state.brands = persisted.brands;
                state.current_brand = persisted.current_brand;
                state.brand_kits = persisted.brand_kits;
            },
            Ok(None) => tracing::debug!("No persisted state, starting fresh"),
            Err(error) => tracing::warn!(%error, "Discarding persisted state"),
        }

        match storage.get(TOKEN_KEY) {
            Ok(token) => state.auth_token = token.filter(|t| !t.is_empty()).map(AuthToken::new),
            Err(error) => tracing::warn!(%error, "Could not read persisted token"),
        }

        tracing::info!(
            authenticated = state.is_authenticated,
            brands = state.brands.len(),
            "Hydrated branding state"
        );
        state
    }
}

/// Reducer middleware that persists state after each step
///
/// Writes happen synchronously inside the reducer step, so they are ordered
/// like the actions that caused them. A failed write is logged and the action
/// still applies.
#[derive(Clone)]
pub struct PersistingReducer<R> {
    inner: R,
    storage: Arc<dyn KeyValueStore>,
}

impl<R> PersistingReducer<R> {
    /// Wrap `inner`, persisting to `storage`
    #[must_use]
    pub fn new(inner: R, storage: Arc<dyn KeyValueStore>) -> Self {
        Self { inner, storage }
    }

    /// The persistence medium
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.storage
    }
}

impl<R> std::fmt::Debug for PersistingReducer<R>
where
    R: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistingReducer")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<R> Reducer for PersistingReducer<R>
where
    R: Reducer<State = BrandingState>,
{
    type State = BrandingState;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut BrandingState,
        action: R::Action,
        env: &R::Environment,
    ) -> SmallVec<[Effect<R::Action>; 4]> {
        let before = PersistedState::from(&*state);
        let token_before = state.auth_token.clone();

        let effects = self.inner.reduce(state, action, env);

        let after = PersistedState::from(&*state);
        if after != before {
            if let Err(error) = save_state(self.storage.as_ref(), &after) {
                tracing::error!(%error, "Failed to persist branding state");
                metrics::counter!("branding.persistence.failed").increment(1);
            }
        }

        if state.auth_token != token_before {
            if let Err(error) = save_token(self.storage.as_ref(), state.auth_token.as_ref()) {
                tracing::error!(%error, "Failed to persist auth token");
                metrics::counter!("branding.persistence.failed").increment(1);
            }
        }

        effects
    }
}

/// One JSON file per key under a directory
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`; the directory is created on first write
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert!(storage.get(TOKEN_KEY).unwrap().is_none());
        storage.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        storage.remove(TOKEN_KEY).unwrap();
        storage.remove(TOKEN_KEY).unwrap();
        assert!(storage.get(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn test_file_storage_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(matches!(
            storage.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.get(""), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_decode_rejects_other_versions() {
        let raw = r#"{"state":{"isAuthenticated":true},"version":3}"#;
        assert!(matches!(decode(raw), Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_encode_uses_envelope() {
        let persisted = PersistedState {
            is_authenticated: true,
            ..PersistedState::default()
        };
        let value: serde_json::Value = serde_json::from_str(&encode(&persisted).unwrap()).unwrap();

        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["isAuthenticated"], true);
        assert!(value["state"]["brandKits"].as_array().unwrap().is_empty());
        assert!(value["state"].get("generations").is_none());
    }
}
