//! # Branding
//!
//! The generation store of the brandkit client: one state container holding
//! the session, brands, generation history and UI flags, driven by
//! [`BrandingAction`]s through [`BrandingReducer`].
//!
//! Generation commands validate their input, mark the request in flight and
//! call the API from an effect. The effect feeds back a completion or failure
//! event, which prepends the generation or sets the error and settles the
//! request.
//!
//! ## Example
//!
//! ```no_run
//! use branding::{BrandingAction, open_store};
//! use branding::persistence::FileStorage;
//! use branding::state::TrackingPolicy;
//! use brandkit_api::{ApiClient, ApiConfig};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), brandkit_runtime::StoreError> {
//! let store = open_store(
//!     Arc::new(ApiClient::new(ApiConfig::default())),
//!     Arc::new(FileStorage::new(".brandkit")),
//!     TrackingPolicy::PerRequest,
//! );
//!
//! store
//!     .send(BrandingAction::GenerateLogo {
//!         prompt: "blue tech logo".to_string(),
//!         style: Some("modern".to_string()),
//!     })
//!     .await?
//!     .wait()
//!     .await;
//!
//! let logos = store.state(|s| s.logos().count()).await;
//! println!("{logos} logos");
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod api;
pub mod config;
pub mod persistence;
pub mod reducer;
pub mod state;

pub use actions::{BrandingAction, Operation};
pub use api::BrandingApi;
pub use config::{BrandingConfig, ConfigError};
pub use persistence::{FileStorage, PersistedState, PersistingReducer};
pub use reducer::{BrandingEnvironment, BrandingReducer, DEFAULT_POLL_INTERVAL};
pub use state::{BrandingState, Favorites, GenerationTracker, RequestId, TrackingPolicy};

use brandkit_core::environment::SystemClock;
use brandkit_core::storage::KeyValueStore;
use brandkit_runtime::Store;
use std::sync::Arc;
use std::time::Duration;

/// The generation store: persisted branding state behind the runtime
pub type BrandingStore =
    Store<BrandingState, BrandingAction, BrandingEnvironment, PersistingReducer<BrandingReducer>>;

/// Build a store for one session, hydrated from `storage`
#[must_use]
pub fn open_store(
    api: Arc<dyn BrandingApi>,
    storage: Arc<dyn KeyValueStore>,
    policy: TrackingPolicy,
) -> BrandingStore {
    open_store_with_poll_interval(api, storage, policy, DEFAULT_POLL_INTERVAL)
}

/// [`open_store`] with a custom delay between status polls
#[must_use]
pub fn open_store_with_poll_interval(
    api: Arc<dyn BrandingApi>,
    storage: Arc<dyn KeyValueStore>,
    policy: TrackingPolicy,
    poll_interval: Duration,
) -> BrandingStore {
    let state = BrandingState::hydrate(storage.as_ref(), policy);
    let reducer = PersistingReducer::new(BrandingReducer::new(), storage);
    let environment =
        BrandingEnvironment::new(api, Arc::new(SystemClock)).with_poll_interval(poll_interval);
    Store::new(state, reducer, environment)
}
