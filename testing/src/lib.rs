//! # Brandkit Testing
//!
//! Testing utilities for brandkit reducers and stores.
//!
//! This crate provides:
//! - Mock implementations of environment traits (`FixedClock`, `InMemoryStorage`)
//! - A given/when/then harness for reducers ([`ReducerTest`])
//! - Helpers that resolve effect trees without a running store
//!
//! ## Example
//!
//! ```ignore
//! use brandkit_testing::{InMemoryStorage, test_clock};
//! use brandkit_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_logo_flow() {
//!     let env = test_environment();
//!     let store = Store::new(BrandingState::default(), BrandingReducer::new(), env);
//!
//!     store
//!         .send(BrandingAction::GenerateLogo { prompt: "blue tech logo".into(), style: None })
//!         .await?
//!         .wait()
//!         .await;
//!
//!     let state = store.state(Clone::clone).await;
//!     assert_eq!(state.generations.len(), 1);
//! }
//! ```

use brandkit_core::environment::Clock;
use chrono::{DateTime, Utc};


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use brandkit_core::storage::{KeyValueStore, StorageError};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use brandkit_testing::mocks::FixedClock;
    /// use brandkit_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// In-memory key-value store
    ///
    /// Writes can be made to fail with [`InMemoryStorage::fail_writes`] to
    /// exercise error paths.
    #[derive(Debug, Default)]
    pub struct InMemoryStorage {
        entries: Mutex<HashMap<String, String>>,
        failing: AtomicBool,
    }

    impl InMemoryStorage {
        /// Empty storage
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Storage pre-populated with `entries`
        #[must_use]
        pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
        where
            K: Into<String>,
            V: Into<String>,
        {
            Self {
                entries: Mutex::new(
                    entries
                        .into_iter()
                        .map(|(k, v)| (k.into(), v.into()))
                        .collect(),
                ),
                failing: AtomicBool::new(false),
            }
        }

        /// Make subsequent `set`/`remove` calls fail (or succeed again)
        pub fn fail_writes(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// Copy of every stored entry
        #[must_use]
        pub fn snapshot(&self) -> HashMap<String, String> {
            self.entries
                .lock()
                .map(|entries| entries.clone())
                .unwrap_or_default()
        }

        fn check_writable(&self) -> Result<(), StorageError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("writes disabled".to_string()));
            }
            Ok(())
        }
    }

    impl KeyValueStore for InMemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            let entries = self
                .entries
                .lock()
                .map_err(|e| StorageError::Unavailable(e.to_string()))?;
            Ok(entries.get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.check_writable()?;
            let mut entries = self
                .entries
                .lock()
                .map_err(|e| StorageError::Unavailable(e.to_string()))?;
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.check_writable()?;
            let mut entries = self
                .entries
                .lock()
                .map_err(|e| StorageError::Unavailable(e.to_string()))?;
            entries.remove(key);
            Ok(())
        }
    }
}

/// Helpers for driving effects outside a store
pub mod helpers {
    use brandkit_core::effect::Effect;

    /// Resolve effects and collect the actions they feed back
    ///
    /// Futures are awaited one at a time in declaration order and delays
    /// resolve immediately. Useful for asserting what a reducer's effects
    /// would dispatch without spinning up a `Store`.
    pub async fn collect_feedback<A>(effects: impl IntoIterator<Item = Effect<A>>) -> Vec<A> {
        let mut actions = Vec::new();

        for effect in effects {
            match effect {
                Effect::None => {},
                Effect::Delay { action, .. } => actions.push(*action),
                Effect::Future(fut) => {
                    if let Some(action) = fut.await {
                        actions.push(action);
                    }
                },
            }
        }

        actions
    }
}

// Re-export commonly used items
pub use helpers::collect_feedback;
pub use mocks::{FixedClock, InMemoryStorage, test_clock};

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use brandkit_core::effect::Effect;
    use brandkit_core::storage::KeyValueStore;
    use std::time::Duration;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_in_memory_storage() {
        let storage = InMemoryStorage::with_entries([("auth_token", "abc")]);
        assert_eq!(storage.get("auth_token").unwrap().as_deref(), Some("abc"));

        storage.set("auth_token", "def").unwrap();
        assert_eq!(storage.get("auth_token").unwrap().as_deref(), Some("def"));

        storage.remove("auth_token").unwrap();
        storage.remove("auth_token").unwrap();
        assert!(storage.get("auth_token").unwrap().is_none());
    }

    #[test]
    fn test_in_memory_storage_failing_writes() {
        let storage = InMemoryStorage::new();
        storage.fail_writes(true);
        assert!(storage.set("k", "v").is_err());
        assert!(storage.remove("k").is_err());

        storage.fail_writes(false);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.snapshot().get("k").map(String::as_str), Some("v"));
    }

    #[tokio::test]
    async fn test_collect_feedback_preserves_order() {
        let effects = vec![
            Effect::future(async { Some(1) }),
            Effect::None,
            Effect::future(async { None }),
            Effect::delay(Duration::from_secs(60), 2),
            Effect::future(async { Some(3) }),
        ];

        assert_eq!(collect_feedback(effects).await, vec![1, 2, 3]);
    }
}
