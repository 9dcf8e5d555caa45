//! # Brandkit Core
//!
//! Core traits and types for the brandkit client.
//!
//! The client is organised around a single state container driven by a
//! reducer:
//!
//! - **State**: Everything the UI renders (session, brands, generations, flags)
//! - **Action**: All possible inputs (UI commands and results fed back by effects)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits (API, storage, clock)
//!
//! ## Example
//!
//! ```ignore
//! use brandkit_core::*;
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         state.count += 1;
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

pub use effect::Effect;
pub use reducer::Reducer;

/// Key-value persistence abstraction
pub mod storage;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for BrandingReducer {
    ///     type State = BrandingState;
    ///     type Action = BrandingAction;
    ///     type Environment = BrandingEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut BrandingState,
    ///         action: BrandingAction,
    ///         env: &BrandingEnvironment,
    ///     ) -> SmallVec<[Effect<BrandingAction>; 4]> {
    ///         match action {
    ///             BrandingAction::ClearError => {
    ///                 state.error = None;
    ///                 SmallVec::new()
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime. Most actions produce
        /// zero or one effect, so the inline capacity avoids allocation.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values, not execution.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Dispatch an action after a delay
        ///
        /// Drives status re-polling of pending generations.
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation producing an optional feedback action
        pub fn future<F>(fut: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Dispatch `action` once `duration` has elapsed
        #[must_use]
        pub fn delay(duration: Duration, action: Action) -> Self {
            Effect::Delay {
                duration,
                action: Box::new(action),
            }
        }

        /// Returns true for `Effect::None`
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use brandkit_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let _now = clock.now();
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum Ping {
        Ping,
    }

    #[test]
    fn test_effect_debug_formats_future_opaquely() {
        let effect: Effect<Ping> = Effect::future(async { Some(Ping::Ping) });
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }

    #[test]
    fn test_delay_boxes_action() {
        let effect = Effect::delay(Duration::from_millis(5), Ping::Ping);
        let rendered = format!("{effect:?}");
        assert!(rendered.contains("Effect::Delay"));
        assert!(rendered.contains("Ping"));
        assert!(matches!(
            effect,
            Effect::Delay { duration, ref action } if duration == Duration::from_millis(5) && **action == Ping::Ping
        ));
        assert!(Effect::<Ping>::None.is_none());
    }

    #[test]
    fn test_future_effect_resolves() {
        let effect: Effect<Ping> = Effect::future(async { Some(Ping::Ping) });
        let Effect::Future(fut) = effect else {
            unreachable!("constructed as a future");
        };
        let action = tokio_test::block_on(fut);
        assert_eq!(action, Some(Ping::Ping));
    }
}
