//! # Task List Core
//!
//! Core traits and types for the task list reducer architecture.
//!
//! Every user gesture becomes an action value, every state change happens
//! inside a reducer, and anything a reducer wants to happen afterwards is
//! returned as an effect description rather than performed directly.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature
//! - **Action**: All possible inputs to a reducer (intents and events)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Follow-up descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use tasklist_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
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
//! struct CounterReducer;
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
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! let _ = CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Reducer composition utilities (`combine_reducers`, `scope_reducer`)
pub mod composition;

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
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Follow-up descriptions returned by reducers
///
/// Effects are values, not execution. The runtime interprets them after the
/// reducer returns.
pub mod effect {
    /// Effect type - describes something to happen after a reduction
    ///
    /// Effects are NOT executed immediately. They are descriptions returned
    /// from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer
        ///
        /// The store processes it before the current `send` returns, so the
        /// follow-up is part of the same state snapshot.
        Send(Box<Action>),
    }

    impl<Action> Effect<Action> {
        /// Feed `action` back into the reducer
        #[must_use]
        pub fn send(action: Action) -> Self {
            Effect::Send(Box::new(action))
        }

        /// Returns true if this effect does nothing
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }

        /// The action this effect feeds back, if any
        #[must_use]
        pub fn into_action(self) -> Option<Action> {
            match self {
                Effect::None => None,
                Effect::Send(action) => Some(*action),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use std::sync::atomic::{AtomicU64, Ordering};
    use uuid::Uuid;

    /// `IdGenerator` trait - abstracts identifier generation for testability
    ///
    /// Implementations must never hand out the same id twice for the
    /// lifetime of the process.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasklist_core::environment::{IdGenerator, UuidIdGenerator};
    ///
    /// let ids = UuidIdGenerator;
    /// assert_ne!(ids.next_id(), ids.next_id());
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Generate a fresh identifier
        fn next_id(&self) -> Uuid;
    }

    /// Production id generator backed by random (v4) UUIDs
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidIdGenerator;

    impl IdGenerator for UuidIdGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }

    /// Predictable id generator
    ///
    /// Hands out `Uuid::from_u128(1)`, `Uuid::from_u128(2)`, ... in order.
    /// Used by tests and by sessions that want short, readable ids.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_core::environment::{IdGenerator, SequentialIdGenerator};
    /// use uuid::Uuid;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), Uuid::from_u128(1));
    /// assert_eq!(ids.next_id(), Uuid::from_u128(2));
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        issued: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first id is `1`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                issued: AtomicU64::new(0),
            }
        }

        /// Number of ids handed out so far
        #[must_use]
        pub fn issued(&self) -> u64 {
            self.issued.load(Ordering::SeqCst)
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            let next = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            Uuid::from_u128(u128::from(next))
        }
    }
}
