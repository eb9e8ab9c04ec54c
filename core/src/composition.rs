//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on a field of a larger state
//!
//! A feature is usually built as a few small reducers, each scoped to the
//! slice of state it owns, then combined into the one reducer the store runs.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tasklist_core::composition::{combine_reducers, scope_reducer};
//! use tasklist_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct Counter {
//!     value: i32,
//! }
//!
//! #[derive(Default)]
//! struct AppState {
//!     left: Counter,
//!     right: Counter,
//! }
//!
//! #[derive(Clone)]
//! enum AppAction {
//!     Bump,
//! }
//!
//! struct BumpReducer;
//!
//! impl Reducer for BumpReducer {
//!     type State = Counter;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Counter, _action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
//!         state.value += 1;
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let app = combine_reducers(vec![
//!     Arc::new(scope_reducer(BumpReducer, |s: &mut AppState| &mut s.left)),
//!     Arc::new(scope_reducer(BumpReducer, |s: &mut AppState| &mut s.right)),
//! ]);
//!
//! let mut state = AppState::default();
//! let _ = app.reduce(&mut state, AppAction::Bump, &());
//! assert_eq!((state.left.value, state.right.value), (1, 1));
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::sync::Arc;

/// A shareable, type-erased reducer
pub type SharedReducer<S, A, E> = Arc<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and all effects are collected and concatenated
/// in reducer order.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<SharedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<SharedReducer<S, A, E>>,
}

impl<S, A, E> Clone for CombinedReducer<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            reducers: self.reducers.clone(),
        }
    }
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects.into_iter().filter(|effect| !effect.is_none()));
        }

        all_effects
    }
}

/// Scopes a reducer to operate on one field of a larger state.
///
/// `lens` borrows the child state out of the parent; the child reducer
/// mutates it in place.
pub fn scope_reducer<S, SubS, A, E, R>(reducer: R, lens: fn(&mut S) -> &mut SubS) -> ScopedReducer<S, SubS, R>
where
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer { reducer, lens }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, R> {
    reducer: R,
    lens: fn(&mut S) -> &mut SubS,
}

impl<S, SubS, R: Clone> Clone for ScopedReducer<S, SubS, R> {
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            lens: self.lens,
        }
    }
}

impl<S, SubS, R: std::fmt::Debug> std::fmt::Debug for ScopedReducer<S, SubS, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedReducer")
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, R>
where
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.reducer.reduce((self.lens)(state), action, env)
    }
}
