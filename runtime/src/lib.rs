//! # Task List Runtime
//!
//! Runtime implementation for the task list reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, runs the reducer, drains feedback effects
//! - **Revision channel**: Tells the view layer when to re-render
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tasklist_core::reducer::Reducer;
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The store was closed and no longer accepts actions
        ///
        /// Returned by `send()` after `close()` ended the session.
        #[error("Store is closed")]
        Closed,

        /// A reducer kept feeding actions back past the configured limit
        ///
        /// State changes made before the limit was hit are kept and
        /// subscribers are still notified.
        #[error("Feedback limit of {0} actions exceeded")]
        FeedbackLimitExceeded(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use tasklist_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_actions(4);
/// assert_eq!(config.max_feedback_actions(), 4);
///
/// // The limit never drops below one
/// assert_eq!(StoreConfig::new(0).max_feedback_actions(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    max_feedback_actions: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    ///
    /// A limit of 0 is raised to 1.
    #[must_use]
    pub const fn new(max_feedback_actions: usize) -> Self {
        Self {
            max_feedback_actions: at_least_one(max_feedback_actions),
        }
    }

    /// Set the feedback limit (at least 1)
    #[must_use]
    pub const fn with_max_feedback_actions(mut self, max: usize) -> Self {
        self.max_feedback_actions = at_least_one(max);
        self
    }

    /// Maximum number of nested feedback actions processed for a single `send`
    ///
    /// Actions fed back directly by the sent action are not counted; only
    /// those fed back by other feedback actions are.
    #[must_use]
    pub const fn max_feedback_actions(&self) -> usize {
        self.max_feedback_actions
    }
}

const fn at_least_one(limit: usize) -> usize {
    if limit == 0 { 1 } else { limit }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_feedback_actions: 16,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Arc, AtomicBool, Ordering, Reducer, RwLock, StoreConfig, StoreError, watch};
    use tasklist_core::effect::Effect;
    use std::collections::VecDeque;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Feedback effects (drained before `send` returns)
    /// 5. A revision counter published after every `send`
    ///
    /// One `send` produces exactly one new revision, no matter how many
    /// feedback actions it triggered, so observers never see a half-applied
    /// intent.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        config: StoreConfig,
        closed: Arc<AtomicBool>,
        revision: Arc<watch::Sender<u64>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            let (revision, _) = watch::channel(0);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                config,
                closed: Arc::new(AtomicBool::new(false)),
                revision: Arc::new(revision),
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, then every action fed back through
        /// `Effect::Send` in FIFO order, all under one write lock. Publishes
        /// one new revision afterwards and returns it.
        ///
        /// Follow-ups of the sent action itself always run. Deeper follow-ups
        /// count against `max_feedback_actions`.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Closed`]: the store was closed
        /// - [`StoreError::FeedbackLimitExceeded`]: more than
        ///   `max_feedback_actions` nested follow-ups were produced
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<u64, StoreError> {
            if self.closed.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is closed");
                metrics::counter!("store.closed.rejected_actions").increment(1);
                return Err(StoreError::Closed);
            }

            tracing::debug!(?action, "Processing action");
            metrics::counter!("store.actions.total").increment(1);

            let outcome = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");
                self.drain(&mut *state, action)
            };

            let mut revision = 0;
            self.revision.send_modify(|current| {
                *current += 1;
                revision = *current;
            });
            tracing::debug!(revision, "Action processing completed");

            outcome.map(|()| revision)
        }

        fn drain(&self, state: &mut S, action: A) -> Result<(), StoreError> {
            let limit = self.config.max_feedback_actions;
            let mut queue = VecDeque::from([(action, 0_usize)]);
            let mut feedback = 0_usize;

            while let Some((action, depth)) = queue.pop_front() {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds").record(start.elapsed().as_secs_f64());

                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                for next in effects.into_iter().filter_map(Effect::into_action) {
                    if depth > 0 {
                        feedback += 1;
                        if feedback > limit {
                            tracing::error!(limit, "Feedback limit exceeded, dropping remaining actions");
                            return Err(StoreError::FeedbackLimitExceeded(limit));
                        }
                    }
                    tracing::trace!(action = ?next, depth, "Queueing feedback action");
                    metrics::counter!("store.feedback.total").increment(1);
                    queue.push_back((next, depth + 1));
                }
            }

            Ok(())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.tasks.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to revision changes
        ///
        /// The receiver sees the latest revision number; every successful
        /// `send` bumps it by one. View layers re-render when it changes.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<u64> {
            self.revision.subscribe()
        }

        /// The most recently published revision
        #[must_use]
        pub fn revision(&self) -> u64 {
            *self.revision.borrow()
        }

        /// Close the store, ending its session
        ///
        /// Later calls to `send` fail with [`StoreError::Closed`]. State
        /// stays readable.
        pub fn close(&self) {
            if !self.closed.swap(true, Ordering::AcqRel) {
                tracing::info!("Store closed");
            }
        }

        /// Returns true once `close` was called
        #[must_use]
        pub fn is_closed(&self) -> bool {
            self.closed.load(Ordering::Acquire)
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                config: self.config.clone(),
                closed: Arc::clone(&self.closed),
                revision: Arc::clone(&self.revision),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
