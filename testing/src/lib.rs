//! # Task List Testing
//!
//! Testing utilities and helpers for the task list reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given/When/Then harness for reducers
//! - Property-based testing strategies
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_testing::{ReducerTest, assertions, test_ids};
//!
//! ReducerTest::new(TaskListReducer::new())
//!     .with_env(TaskEnvironment::new(test_ids()))
//!     .given_state(TaskList::new())
//!     .when_action(TaskAction::create("Buy milk"))
//!     .then_state(|list| assert_eq!(list.total_count(), 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


/// Mock implementations of Environment traits
pub mod mocks {
    pub use tasklist_core::environment::SequentialIdGenerator;

    use std::sync::Arc;
    use tasklist_core::environment::IdGenerator;

    /// A fresh sequential generator, shareable through an environment
    #[must_use]
    pub fn test_ids() -> Arc<dyn IdGenerator> {
        Arc::new(SequentialIdGenerator::new())
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a tracing subscriber that writes through the test harness
    ///
    /// Safe to call from every test; only the first call installs it.
    /// Honors `RUST_LOG`.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities
///
/// Strategies for the free text a user types into a form.
pub mod properties {
    use proptest::prelude::*;

    /// Text with at least one non-whitespace character
    pub fn non_blank_text() -> impl Strategy<Value = String> {
        "[ ]{0,2}[A-Za-z0-9][A-Za-z0-9 ,.!?-]{0,30}"
    }

    /// Text made only of whitespace (possibly empty)
    pub fn blank_text() -> impl Strategy<Value = String> {
        "[ \t\n]{0,8}"
    }
}

// Re-export commonly used items
pub use mocks::{SequentialIdGenerator, test_ids};
pub use reducer_test::{ReducerTest, assertions};
