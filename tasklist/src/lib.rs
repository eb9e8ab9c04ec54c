//! Single-page task list built on the reducer architecture.
//!
//! One store owns every task and the set of completed ids. The creation form
//! validates its input before anything reaches the store, rows turn checkbox
//! and delete clicks into intents, and the page view (counters, rows, empty
//! state) is derived from a snapshot after each store revision.
//!
//! - Create, complete and delete tasks
//! - Form validation shown next to the input
//! - Counters: `"{completed} de {total}"`, or `"0"` with no tasks
//! - Testing with `ReducerTest`
//!
//! # Quick Start
//!
//! ```no_run
//! use tasklist::{TaskAction, TaskEnvironment, new_store};
//! use tasklist::view::PageView;
//! use tasklist_core::environment::UuidIdGenerator;
//! use tasklist_runtime::StoreConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = new_store(TaskEnvironment::new(Arc::new(UuidIdGenerator)), StoreConfig::default());
//!
//! // Type into the form and submit it
//! store.send(TaskAction::edit("Buy milk")).await?;
//! store.send(TaskAction::SubmitForm).await?;
//!
//! // Check the first row
//! let page = store.state(PageView::from_state).await;
//! if let Some(row) = page.row(1) {
//!     store.send(row.on_toggle(true)).await?;
//! }
//!
//! let page = store.state(PageView::from_state).await;
//! println!("Completed: {}", page.counters.completed_label());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod reducer;
pub mod row;
pub mod shell;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::{Config, IdStrategy};
pub use error::{ConfigError, ValidationError};
pub use form::{CreationForm, CreationFormReducer, FormPhase};
pub use reducer::{TaskAppReducer, TaskEnvironment, TaskListReducer, TaskStore, app_reducer, new_store};
pub use row::TaskRow;
pub use types::{AppState, CreateIntent, DeleteIntent, Task, TaskAction, TaskId, TaskList, ToggleIntent};
pub use view::{PageView, completed_label};
