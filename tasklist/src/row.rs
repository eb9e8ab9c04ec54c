//! One rendered task row.
//!
//! A row holds no state of its own. Its checkbox is read from the store's
//! completed set every time the row is built, and its gestures become
//! intents addressed to the store.

use crate::types::{Task, TaskAction, TaskId, TaskList};
use serde::Serialize;

/// The interactive view of one task
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    /// Task id
    pub id: TaskId,
    /// Text shown in the row
    pub description: String,
    /// Checkbox state, as recorded by the store
    pub checked: bool,
}

impl TaskRow {
    /// Builds the row for `task` from current store state
    #[must_use]
    pub fn mount(task: &Task, list: &TaskList) -> Self {
        Self {
            id: task.id,
            description: task.description.clone(),
            checked: list.is_complete(&task.id),
        }
    }

    /// The checkbox was clicked and now reads `checked`
    #[must_use]
    pub const fn on_toggle(&self, checked: bool) -> TaskAction {
        TaskAction::toggle(self.id, checked)
    }

    /// The delete button was clicked
    #[must_use]
    pub const fn on_delete_requested(&self) -> TaskAction {
        TaskAction::delete(self.id)
    }

    /// Whether the description renders struck through
    #[must_use]
    pub const fn strikethrough(&self) -> bool {
        self.checked
    }
}
