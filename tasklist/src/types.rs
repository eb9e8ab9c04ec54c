//! Domain types for the task list.
//!
//! A task is an id plus a description and never changes after creation.
//! Completion is not a field on the task: the list keeps the set of completed
//! ids next to the ordered tasks, so toggling never touches a task and
//! deleting a task clears its completion in the same step.

use crate::error::ValidationError;
use crate::form::CreationForm;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tasklist_core::environment::IdGenerator;
use tasklist_macros::Action;
use uuid::Uuid;

/// Unique identifier for a task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Draws a fresh id from `ids`
    #[must_use]
    pub fn generate(ids: &dyn IdGenerator) -> Self {
        Self(ids.next_id())
    }

    /// Creates a `TaskId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A single task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// What needs doing
    pub description: String,
}

impl Task {
    /// Creates a new task
    #[must_use]
    pub fn new(id: TaskId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}

/// The tasks of one session plus which of them are complete
///
/// Tasks keep insertion order. Mutation goes through the reducer; this type
/// only exposes reads publicly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    tasks: Vec<Task>,
    completed: BTreeSet<TaskId>,
}

impl TaskList {
    /// Creates an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All tasks in insertion order
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns a task by ID
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == *id)
    }

    /// Checks if a task exists
    #[must_use]
    pub fn exists(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Whether `id` is marked complete
    #[must_use]
    pub fn is_complete(&self, id: &TaskId) -> bool {
        self.completed.contains(id)
    }

    /// Number of tasks
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of ids marked complete
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Returns true when there are no tasks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(crate) fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub(crate) fn set_completion(&mut self, id: TaskId, complete: bool) {
        if complete {
            self.completed.insert(id);
        } else {
            self.completed.remove(&id);
        }
    }

    /// Drops the task and its completion mark together
    pub(crate) fn remove(&mut self, id: &TaskId) -> Option<Task> {
        self.completed.remove(id);
        let index = self.tasks.iter().position(|task| task.id == *id)?;
        Some(self.tasks.remove(index))
    }
}

/// Request to create a task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIntent {
    /// Text typed by the user
    pub description: String,
}

/// Request to mark a task complete or not
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleIntent {
    /// Task to toggle
    pub id: TaskId,
    /// New checkbox state
    pub complete: bool,
}

/// Request to delete a task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteIntent {
    /// Task to delete
    pub id: TaskId,
}

/// Everything that can happen to the page
///
/// Intents come from user gestures. The only event is a rejected
/// description, which the task reducer feeds back to the form. Changes to
/// the task list itself are private to the task reducer.
#[derive(Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TaskAction {
    // ========== Intents ==========
    /// The user changed the text in the form input
    #[intent]
    EditDescription {
        /// Full current input text
        text: String,
    },

    /// The user submitted the form
    #[intent]
    SubmitForm,

    /// Create a task
    #[intent]
    Create(CreateIntent),

    /// Change a task's completion
    #[intent]
    Toggle(ToggleIntent),

    /// Delete a task
    #[intent]
    Delete(DeleteIntent),

    // ========== Events ==========
    /// A description was rejected
    #[event]
    ValidationFailed {
        /// Why
        error: ValidationError,
    },
}

impl TaskAction {
    /// Shorthand for [`TaskAction::Create`]
    #[must_use]
    pub fn create(description: impl Into<String>) -> Self {
        Self::Create(CreateIntent {
            description: description.into(),
        })
    }

    /// Shorthand for [`TaskAction::Toggle`]
    #[must_use]
    pub const fn toggle(id: TaskId, complete: bool) -> Self {
        Self::Toggle(ToggleIntent { id, complete })
    }

    /// Shorthand for [`TaskAction::Delete`]
    #[must_use]
    pub const fn delete(id: TaskId) -> Self {
        Self::Delete(DeleteIntent { id })
    }

    /// Shorthand for [`TaskAction::EditDescription`]
    #[must_use]
    pub fn edit(text: impl Into<String>) -> Self {
        Self::EditDescription { text: text.into() }
    }
}

/// State of the whole page
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// The creation form
    pub form: CreationForm,
    /// The task store
    pub tasks: TaskList,
}

impl AppState {
    /// Creates an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
