//! Reducer logic for the task list.
//!
//! The task reducer validates intents, turns them into events and applies
//! them. The app reducer runs the form reducer and the task reducer side by
//! side, each scoped to its own slice of [`AppState`].

use crate::form::{CreationForm, CreationFormReducer, validate_description};
use crate::types::{AppState, CreateIntent, DeleteIntent, Task, TaskAction, TaskId, TaskList, ToggleIntent};
use std::sync::Arc;
use tasklist_core::{
    SmallVec,
    composition::{CombinedReducer, SharedReducer, combine_reducers, scope_reducer},
    effect::Effect,
    environment::IdGenerator,
    reducer::Reducer,
    smallvec,
};
use tasklist_runtime::{Store, StoreConfig};

/// Environment dependencies for the task reducers
#[derive(Clone)]
pub struct TaskEnvironment {
    /// Source of fresh task ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TaskEnvironment {
    /// Creates a new `TaskEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

impl std::fmt::Debug for TaskEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskEnvironment").finish_non_exhaustive()
    }
}

/// A change the task reducer decided to make
///
/// Only built from validated intents, so every task has a generated id and
/// a non-blank description.
#[derive(Clone, Debug, PartialEq, Eq)]
enum TaskEvent {
    Created(Task),
    CompletionChanged { id: TaskId, complete: bool },
    Deleted(TaskId),
}

/// Reducer for the task store
#[derive(Clone, Debug, Default)]
pub struct TaskListReducer;

impl TaskListReducer {
    /// Creates a new `TaskListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies an event to state
    fn apply_event(list: &mut TaskList, event: TaskEvent) {
        match event {
            TaskEvent::Created(task) => list.push(task),
            TaskEvent::CompletionChanged { id, complete } => list.set_completion(id, complete),
            TaskEvent::Deleted(id) => {
                if list.remove(&id).is_none() {
                    tracing::debug!(%id, "Delete of unknown task ignored");
                }
            },
        }
    }
}

impl Reducer for TaskListReducer {
    type State = TaskList;
    type Action = TaskAction;
    type Environment = TaskEnvironment;

    fn reduce(
        &self,
        list: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Intents ==========
            TaskAction::Create(CreateIntent { description }) => {
                let description = match validate_description(&description) {
                    Ok(description) => description,
                    Err(error) => {
                        let failed = TaskAction::ValidationFailed { error };
                        tracing::debug!(event = failed.event_type(), "Create rejected");
                        return smallvec![Effect::send(failed)];
                    },
                };

                let task = Task::new(TaskId::generate(env.ids.as_ref()), description);
                tracing::debug!(id = %task.id, "Task created");
                Self::apply_event(list, TaskEvent::Created(task));
                SmallVec::new()
            },

            TaskAction::Toggle(ToggleIntent { id, complete }) => {
                Self::apply_event(list, TaskEvent::CompletionChanged { id, complete });
                SmallVec::new()
            },

            TaskAction::Delete(DeleteIntent { id }) => {
                Self::apply_event(list, TaskEvent::Deleted(id));
                SmallVec::new()
            },

            // Handled by the form
            TaskAction::EditDescription { .. } | TaskAction::SubmitForm | TaskAction::ValidationFailed { .. } => {
                SmallVec::new()
            },
        }
    }
}

fn form_slice(state: &mut AppState) -> &mut CreationForm {
    &mut state.form
}

fn task_slice(state: &mut AppState) -> &mut TaskList {
    &mut state.tasks
}

/// The reducer for the whole page
pub type TaskAppReducer = CombinedReducer<AppState, TaskAction, TaskEnvironment>;

/// Store running [`TaskAppReducer`]
pub type TaskStore = Store<AppState, TaskAction, TaskEnvironment, TaskAppReducer>;

/// Builds the page reducer: form first, then tasks
#[must_use]
pub fn app_reducer() -> TaskAppReducer {
    let form: SharedReducer<AppState, TaskAction, TaskEnvironment> =
        Arc::new(scope_reducer(CreationFormReducer::new(), form_slice));
    let tasks: SharedReducer<AppState, TaskAction, TaskEnvironment> =
        Arc::new(scope_reducer(TaskListReducer::new(), task_slice));

    combine_reducers(vec![form, tasks])
}

/// Creates a store for a fresh, empty page session
#[must_use]
pub fn new_store(env: TaskEnvironment, config: StoreConfig) -> TaskStore {
    Store::with_config(AppState::new(), app_reducer(), env, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use tasklist_testing::{ReducerTest, assertions, test_ids};
    use uuid::Uuid;

    fn create_test_env() -> TaskEnvironment {
        TaskEnvironment::new(test_ids())
    }

    fn id(n: u128) -> TaskId {
        TaskId::from_uuid(Uuid::from_u128(n))
    }

    fn list_with(tasks: &[(u128, &str)], completed: &[u128]) -> TaskList {
        let mut list = TaskList::new();
        for (n, description) in tasks {
            list.push(Task::new(id(*n), *description));
        }
        for n in completed {
            list.set_completion(id(*n), true);
        }
        list
    }

    #[test]
    fn test_create_task_success() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(TaskList::new())
            .when_action(TaskAction::create("Buy milk"))
            .then_state(|list| {
                assert_eq!(list.total_count(), 1);
                let task = list.get(&id(1)).unwrap();
                assert_eq!(task.description, "Buy milk");
                assert!(!list.is_complete(&id(1)));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_create_allows_duplicate_descriptions() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(TaskList::new())
            .when_action(TaskAction::create("Buy milk"))
            .when_action(TaskAction::create("Buy milk"))
            .then_state(|list| {
                assert_eq!(list.total_count(), 2);
                assert_ne!(list.tasks()[0].id, list.tasks()[1].id);
            })
            .run();
    }

    #[test]
    fn test_create_empty_description() {
        for blank in ["", "   "] {
            ReducerTest::new(TaskListReducer::new())
                .with_env(create_test_env())
                .given_state(list_with(&[(7, "existing")], &[]))
                .when_action(TaskAction::create(blank))
                .then_state(|list| {
                    assert_eq!(list.total_count(), 1);
                    assert_eq!(list.tasks()[0].description, "existing");
                })
                .then_effects(|effects| {
                    assertions::assert_sends(
                        effects,
                        &[TaskAction::ValidationFailed {
                            error: ValidationError::DescriptionRequired,
                        }],
                    );
                })
                .run();
        }
    }

    #[test]
    fn test_toggle_is_idempotent() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(list_with(&[(1, "Buy milk")], &[]))
            .when_action(TaskAction::toggle(id(1), true))
            .when_action(TaskAction::toggle(id(1), true))
            .then_state(|list| {
                assert_eq!(list.completed_count(), 1);
                assert!(list.is_complete(&id(1)));
            })
            .run();
    }

    #[test]
    fn test_untoggle() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(list_with(&[(1, "Buy milk")], &[1]))
            .when_action(TaskAction::toggle(id(1), false))
            .when_action(TaskAction::toggle(id(1), false))
            .then_state(|list| {
                assert_eq!(list.completed_count(), 0);
                assert_eq!(list.total_count(), 1);
            })
            .run();
    }

    #[test]
    fn test_toggle_unknown_id_still_marks_it() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(TaskList::new())
            .when_action(TaskAction::toggle(id(42), true))
            .then_state(|list| {
                assert_eq!(list.total_count(), 0);
                assert_eq!(list.completed_count(), 1);
            })
            .run();
    }

    #[test]
    fn test_delete_completed_task() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(list_with(&[(1, "Buy milk"), (2, "Walk dog")], &[1, 2]))
            .when_action(TaskAction::delete(id(1)))
            .then_state(|list| {
                assert!(!list.exists(&id(1)));
                assert!(!list.is_complete(&id(1)));
                assert_eq!(list.total_count(), 1);
                assert_eq!(list.completed_count(), 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(list_with(&[(1, "Buy milk")], &[1]))
            .when_action(TaskAction::delete(id(99)))
            .then_state(|list| {
                assert_eq!(list.total_count(), 1);
                assert_eq!(list.completed_count(), 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_validation_failed_leaves_tasks_alone() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(list_with(&[(1, "Buy milk")], &[1]))
            .when_action(TaskAction::ValidationFailed {
                error: ValidationError::DescriptionRequired,
            })
            .then_state(|list| {
                assert_eq!(list.total_count(), 1);
                assert_eq!(list.completed_count(), 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_app_reducer_submit_feeds_create() {
        ReducerTest::new(app_reducer())
            .with_env(create_test_env())
            .given_state(AppState::new())
            .when_action(TaskAction::edit("Buy milk"))
            .when_action(TaskAction::SubmitForm)
            .then_state(|state| {
                // The create arrives as feedback, so nothing is stored yet
                assert_eq!(state.tasks.total_count(), 0);
                assert_eq!(state.form.draft(), "");
            })
            .then_effects(|effects| assertions::assert_sends(effects, &[TaskAction::create("Buy milk")]))
            .run();
    }

    #[test]
    fn test_app_reducer_routes_validation_failure_to_form() {
        ReducerTest::new(app_reducer())
            .with_env(create_test_env())
            .given_state(AppState::new())
            .when_action(TaskAction::ValidationFailed {
                error: ValidationError::DescriptionRequired,
            })
            .then_state(|state| {
                assert_eq!(state.form.error(), Some(&ValidationError::DescriptionRequired));
                assert!(state.tasks.is_empty());
            })
            .run();
    }
}
