//! What the page shows, derived from state on every read.

use crate::row::TaskRow;
use crate::types::AppState;
use serde::Serialize;
use std::fmt;

const INPUT_PLACEHOLDER: &str = "Add a new task";
const CREATED_HEADING: &str = "Created tasks";
const COMPLETED_HEADING: &str = "Completed";
const EMPTY_TITLE: &str = "You have no tasks yet";
const EMPTY_HINT: &str = "Create tasks and organize your to-do items";

/// Text of the completed counter badge
///
/// `"{completed} de {total}"` when there are tasks, otherwise the bare total.
///
/// ```
/// use tasklist::view::completed_label;
///
/// assert_eq!(completed_label(3, 1), "1 de 3");
/// assert_eq!(completed_label(0, 0), "0");
/// ```
#[must_use]
pub fn completed_label(total: usize, completed: usize) -> String {
    if total > 0 {
        format!("{completed} de {total}")
    } else {
        total.to_string()
    }
}

/// The creation form as shown
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormView {
    /// Input contents
    pub draft: String,
    /// Message shown under the input
    pub error: Option<String>,
}

impl FormView {
    /// Whether the input renders in its error style
    #[must_use]
    pub const fn invalid(&self) -> bool {
        self.error.is_some()
    }
}

/// The two counter badges
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// Number of tasks
    pub total: usize,
    /// Number of completed ids
    pub completed: usize,
}

impl Counters {
    /// Text of the created badge
    #[must_use]
    pub fn created_label(&self) -> String {
        self.total.to_string()
    }

    /// Text of the completed badge
    #[must_use]
    pub fn completed_label(&self) -> String {
        completed_label(self.total, self.completed)
    }
}

/// The list region
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ListView {
    /// No tasks: show the empty-state panel
    Empty,
    /// One row per task, in insertion order
    Rows(Vec<TaskRow>),
}

/// Everything on the page
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// Creation form
    pub form: FormView,
    /// Counter badges
    pub counters: Counters,
    /// Task list or empty state
    pub list: ListView,
}

impl PageView {
    /// Derives the page from current state
    #[must_use]
    pub fn from_state(state: &AppState) -> Self {
        let tasks = &state.tasks;
        let list = if tasks.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows(
                tasks
                    .tasks()
                    .iter()
                    .map(|task| TaskRow::mount(task, tasks))
                    .collect(),
            )
        };

        Self {
            form: FormView {
                draft: state.form.draft().to_string(),
                error: state.form.error().map(ToString::to_string),
            },
            counters: Counters {
                total: tasks.total_count(),
                completed: tasks.completed_count(),
            },
            list,
        }
    }

    /// Whether the empty-state panel is shown
    #[must_use]
    pub const fn is_empty_state(&self) -> bool {
        matches!(self.list, ListView::Empty)
    }

    /// Rows in display order (none in the empty state)
    #[must_use]
    pub fn rows(&self) -> &[TaskRow] {
        match &self.list {
            ListView::Empty => &[],
            ListView::Rows(rows) => rows,
        }
    }

    /// Row at 1-based `position`
    #[must_use]
    pub fn row(&self, position: usize) -> Option<&TaskRow> {
        position.checked_sub(1).and_then(|index| self.rows().get(index))
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = if self.form.draft.is_empty() {
            INPUT_PLACEHOLDER
        } else {
            self.form.draft.as_str()
        };
        let marker = if self.form.invalid() { '!' } else { ' ' };
        writeln!(f, "{marker}[ {input} ] (Create +)")?;
        if let Some(error) = &self.form.error {
            writeln!(f, "  {error}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{CREATED_HEADING} {}    {COMPLETED_HEADING} {}",
            self.counters.created_label(),
            self.counters.completed_label()
        )?;
        writeln!(f)?;

        match &self.list {
            ListView::Empty => {
                writeln!(f, "  {EMPTY_TITLE}")?;
                writeln!(f, "  {EMPTY_HINT}")
            },
            ListView::Rows(rows) => {
                for (index, row) in rows.iter().enumerate() {
                    let check = if row.checked { 'x' } else { ' ' };
                    if row.strikethrough() {
                        writeln!(f, "{:>3}. [{check}] ~~{}~~", index + 1, row.description)?;
                    } else {
                        writeln!(f, "{:>3}. [{check}] {}", index + 1, row.description)?;
                    }
                }
                Ok(())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::reducer::{TaskEnvironment, app_reducer};
    use crate::types::{TaskAction, TaskId};
    use tasklist_core::reducer::Reducer;
    use tasklist_testing::test_ids;
    use uuid::Uuid;

    fn state_after(actions: Vec<TaskAction>) -> AppState {
        let reducer = app_reducer();
        let env = TaskEnvironment::new(test_ids());
        let mut state = AppState::new();
        let mut queue: std::collections::VecDeque<_> = actions.into();
        while let Some(action) = queue.pop_front() {
            for effect in reducer.reduce(&mut state, action, &env) {
                queue.extend(effect.into_action());
            }
        }
        state
    }

    #[test]
    fn label_rule() {
        assert_eq!(completed_label(3, 1), "1 de 3");
        assert_eq!(completed_label(2, 0), "0 de 2");
        assert_eq!(completed_label(0, 0), "0");
    }

    #[test]
    fn empty_page() {
        let page = PageView::from_state(&AppState::new());

        assert!(page.is_empty_state());
        assert!(page.rows().is_empty());
        assert_eq!(page.counters.created_label(), "0");
        assert_eq!(page.counters.completed_label(), "0");

        let text = page.to_string();
        assert!(text.contains(EMPTY_TITLE));
        assert!(text.contains("Created tasks 0    Completed 0"));
    }

    #[test]
    fn rows_reflect_completion() {
        // Sequential ids: the first task gets 1
        let first = TaskId::from_uuid(Uuid::from_u128(1));
        let state = state_after(vec![
            TaskAction::create("Buy milk"),
            TaskAction::create("Walk dog"),
            TaskAction::toggle(first, true),
        ]);

        let page = PageView::from_state(&state);

        assert!(!page.is_empty_state());
        assert_eq!(page.rows().len(), 2);
        assert!(page.row(1).is_some_and(|row| row.checked));
        assert!(page.row(2).is_some_and(|row| !row.checked));
        assert!(page.row(0).is_none());
        assert!(page.row(3).is_none());
        assert_eq!(page.counters.completed_label(), "1 de 2");

        let text = page.to_string();
        assert!(text.contains("  1. [x] ~~Buy milk~~"));
        assert!(text.contains("  2. [ ] Walk dog"));
    }

    #[test]
    fn form_error_is_rendered() {
        let state = state_after(vec![TaskAction::SubmitForm]);
        let page = PageView::from_state(&state);

        assert!(page.form.invalid());
        assert_eq!(page.form.error.as_deref(), Some("Description is required"));
        assert!(page.to_string().contains(&ValidationError::DescriptionRequired.to_string()));
    }
}
