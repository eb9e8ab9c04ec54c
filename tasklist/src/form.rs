//! The task creation form.
//!
//! Validation only surfaces on submit. Once an error is showing, every edit
//! re-validates so the message disappears as soon as the input is usable.

use crate::error::ValidationError;
use crate::reducer::TaskEnvironment;
use crate::types::{CreateIntent, TaskAction};
use serde::{Deserialize, Serialize};
use tasklist_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// Checks a description and returns it trimmed
///
/// # Errors
///
/// Returns [`ValidationError::DescriptionRequired`] when nothing but
/// whitespace is left.
pub fn validate_description(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }
    Ok(trimmed.to_string())
}

/// Where the form is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    /// No error displayed
    Idle,
    /// A validation message is shown next to the input
    ShowingError,
}

/// Input text plus the error currently displayed, if any
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationForm {
    draft: String,
    error: Option<ValidationError>,
}

impl CreationForm {
    /// An empty form with no error
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input text
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Error displayed next to the input
    #[must_use]
    pub const fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        if self.error.is_some() {
            FormPhase::ShowingError
        } else {
            FormPhase::Idle
        }
    }
}

/// Reducer for the creation form
///
/// A valid submit clears the form and feeds a [`TaskAction::Create`] back to
/// the store; the task reducer picks it up within the same `send`.
#[derive(Clone, Debug, Default)]
pub struct CreationFormReducer;

impl CreationFormReducer {
    /// Creates a new `CreationFormReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CreationFormReducer {
    type State = CreationForm;
    type Action = TaskAction;
    type Environment = TaskEnvironment;

    fn reduce(
        &self,
        form: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TaskAction::EditDescription { text } => {
                form.draft = text;
                if form.error.is_some() {
                    form.error = validate_description(&form.draft).err();
                }
                SmallVec::new()
            },

            TaskAction::SubmitForm => match validate_description(&form.draft) {
                Ok(description) => {
                    form.draft.clear();
                    form.error = None;
                    smallvec![Effect::send(TaskAction::Create(CreateIntent { description }))]
                },
                Err(error) => {
                    tracing::debug!(%error, "Form submit rejected");
                    form.error = Some(error);
                    SmallVec::new()
                },
            },

            TaskAction::ValidationFailed { error } => {
                form.error = Some(error);
                SmallVec::new()
            },

            TaskAction::Create(_) | TaskAction::Toggle(_) | TaskAction::Delete(_) => SmallVec::new(),
        }
    }
}
