use thiserror::Error;

use crate::selection::MAX_COMPARED;
use crate::wizard::WizardTransitionError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("missing required quote parameters: {fields:?}")]
    MissingRequiredParameters { fields: Vec<&'static str> },
    #[error("selection limit reached: at most {MAX_COMPARED} quotes can be compared")]
    SelectionLimitReached,
    #[error(transparent)]
    WizardTransition(#[from] WizardTransitionError),
}

impl DomainError {
    /// The message surfaced to API callers. Validation failures keep the
    /// exact wording clients already match on.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingRequiredParameters { .. } => "Missing required quote parameters",
            Self::SelectionLimitReached => "You can compare up to 3 quotes at a time",
            Self::WizardTransition(_) => "The request could not be processed",
        }
    }
}
