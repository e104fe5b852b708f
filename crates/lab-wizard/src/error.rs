use thiserror::Error;

use crate::field::FieldErrors;

#[derive(Debug, Error)]
pub enum WizardError {
    /// The current step failed validation; the wizard did not move.
    #[error("step '{step}' has {} invalid field(s)", .errors.len())]
    Invalid {
        step: &'static str,
        errors: FieldErrors,
    },

    /// `next` was called on the terminal step, which only submits.
    #[error("already on the last step; submit instead")]
    LastStep,
}

impl WizardError {
    /// Field errors of an `Invalid` error.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid { errors, .. } => Some(errors),
            Self::LastStep => None,
        }
    }
}
