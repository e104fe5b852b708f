//! Settling the single create call a wizard makes.

use std::fmt;

use lab_client::{ApiError, Created};
use lab_core::drafts::Draft;

use crate::field::FieldErrors;
use crate::step::Wizard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// Transient message shown to the user after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// List view a wizard returns to after creating an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRoute {
    ExperimentLogs,
    Tasks,
    Seedlings,
}

impl ListRoute {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::ExperimentLogs => "/experiment-logs",
            Self::Tasks => "/tasks",
            Self::Seedlings => "/seedlings",
        }
    }

    /// Entity name used in toasts.
    #[must_use]
    pub const fn entity(self) -> &'static str {
        match self {
            Self::ExperimentLogs => "Experiment log",
            Self::Tasks => "Task",
            Self::Seedlings => "Seedling",
        }
    }
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Created; the draft was reset and the user goes to `route`.
    Created {
        id: Option<String>,
        route: ListRoute,
        toast: Toast,
    },
    /// The backend refused the payload. Draft kept for correction.
    Rejected { toast: Toast },
    /// Transport or server failure. Draft kept; the user may retry.
    Failed { toast: Toast },
    /// The draft could not be turned into a payload. Nothing was sent.
    Invalid(FieldErrors),
}

impl SubmitOutcome {
    #[must_use]
    pub const fn toast(&self) -> Option<&Toast> {
        match self {
            Self::Created { toast, .. } | Self::Rejected { toast } | Self::Failed { toast } => {
                Some(toast)
            }
            Self::Invalid(_) => None,
        }
    }

    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Apply the result of the create call to the wizard.
///
/// Success resets the wizard (empty draft, first step). Any failure leaves
/// the draft exactly as the user left it.
pub fn settle<D: Draft>(
    wizard: &mut Wizard<D>,
    route: ListRoute,
    result: Result<Created, ApiError>,
) -> SubmitOutcome {
    let entity = route.entity();
    match result {
        Ok(created) => {
            tracing::info!(entity, id = ?created.id, "created");
            wizard.reset();
            SubmitOutcome::Created {
                id: created.id,
                route,
                toast: Toast::success(format!("{entity} created")),
            }
        }
        Err(ApiError::Rejected { message, .. }) => SubmitOutcome::Rejected {
            toast: Toast::error(message),
        },
        Err(error) => {
            tracing::warn!(entity, %error, "create failed");
            SubmitOutcome::Failed {
                toast: Toast::error(format!(
                    "Could not create {}. Please try again.",
                    entity.to_lowercase()
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_core::drafts::{DraftSeedling, DraftSeedlingPatch};
    use pretty_assertions::assert_eq;

    fn filled() -> Wizard<DraftSeedling> {
        let mut wizard = Wizard::new(3);
        wizard.store_mut().write(DraftSeedlingPatch {
            local_name: Some("Vanda X".into()),
            ..DraftSeedlingPatch::default()
        });
        wizard
    }

    #[test]
    fn success_resets_and_routes_to_list() {
        let mut wizard = filled();
        let outcome = settle(
            &mut wizard,
            ListRoute::Seedlings,
            Ok(Created {
                id: Some("s9".into()),
            }),
        );
        assert_eq!(
            outcome,
            SubmitOutcome::Created {
                id: Some("s9".into()),
                route: ListRoute::Seedlings,
                toast: Toast::success("Seedling created"),
            }
        );
        assert_eq!(wizard.draft(), &DraftSeedling::default());
    }

    #[test]
    fn rejection_shows_server_message_and_keeps_draft() {
        let mut wizard = filled();
        let outcome = settle(
            &mut wizard,
            ListRoute::Seedlings,
            Err(ApiError::Rejected {
                status: 400,
                message: "Tên cây con đã tồn tại".into(),
            }),
        );
        assert_eq!(outcome.toast().unwrap().message, "Tên cây con đã tồn tại");
        assert_eq!(outcome.toast().unwrap().level, ToastLevel::Error);
        assert_eq!(wizard.draft().local_name, "Vanda X");
    }

    #[test]
    fn transport_failure_is_generic_and_keeps_draft() {
        let mut wizard = filled();
        let outcome = settle(&mut wizard, ListRoute::Seedlings, Err(ApiError::Timeout));
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                toast: Toast::error("Could not create seedling. Please try again."),
            }
        );
        assert_eq!(wizard.draft().local_name, "Vanda X");
    }
}
