//! # lab-wizard
//!
//! Multi-step create wizards for experiment logs, tasks, and seedlings.
//!
//! A wizard owns one [`FormStore`] holding the draft being built. Each step
//! validates the fields it owns before the wizard advances, resolves derived
//! fields (display names for selected ids), and loads its own option lists
//! when it is mounted. The last step assembles the backend payload, performs
//! one create call, and resets the store on success.
//!
//! ```text
//! step 1 ──next──▶ step 2 ──next──▶ step 3 ──submit──▶ list view
//!        ◀─back───        ◀─back───
//! ```

pub mod availability;
pub mod field;
pub mod flows;
pub mod options;
pub mod step;
pub mod store;
pub mod submit;

mod error;

pub use error::WizardError;
pub use field::FieldErrors;
pub use flows::{ExperimentLogWizard, Mount, SeedlingWizard, Session, TaskWizard};
pub use options::{Choice, LoadState, OptionIndex, OptionSlot};
pub use step::{Step, Wizard};
pub use store::FormStore;
pub use submit::{ListRoute, SubmitOutcome, Toast, ToastLevel};
