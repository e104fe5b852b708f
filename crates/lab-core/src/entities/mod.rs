//! Entity structs for every resource the lab backend serves.
//!
//! Field names follow the backend's camelCase JSON. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema`.

mod batch;
mod element;
mod experiment_log;
mod method;
mod notification;
mod report;
mod seedling;
mod task;
mod technician;

pub use batch::Batch;
pub use element::Element;
pub use experiment_log::{ExperimentLog, Sample, Stage};
pub use method::Method;
pub use notification::Notification;
pub use report::{Disease, DiseaseAnalysis, Report};
pub use seedling::Seedling;
pub use task::Task;
pub use technician::Technician;

/// A record that can appear as an option in a form select.
///
/// `key` is the value the select submits (ids always travel as strings in
/// form state), `label` is what the user sees.
pub trait Selectable {
    fn key(&self) -> String;
    fn label(&self) -> String;
}
