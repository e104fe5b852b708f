use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::draft;
use crate::enums::MethodType;

draft! {
    /// Experiment log being assembled by the create-experiment-log wizard.
    pub struct DraftExperimentLog, DraftExperimentLogPatch {
        pub name: String,
        pub method_id: String,
        /// Resolved from `method_id` when the general step is accepted.
        pub method_name: String,
        pub method_type: Option<MethodType>,
        pub batch_id: String,
        /// Resolved from `batch_id` when the resources step is accepted.
        pub batch_name: String,
        pub number_of_samples: String,
        pub mother_seedling_id: String,
        pub mother_seedling_name: String,
        pub technician_ids: Vec<String>,
        pub description: String,
        pub start_date: String,
        pub end_date: String,
    }
}
