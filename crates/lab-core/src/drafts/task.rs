use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Attribute, draft};

draft! {
    /// Task being assembled by the create-task wizard.
    pub struct DraftTask, DraftTaskPatch {
        pub name: String,
        pub experiment_log_ref: String,
        pub stage_ref: String,
        pub sample_ref: String,
        pub description: String,
        pub start_date: String,
        pub end_date: String,
        pub is_daily: bool,
        pub attributes: Vec<Attribute>,
        pub assigned_technicians: Vec<String>,
    }
}
