//! Experiment logs, their stages and samples.

use chrono::NaiveDate;
use lab_core::entities::{ExperimentLog, Sample, Stage};
use lab_core::paging::{ListRequest, Page};
use serde::Serialize;

use crate::{ApiError, Created, LabClient, segment};

pub const PATH: &str = "/api/experiment-logs";

/// Create payload for an experiment log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExperimentLog {
    pub name: String,
    pub description: String,
    pub method_id: i64,
    pub tissue_culture_batch_id: i64,
    pub number_of_sample: u32,
    /// Mother seedlings the run starts from.
    pub hybridizations: Vec<String>,
    pub technician_ids: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl LabClient {
    /// List experiment logs.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn list_experiment_logs(
        &self,
        request: &ListRequest,
    ) -> Result<Page<ExperimentLog>, ApiError> {
        self.list(PATH, request).await
    }

    /// Fetch one experiment log by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn get_experiment_log(&self, id: &str) -> Result<ExperimentLog, ApiError> {
        self.get(&format!("{PATH}/{}", segment(id))).await
    }

    /// Stages of the method an experiment log runs, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn list_stages(&self, experiment_log_id: &str) -> Result<Vec<Stage>, ApiError> {
        let mut stages: Vec<Stage> = self
            .get(&format!("{PATH}/{}/stages", segment(experiment_log_id)))
            .await?;
        stages.sort_by_key(|stage| stage.step);
        Ok(stages)
    }

    /// Samples produced within an experiment log.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails or the envelope cannot be parsed.
    pub async fn list_samples(&self, experiment_log_id: &str) -> Result<Vec<Sample>, ApiError> {
        self.get(&format!("{PATH}/{}/samples", segment(experiment_log_id)))
            .await
    }

    /// Create an experiment log.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend refuses the payload.
    pub async fn create_experiment_log(
        &self,
        payload: &NewExperimentLog,
    ) -> Result<Created, ApiError> {
        self.create(PATH, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn payload_serializes_camel_case_dates() {
        let payload = NewExperimentLog {
            name: "Cross".into(),
            description: String::new(),
            method_id: 3,
            tissue_culture_batch_id: 7,
            number_of_sample: 12,
            hybridizations: vec!["s1".into()],
            technician_ids: vec![],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["methodId"], 3);
        assert_eq!(json["tissueCultureBatchId"], 7);
        assert_eq!(json["numberOfSample"], 12);
        assert_eq!(json["startDate"], "2024-01-01");
        assert_eq!(json["technicianIds"], serde_json::json!([]));
    }
}
