//! Create-experiment-log wizard: general → resources → review.

use std::future::Future;

use lab_client::experiment_logs::NewExperimentLog;
use lab_client::{ApiError, Created, LabClient};
use lab_core::drafts::{DraftExperimentLog, DraftExperimentLogPatch};
use lab_core::entities::{Batch, ExperimentLog, Method, Seedling, Technician};
use lab_core::enums::MethodType;
use lab_core::paging::ListRequest;
use tokio::task::JoinHandle;

use super::{Mount, ReviewStep, load_into, unknown_ids};
use crate::availability::{BatchUsage, batch_choices};
use crate::field::{FieldErrors, parse_date};
use crate::options::{Choice, OptionSlot};
use crate::step::Step;
use crate::submit::ListRoute;

// ---------------------------------------------------------------------------
// Step 1: general
// ---------------------------------------------------------------------------

/// Name, method and schedule.
#[derive(Debug)]
pub struct GeneralStep {
    pub methods: OptionSlot<Method>,
}

impl Default for GeneralStep {
    fn default() -> Self {
        Self {
            methods: OptionSlot::new("methods"),
        }
    }
}

impl Step for GeneralStep {
    type Draft = DraftExperimentLog;

    fn title(&self) -> &'static str {
        "General"
    }

    fn validate(&self, draft: &DraftExperimentLog) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.required("name", &draft.name);
        errors.required("methodId", &draft.method_id);
        if !draft.method_id.trim().is_empty() && self.methods.get(&draft.method_id).is_none() {
            errors.insert("methodId", "unknown method");
        }
        let start = errors.date("startDate", &draft.start_date);
        let end = errors.date("endDate", &draft.end_date);
        errors.date_after("endDate", start, end);
        errors
    }

    fn resolve(&self, draft: &DraftExperimentLog) -> Option<DraftExperimentLogPatch> {
        let method = self.methods.get(&draft.method_id)?;
        Some(DraftExperimentLogPatch {
            method_name: Some(method.name),
            method_type: Some(Some(method.method_type)),
            ..DraftExperimentLogPatch::default()
        })
    }
}

// ---------------------------------------------------------------------------
// Step 2: resources
// ---------------------------------------------------------------------------

/// Batch, sample count, parent seedling and technicians.
#[derive(Debug)]
pub struct ResourcesStep {
    pub batches: OptionSlot<Batch>,
    /// Existing logs, for batch availability.
    pub experiment_logs: OptionSlot<ExperimentLog>,
    pub seedlings: OptionSlot<Seedling>,
    pub technicians: OptionSlot<Technician>,
}

impl Default for ResourcesStep {
    fn default() -> Self {
        Self {
            batches: OptionSlot::new("batches"),
            experiment_logs: OptionSlot::new("experiment logs"),
            seedlings: OptionSlot::new("seedlings"),
            technicians: OptionSlot::new("technicians"),
        }
    }
}

impl ResourcesStep {
    /// Batches with the ones held by a live experiment log disabled.
    #[must_use]
    pub fn batch_choices(&self) -> Vec<Choice> {
        batch_choices(&self.batches.options(), &self.experiment_logs.options())
    }
}

impl Step for ResourcesStep {
    type Draft = DraftExperimentLog;

    fn title(&self) -> &'static str {
        "Resources"
    }

    fn validate(&self, draft: &DraftExperimentLog) -> FieldErrors {
        let mut errors = FieldErrors::new();

        errors.required("batchId", &draft.batch_id);
        if !draft.batch_id.trim().is_empty() {
            match self.batches.get(&draft.batch_id) {
                None => errors.insert("batchId", "unknown batch"),
                Some(batch) => {
                    let logs = self.experiment_logs.options();
                    if let Some(reason) = BatchUsage::new(&logs).unavailable_reason(batch.id) {
                        errors.insert("batchId", reason);
                    }
                }
            }
        }

        errors.positive_int("numberOfSamples", &draft.number_of_samples);

        let mother = draft.mother_seedling_id.trim();
        if mother.is_empty() {
            if draft.method_type == Some(MethodType::Sexual) {
                errors.insert("motherSeedlingId", "required for sexual propagation");
            }
        } else if self.seedlings.get(mother).is_none() {
            errors.insert("motherSeedlingId", "unknown seedling");
        }

        errors.non_empty("technicianIds", &draft.technician_ids);
        let unknown = unknown_ids(&draft.technician_ids, |id| {
            self.technicians.get(id).is_some()
        });
        if !unknown.is_empty() {
            errors.insert(
                "technicianIds",
                format!("unknown technician(s): {}", unknown.join(", ")),
            );
        }
        errors
    }

    fn resolve(&self, draft: &DraftExperimentLog) -> Option<DraftExperimentLogPatch> {
        Some(DraftExperimentLogPatch {
            batch_name: self.batches.get(&draft.batch_id).map(|b| b.name),
            mother_seedling_name: Some(
                self.seedlings
                    .get(&draft.mother_seedling_id)
                    .map(|s| s.local_name)
                    .unwrap_or_default(),
            ),
            ..DraftExperimentLogPatch::default()
        })
    }
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ExperimentLogStep {
    General(GeneralStep),
    Resources(ResourcesStep),
    Review(ReviewStep<DraftExperimentLog>),
}

impl Mount for ExperimentLogStep {
    type Draft = DraftExperimentLog;
    type Payload = NewExperimentLog;

    const ROUTE: ListRoute = ListRoute::ExperimentLogs;
    const TITLES: &'static [&'static str] = &["General", "Resources", "Review"];

    fn mount(route: usize) -> Self {
        match route {
            0 => Self::General(GeneralStep::default()),
            1 => Self::Resources(ResourcesStep::default()),
            _ => Self::Review(ReviewStep::default()),
        }
    }

    fn step(&self) -> &dyn Step<Draft = DraftExperimentLog> {
        match self {
            Self::General(step) => step,
            Self::Resources(step) => step,
            Self::Review(step) => step,
        }
    }

    fn load(&self, client: &LabClient, _draft: &DraftExperimentLog) -> Vec<JoinHandle<()>> {
        match self {
            Self::General(step) => vec![load_into(&step.methods, client, |c| async move {
                c.list_methods(&ListRequest::all()).await.map(|p| p.data)
            })],
            Self::Resources(step) => vec![
                load_into(&step.batches, client, |c| async move {
                    c.list_batches(&ListRequest::all()).await.map(|p| p.data)
                }),
                load_into(&step.experiment_logs, client, |c| async move {
                    c.list_experiment_logs(&ListRequest::all())
                        .await
                        .map(|p| p.data)
                }),
                load_into(&step.seedlings, client, |c| async move {
                    c.list_seedlings(&ListRequest::all()).await.map(|p| p.data)
                }),
                load_into(&step.technicians, client, |c| async move {
                    c.list_technicians(&ListRequest::all())
                        .await
                        .map(|p| p.data)
                }),
            ],
            Self::Review(_) => Vec::new(),
        }
    }

    fn banners(&self) -> Vec<String> {
        match self {
            Self::General(step) => step.methods.error().into_iter().collect(),
            Self::Resources(step) => [
                step.batches.error(),
                step.experiment_logs.error(),
                step.seedlings.error(),
                step.technicians.error(),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Self::Review(_) => Vec::new(),
        }
    }

    fn summary(draft: &DraftExperimentLog) -> Vec<(&'static str, String)> {
        vec![
            ("Name", draft.name.clone()),
            ("Method", draft.method_name.clone()),
            (
                "Method type",
                draft.method_type.map(|t| t.to_string()).unwrap_or_default(),
            ),
            ("Start date", draft.start_date.clone()),
            ("End date", draft.end_date.clone()),
            ("Batch", draft.batch_name.clone()),
            ("Samples", draft.number_of_samples.clone()),
            ("Mother seedling", draft.mother_seedling_name.clone()),
            ("Technicians", draft.technician_ids.join(", ")),
            ("Description", draft.description.clone()),
        ]
    }

    fn payload(draft: &DraftExperimentLog) -> Result<NewExperimentLog, FieldErrors> {
        let mut errors = FieldErrors::new();
        let method_id = parse_id(&mut errors, "methodId", &draft.method_id);
        let batch_id = parse_id(&mut errors, "batchId", &draft.batch_id);
        let samples = errors.positive_int("numberOfSamples", &draft.number_of_samples);
        let start = errors.date("startDate", &draft.start_date);
        let end = errors.date("endDate", &draft.end_date);

        match (method_id, batch_id, samples, start, end) {
            (Some(method_id), Some(batch_id), Some(samples), Some(start), Some(end))
                if errors.is_empty() =>
            {
                let mother = draft.mother_seedling_id.trim();
                Ok(NewExperimentLog {
                    name: draft.name.trim().to_string(),
                    description: draft.description.clone(),
                    method_id,
                    tissue_culture_batch_id: batch_id,
                    number_of_sample: samples,
                    hybridizations: if mother.is_empty() {
                        Vec::new()
                    } else {
                        vec![mother.to_string()]
                    },
                    technician_ids: draft.technician_ids.clone(),
                    start_date: start,
                    end_date: end,
                })
            }
            _ => Err(errors),
        }
    }

    fn create<'a>(
        client: &'a LabClient,
        payload: &'a NewExperimentLog,
    ) -> impl Future<Output = Result<Created, ApiError>> + Send + 'a {
        client.create_experiment_log(payload)
    }
}

fn parse_id(errors: &mut FieldErrors, field: &str, value: &str) -> Option<i64> {
    let parsed = value.trim().parse::<i64>().ok();
    if parsed.is_none() {
        errors.insert(field, "expected a numeric id");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::ExperimentLogWizard;
    use crate::submit::SubmitOutcome;
    use lab_core::drafts::Draft;
    use lab_core::enums::ExperimentLogStatus;
    use pretty_assertions::assert_eq;

    fn method() -> Method {
        Method {
            id: 3,
            name: "Lai tạo".into(),
            description: None,
            method_type: MethodType::Sexual,
        }
    }

    fn batch(id: i64) -> Batch {
        Batch {
            id,
            name: format!("Batch {id}"),
            description: None,
            lab_name: None,
        }
    }

    fn log(batch_id: i64, status: ExperimentLogStatus) -> ExperimentLog {
        ExperimentLog {
            id: format!("el-{batch_id}"),
            name: format!("Cross {batch_id}"),
            description: None,
            method_name: None,
            tissue_culture_batch_id: batch_id,
            tissue_culture_batch_name: None,
            status,
            number_of_sample: 4,
            start_date: None,
            end_date: None,
        }
    }

    fn general_patch() -> DraftExperimentLogPatch {
        DraftExperimentLogPatch {
            name: Some("Vanda cross".into()),
            method_id: Some("3".into()),
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-06-01".into()),
            ..DraftExperimentLogPatch::default()
        }
    }

    fn mounted_general(wizard: &ExperimentLogWizard) -> &GeneralStep {
        match wizard.mounted() {
            ExperimentLogStep::General(step) => step,
            other => panic!("expected general step, got {other:?}"),
        }
    }

    fn mounted_resources(wizard: &ExperimentLogWizard) -> &ResourcesStep {
        match wizard.mounted() {
            ExperimentLogStep::Resources(step) => step,
            other => panic!("expected resources step, got {other:?}"),
        }
    }

    fn load_resources(step: &ResourcesStep) {
        step.batches.apply(Ok(vec![batch(1), batch(2)]));
        step.experiment_logs.apply(Ok(vec![
            log(1, ExperimentLogStatus::InProcess),
            log(2, ExperimentLogStatus::Cancelled),
        ]));
        step.seedlings.apply(Ok(vec![Seedling {
            id: "s1".into(),
            local_name: "Vanda X".into(),
            scientific_name: None,
            mother_name: None,
            father_name: None,
            description: None,
            date_of_birth: None,
        }]));
        step.technicians.apply(Ok(vec![Technician {
            id: "t1".into(),
            name: "Lan".into(),
            email: None,
        }]));
    }

    /// Walk to the review step with a valid draft.
    fn at_review() -> ExperimentLogWizard {
        let mut wizard = ExperimentLogWizard::new();
        mounted_general(&wizard).methods.apply(Ok(vec![method()]));
        wizard.edit(general_patch());
        wizard.next().unwrap();
        load_resources(mounted_resources(&wizard));
        wizard.edit(DraftExperimentLogPatch {
            batch_id: Some("2".into()),
            number_of_samples: Some("12".into()),
            mother_seedling_id: Some("s1".into()),
            technician_ids: Some(vec!["t1".into()]),
            ..DraftExperimentLogPatch::default()
        });
        wizard.next().unwrap();
        wizard
    }

    #[test]
    fn empty_required_field_blocks_and_flags() {
        let mut wizard = ExperimentLogWizard::new();
        mounted_general(&wizard).methods.apply(Ok(vec![method()]));
        wizard.edit(DraftExperimentLogPatch {
            name: Some(String::new()),
            ..general_patch()
        });
        let err = wizard.next().unwrap_err();
        assert!(err.field_errors().unwrap().contains("name"));
        assert_eq!(wizard.route(), 0);
        assert_eq!(wizard.error_for("name"), Some("required"));
        assert_eq!(wizard.error_for("methodId"), None);
    }

    #[test]
    fn general_step_resolves_method_name_and_type() {
        let mut wizard = ExperimentLogWizard::new();
        mounted_general(&wizard).methods.apply(Ok(vec![method()]));
        wizard.edit(general_patch());
        wizard.next().unwrap();
        assert_eq!(wizard.draft().method_name, "Lai tạo");
        assert_eq!(wizard.draft().method_type, Some(MethodType::Sexual));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut wizard = ExperimentLogWizard::new();
        mounted_general(&wizard).methods.apply(Ok(vec![method()]));
        wizard.edit(DraftExperimentLogPatch {
            end_date: Some("2023-12-31".into()),
            ..general_patch()
        });
        assert!(wizard.next().is_err());
        assert!(wizard.error_for("endDate").is_some());
    }

    #[test]
    fn end_on_the_start_day_is_rejected() {
        let mut wizard = ExperimentLogWizard::new();
        mounted_general(&wizard).methods.apply(Ok(vec![method()]));
        wizard.edit(DraftExperimentLogPatch {
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-01".into()),
            ..general_patch()
        });
        assert!(wizard.next().is_err());
        assert_eq!(wizard.route(), 0);
        assert_eq!(wizard.error_for("endDate"), Some("must be after the start date"));
    }

    #[test]
    fn in_process_batch_cannot_be_picked() {
        let mut wizard = ExperimentLogWizard::new();
        mounted_general(&wizard).methods.apply(Ok(vec![method()]));
        wizard.edit(general_patch());
        wizard.next().unwrap();
        let step = mounted_resources(&wizard);
        load_resources(step);

        let choices = step.batch_choices();
        assert!(!choices[0].is_selectable());
        assert!(choices[1].is_selectable());

        wizard.edit(DraftExperimentLogPatch {
            batch_id: Some("1".into()),
            number_of_samples: Some("12".into()),
            mother_seedling_id: Some("s1".into()),
            technician_ids: Some(vec!["t1".into()]),
            ..DraftExperimentLogPatch::default()
        });
        assert!(wizard.next().is_err());
        assert_eq!(
            wizard.error_for("batchId"),
            Some("used by experiment log 'Cross 1' (in_process)")
        );
    }

    #[test]
    fn back_then_forward_keeps_values() {
        let mut wizard = at_review();
        let before = wizard.draft().clone();
        assert_eq!(wizard.back(), 1);
        assert_eq!(wizard.back(), 0);
        assert_eq!(wizard.draft(), &before);

        // Remounted steps reload their options.
        mounted_general(&wizard).methods.apply(Ok(vec![method()]));
        wizard.next().unwrap();
        load_resources(mounted_resources(&wizard));
        wizard.next().unwrap();
        assert_eq!(wizard.draft(), &before);
    }

    #[test]
    fn payload_coerces_ids_and_dates() {
        let mut wizard = at_review();
        let payload = wizard.prepare().unwrap();
        assert_eq!(payload.method_id, 3);
        assert_eq!(payload.tissue_culture_batch_id, 2);
        assert_eq!(payload.number_of_sample, 12);
        assert_eq!(payload.hybridizations, vec!["s1".to_string()]);
        assert_eq!(payload.start_date.to_string(), "2024-01-01");
        assert_eq!(wizard.draft().batch_name, "Batch 2");
        assert_eq!(wizard.draft().mother_seedling_name, "Vanda X");
    }

    #[test]
    fn success_resets_to_empty_draft() {
        let mut wizard = at_review();
        let outcome = wizard.finish(Ok(Created {
            id: Some("el-9".into()),
        }));
        assert!(outcome.is_created());
        assert!(wizard.draft().is_empty());
        assert_eq!(wizard.route(), 0);
        assert!(matches!(wizard.mounted(), ExperimentLogStep::General(_)));

        let fresh = ExperimentLogWizard::new();
        assert!(fresh.draft().is_empty());
    }

    #[test]
    fn failure_keeps_draft_for_retry() {
        let mut wizard = at_review();
        let before = wizard.draft().clone();
        let outcome = wizard.finish(Err(ApiError::Rejected {
            status: 400,
            message: "Batch is in use".into(),
        }));
        assert!(matches!(outcome, SubmitOutcome::Rejected { .. }));
        assert_eq!(wizard.draft(), &before);
        assert_eq!(wizard.route(), 2);
    }

    #[test]
    fn prepare_refuses_before_last_step() {
        let mut wizard = ExperimentLogWizard::new();
        assert!(matches!(wizard.prepare(), Err(SubmitOutcome::Invalid(_))));
    }
}
