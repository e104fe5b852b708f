//! Create-task wizard: general → attributes → technicians.

use std::future::Future;

use lab_client::tasks::{NewAttribute, NewTask};
use lab_client::{ApiError, Created, LabClient};
use lab_core::drafts::{Attribute, DraftTask, DraftTaskPatch};
use lab_core::entities::{Element, ExperimentLog, Sample, Stage, Technician};
use lab_core::paging::ListRequest;
use tokio::task::JoinHandle;

use super::{Mount, Session, load_into, unknown_ids};
use crate::field::{FieldErrors, parse_number};
use crate::options::OptionSlot;
use crate::step::Step;
use crate::submit::ListRoute;

// ---------------------------------------------------------------------------
// Step 1: general
// ---------------------------------------------------------------------------

/// Experiment log, stage, sample and schedule.
#[derive(Debug)]
pub struct TaskGeneralStep {
    pub experiment_logs: OptionSlot<ExperimentLog>,
    /// Stages of the selected log. Loading until a log is chosen.
    pub stages: OptionSlot<Stage>,
    pub samples: OptionSlot<Sample>,
}

impl Default for TaskGeneralStep {
    fn default() -> Self {
        Self {
            experiment_logs: OptionSlot::new("experiment logs"),
            stages: OptionSlot::new("stages"),
            samples: OptionSlot::new("samples"),
        }
    }
}

impl TaskGeneralStep {
    fn load_log_children(&self, client: &LabClient, log_id: &str) -> Vec<JoinHandle<()>> {
        let stages_of = log_id.to_string();
        let samples_of = log_id.to_string();
        vec![
            load_into(&self.stages, client, |c| async move {
                c.list_stages(&stages_of).await
            }),
            load_into(&self.samples, client, |c| async move {
                c.list_samples(&samples_of).await
            }),
        ]
    }
}

impl Step for TaskGeneralStep {
    type Draft = DraftTask;

    fn title(&self) -> &'static str {
        "General"
    }

    fn validate(&self, draft: &DraftTask) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.required("name", &draft.name);

        errors.required("experimentLogRef", &draft.experiment_log_ref);
        if !draft.experiment_log_ref.trim().is_empty()
            && self.experiment_logs.get(&draft.experiment_log_ref).is_none()
        {
            errors.insert("experimentLogRef", "unknown experiment log");
        }

        errors.required("stageRef", &draft.stage_ref);
        if !draft.stage_ref.trim().is_empty() && self.stages.get(&draft.stage_ref).is_none() {
            errors.insert("stageRef", "not a stage of the selected experiment log");
        }

        if !draft.sample_ref.trim().is_empty() && self.samples.get(&draft.sample_ref).is_none() {
            errors.insert("sampleRef", "not a sample of the selected experiment log");
        }

        let start = errors.date("startDate", &draft.start_date);
        let end = errors.date("endDate", &draft.end_date);
        errors.date_order("endDate", start, end);
        errors
    }
}

// ---------------------------------------------------------------------------
// Step 2: attributes
// ---------------------------------------------------------------------------

/// Measured attributes, each tied to a reference element.
#[derive(Debug)]
pub struct AttributesStep {
    pub elements: OptionSlot<Element>,
}

impl Default for AttributesStep {
    fn default() -> Self {
        Self {
            elements: OptionSlot::new("elements"),
        }
    }
}

impl Step for AttributesStep {
    type Draft = DraftTask;

    fn title(&self) -> &'static str {
        "Attributes"
    }

    fn validate(&self, draft: &DraftTask) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for (i, attribute) in draft.attributes.iter().enumerate() {
            let element_field = format!("attributes[{i}].referenceElementId");
            errors.required(&element_field, &attribute.reference_element_id);
            if !attribute.reference_element_id.trim().is_empty()
                && self.elements.get(&attribute.reference_element_id).is_none()
            {
                errors.insert(element_field, "unknown element");
            }
            errors.number(
                &format!("attributes[{i}].numericValue"),
                &attribute.numeric_value,
            );
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Step 3: technicians
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct TechniciansStep {
    pub technicians: OptionSlot<Technician>,
}

impl Default for TechniciansStep {
    fn default() -> Self {
        Self {
            technicians: OptionSlot::new("technicians"),
        }
    }
}

impl Step for TechniciansStep {
    type Draft = DraftTask;

    fn title(&self) -> &'static str {
        "Technicians"
    }

    fn validate(&self, draft: &DraftTask) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.non_empty("assignedTechnicians", &draft.assigned_technicians);
        let unknown = unknown_ids(&draft.assigned_technicians, |id| {
            self.technicians.get(id).is_some()
        });
        if !unknown.is_empty() {
            errors.insert(
                "assignedTechnicians",
                format!("unknown technician(s): {}", unknown.join(", ")),
            );
        }
        errors
    }
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum TaskStep {
    General(TaskGeneralStep),
    Attributes(AttributesStep),
    Technicians(TechniciansStep),
}

impl Mount for TaskStep {
    type Draft = DraftTask;
    type Payload = NewTask;

    const ROUTE: ListRoute = ListRoute::Tasks;
    const TITLES: &'static [&'static str] = &["General", "Attributes", "Technicians"];

    fn mount(route: usize) -> Self {
        match route {
            0 => Self::General(TaskGeneralStep::default()),
            1 => Self::Attributes(AttributesStep::default()),
            _ => Self::Technicians(TechniciansStep::default()),
        }
    }

    fn step(&self) -> &dyn Step<Draft = DraftTask> {
        match self {
            Self::General(step) => step,
            Self::Attributes(step) => step,
            Self::Technicians(step) => step,
        }
    }

    fn load(&self, client: &LabClient, draft: &DraftTask) -> Vec<JoinHandle<()>> {
        match self {
            Self::General(step) => {
                let mut handles = vec![load_into(&step.experiment_logs, client, |c| async move {
                    c.list_experiment_logs(&ListRequest::all())
                        .await
                        .map(|p| p.data)
                })];
                let log_id = draft.experiment_log_ref.trim();
                if !log_id.is_empty() {
                    handles.extend(step.load_log_children(client, log_id));
                }
                handles
            }
            Self::Attributes(step) => vec![load_into(&step.elements, client, |c| async move {
                c.list_elements(&ListRequest::all()).await.map(|p| p.data)
            })],
            Self::Technicians(step) => {
                vec![load_into(&step.technicians, client, |c| async move {
                    c.list_technicians(&ListRequest::all())
                        .await
                        .map(|p| p.data)
                })]
            }
        }
    }

    fn banners(&self) -> Vec<String> {
        match self {
            Self::General(step) => [
                step.experiment_logs.error(),
                step.stages.error(),
                step.samples.error(),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Self::Attributes(step) => step.elements.error().into_iter().collect(),
            Self::Technicians(step) => step.technicians.error().into_iter().collect(),
        }
    }

    fn summary(draft: &DraftTask) -> Vec<(&'static str, String)> {
        let attributes = draft
            .attributes
            .iter()
            .map(|a| {
                format!("{} = {} {}", a.display_name, a.numeric_value, a.unit)
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("; ");
        vec![
            ("Name", draft.name.clone()),
            ("Experiment log", draft.experiment_log_ref.clone()),
            ("Stage", draft.stage_ref.clone()),
            ("Sample", draft.sample_ref.clone()),
            ("Start date", draft.start_date.clone()),
            ("End date", draft.end_date.clone()),
            ("Daily", if draft.is_daily { "yes" } else { "no" }.to_string()),
            ("Attributes", attributes),
            ("Technicians", draft.assigned_technicians.join(", ")),
            ("Description", draft.description.clone()),
        ]
    }

    fn payload(draft: &DraftTask) -> Result<NewTask, FieldErrors> {
        let mut errors = FieldErrors::new();
        let start = errors.date("startDate", &draft.start_date);
        let end = errors.date("endDate", &draft.end_date);

        let mut attributes = Vec::with_capacity(draft.attributes.len());
        for (i, attribute) in draft.attributes.iter().enumerate() {
            let element_id = attribute.reference_element_id.trim().parse::<i64>().ok();
            let value = parse_number(&attribute.numeric_value);
            match (element_id, value) {
                (Some(element_id), Some(value)) => attributes.push(NewAttribute {
                    element_id,
                    value,
                    description: attribute.description.clone(),
                }),
                (None, _) => errors.insert(
                    format!("attributes[{i}].referenceElementId"),
                    "expected a numeric id",
                ),
                (_, None) => {
                    errors.insert(format!("attributes[{i}].numericValue"), "must be a number");
                }
            }
        }

        match (start, end) {
            (Some(start_date), Some(end_date)) if errors.is_empty() => Ok(NewTask {
                name: draft.name.trim().to_string(),
                description: draft.description.clone(),
                experiment_log_id: draft.experiment_log_ref.trim().to_string(),
                stage_id: draft.stage_ref.trim().to_string(),
                sample_id: Some(draft.sample_ref.trim().to_string()).filter(|s| !s.is_empty()),
                start_date,
                end_date,
                is_daily: draft.is_daily,
                attributes,
                technician_ids: draft.assigned_technicians.clone(),
            }),
            _ => Err(errors),
        }
    }

    fn create<'a>(
        client: &'a LabClient,
        payload: &'a NewTask,
    ) -> impl Future<Output = Result<Created, ApiError>> + Send + 'a {
        client.create_task(payload)
    }
}

impl Session<TaskStep> {
    /// Pick the experiment log. A different log clears the stage and sample
    /// picked for the previous one and refetches both lists.
    pub fn choose_experiment_log(
        &mut self,
        log_id: &str,
        client: &LabClient,
    ) -> Vec<JoinHandle<()>> {
        let log_id = log_id.trim();
        if self.draft().experiment_log_ref != log_id {
            self.edit(DraftTaskPatch {
                experiment_log_ref: Some(log_id.to_string()),
                stage_ref: Some(String::new()),
                sample_ref: Some(String::new()),
                ..DraftTaskPatch::default()
            });
        }
        match self.mounted() {
            TaskStep::General(step) if !log_id.is_empty() => {
                step.stages.clear();
                step.samples.clear();
                step.load_log_children(client, log_id)
            }
            _ => Vec::new(),
        }
    }

    /// Append an empty attribute row; returns its index.
    pub fn add_attribute(&mut self) -> usize {
        self.update_attributes(|attributes| {
            attributes.push(Attribute::default());
            attributes.len() - 1
        })
    }

    /// Point attribute `index` at a loaded element, filling its read-only
    /// name and unit. Returns the element, or `None` when the attributes
    /// step is not mounted, the row does not exist, or the element is not
    /// among the loaded options.
    pub fn select_element(&mut self, index: usize, element_id: &str) -> Option<Element> {
        let element = match self.mounted() {
            TaskStep::Attributes(step) => step.elements.get(element_id)?,
            _ => return None,
        };
        if index >= self.draft().attributes.len() {
            return None;
        }
        self.update_attributes(|attributes| attributes[index].select_element(&element));
        Some(element)
    }

    /// Edit the measured value of attribute `index`.
    pub fn set_attribute_value(&mut self, index: usize, value: &str) -> bool {
        self.update_attributes(|attributes| match attributes.get_mut(index) {
            Some(attribute) => {
                attribute.set_value(value);
                true
            }
            None => false,
        })
    }

    pub fn set_attribute_description(&mut self, index: usize, description: &str) -> bool {
        self.update_attributes(|attributes| match attributes.get_mut(index) {
            Some(attribute) => {
                attribute.description = description.to_string();
                true
            }
            None => false,
        })
    }

    fn update_attributes<R>(&mut self, f: impl FnOnce(&mut Vec<Attribute>) -> R) -> R {
        let mut attributes = self.draft().attributes.clone();
        let result = f(&mut attributes);
        self.store_mut().write(DraftTaskPatch {
            attributes: Some(attributes),
            ..DraftTaskPatch::default()
        });
        self.refresh();
        result
    }
}
