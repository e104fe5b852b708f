//! Create-seedling wizard: identity → characteristics → summary.

use std::future::Future;

use lab_client::seedlings::{NewCharacteristic, NewSeedling, SeedlingAttributeRef};
use lab_client::{ApiError, Created, LabClient};
use lab_core::drafts::{Attribute, DraftSeedling, DraftSeedlingPatch};
use lab_core::entities::Seedling;
use lab_core::paging::ListRequest;
use tokio::task::JoinHandle;

use super::{Mount, ReviewStep, Session, load_into};
use crate::field::{FieldErrors, parse_number};
use crate::options::OptionSlot;
use crate::step::Step;
use crate::submit::ListRoute;

/// Names, parents and date of birth.
#[derive(Debug)]
pub struct IdentityStep {
    /// Candidate parents.
    pub seedlings: OptionSlot<Seedling>,
}

impl Default for IdentityStep {
    fn default() -> Self {
        Self {
            seedlings: OptionSlot::new("seedlings"),
        }
    }
}

impl IdentityStep {
    fn check_parent(&self, errors: &mut FieldErrors, field: &str, id: &str) {
        if !id.trim().is_empty() && self.seedlings.get(id).is_none() {
            errors.insert(field, "unknown seedling");
        }
    }
}

impl Step for IdentityStep {
    type Draft = DraftSeedling;

    fn title(&self) -> &'static str {
        "Identity"
    }

    fn validate(&self, draft: &DraftSeedling) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.required("localName", &draft.local_name);
        errors.required("scientificName", &draft.scientific_name);
        errors.date("dateOfBirth", &draft.date_of_birth);
        self.check_parent(&mut errors, "motherId", &draft.mother_id);
        self.check_parent(&mut errors, "fatherId", &draft.father_id);
        let (mother, father) = (draft.mother_id.trim(), draft.father_id.trim());
        if !mother.is_empty() && mother == father {
            errors.insert("fatherId", "must differ from the mother");
        }
        errors
    }
}

/// Free-form named characteristics.
#[derive(Debug, Default)]
pub struct CharacteristicsStep;

impl Step for CharacteristicsStep {
    type Draft = DraftSeedling;

    fn title(&self) -> &'static str {
        "Characteristics"
    }

    fn validate(&self, draft: &DraftSeedling) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for (i, characteristic) in draft.characteristics.iter().enumerate() {
            errors.required(
                &format!("characteristics[{i}].displayName"),
                &characteristic.display_name,
            );
            if !characteristic.numeric_value.trim().is_empty() {
                errors.number(
                    &format!("characteristics[{i}].numericValue"),
                    &characteristic.numeric_value,
                );
            }
        }
        errors
    }
}

#[derive(Debug)]
pub enum SeedlingStep {
    Identity(IdentityStep),
    Characteristics(CharacteristicsStep),
    Summary(ReviewStep<DraftSeedling>),
}

impl Mount for SeedlingStep {
    type Draft = DraftSeedling;
    type Payload = NewSeedling;

    const ROUTE: ListRoute = ListRoute::Seedlings;
    const TITLES: &'static [&'static str] = &["Identity", "Characteristics", "Summary"];

    fn mount(route: usize) -> Self {
        match route {
            0 => Self::Identity(IdentityStep::default()),
            1 => Self::Characteristics(CharacteristicsStep),
            _ => Self::Summary(ReviewStep::default()),
        }
    }

    fn step(&self) -> &dyn Step<Draft = DraftSeedling> {
        match self {
            Self::Identity(step) => step,
            Self::Characteristics(step) => step,
            Self::Summary(step) => step,
        }
    }

    fn load(&self, client: &LabClient, _draft: &DraftSeedling) -> Vec<JoinHandle<()>> {
        match self {
            Self::Identity(step) => vec![load_into(&step.seedlings, client, |c| async move {
                c.list_seedlings(&ListRequest::all()).await.map(|p| p.data)
            })],
            Self::Characteristics(_) | Self::Summary(_) => Vec::new(),
        }
    }

    fn banners(&self) -> Vec<String> {
        match self {
            Self::Identity(step) => step.seedlings.error().into_iter().collect(),
            Self::Characteristics(_) | Self::Summary(_) => Vec::new(),
        }
    }

    fn summary(draft: &DraftSeedling) -> Vec<(&'static str, String)> {
        let characteristics = draft
            .characteristics
            .iter()
            .map(|c| {
                let mut line = c.display_name.clone();
                if !c.numeric_value.is_empty() {
                    line.push_str(&format!(" = {}", c.numeric_value));
                }
                if !c.description.is_empty() {
                    line.push_str(&format!(": {}", c.description));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("; ");
        vec![
            ("Local name", draft.local_name.clone()),
            ("Scientific name", draft.scientific_name.clone()),
            ("Mother", draft.mother_id.clone()),
            ("Father", draft.father_id.clone()),
            ("Date of birth", draft.date_of_birth.clone()),
            ("Description", draft.description.clone()),
            ("Characteristics", characteristics),
        ]
    }

    fn payload(draft: &DraftSeedling) -> Result<NewSeedling, FieldErrors> {
        let mut errors = FieldErrors::new();
        let date_of_birth = errors.date("dateOfBirth", &draft.date_of_birth);

        let characteristics = draft
            .characteristics
            .iter()
            .map(|c| NewCharacteristic {
                seedling_attribute: SeedlingAttributeRef {
                    id: c.reference_element_id.trim().parse().ok(),
                    name: c.display_name.trim().to_string(),
                },
                value: parse_number(&c.numeric_value),
                description: c.description.clone(),
            })
            .collect();

        match date_of_birth {
            Some(date_of_birth) => Ok(NewSeedling {
                local_name: draft.local_name.trim().to_string(),
                scientific_name: draft.scientific_name.trim().to_string(),
                mother_id: non_blank(&draft.mother_id),
                father_id: non_blank(&draft.father_id),
                description: draft.description.clone(),
                date_of_birth,
                characteristics,
            }),
            None => Err(errors),
        }
    }

    fn create<'a>(
        client: &'a LabClient,
        payload: &'a NewSeedling,
    ) -> impl Future<Output = Result<Created, ApiError>> + Send + 'a {
        client.create_seedling(payload)
    }
}

fn non_blank(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

impl Session<SeedlingStep> {
    /// Append a characteristic; returns its index.
    pub fn add_characteristic(&mut self, name: &str, description: &str) -> usize {
        let mut characteristics = self.draft().characteristics.clone();
        characteristics.push(Attribute::named(name, description));
        let index = characteristics.len() - 1;
        self.write_characteristics(characteristics);
        index
    }

    pub fn set_characteristic_value(&mut self, index: usize, value: &str) -> bool {
        let mut characteristics = self.draft().characteristics.clone();
        let Some(characteristic) = characteristics.get_mut(index) else {
            return false;
        };
        characteristic.set_value(value);
        self.write_characteristics(characteristics);
        true
    }

    pub fn remove_characteristic(&mut self, index: usize) -> bool {
        let mut characteristics = self.draft().characteristics.clone();
        if index >= characteristics.len() {
            return false;
        }
        characteristics.remove(index);
        self.write_characteristics(characteristics);
        true
    }

    fn write_characteristics(&mut self, characteristics: Vec<Attribute>) {
        self.store_mut().write(DraftSeedlingPatch {
            characteristics: Some(characteristics),
            ..DraftSeedlingPatch::default()
        });
        self.refresh();
    }
}
