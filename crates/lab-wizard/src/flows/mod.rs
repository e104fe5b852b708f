//! The three create wizards.
//!
//! Every flow is a [`Session`] over its own [`Mount`] type: an enum with one
//! variant per step, each variant owning that step's option slots. Moving to
//! another step replaces the mounted variant, which drops the old step's
//! slots and with them any fetch still in flight.

mod experiment_log;
mod seedling;
mod task;

pub use experiment_log::{ExperimentLogStep, GeneralStep, ResourcesStep};
pub use seedling::{CharacteristicsStep, IdentityStep, SeedlingStep};
pub use task::{AttributesStep, TaskGeneralStep, TaskStep, TechniciansStep};

use std::future::Future;

use lab_client::{ApiError, Created, LabClient};
use lab_core::drafts::Draft;
use lab_core::entities::Selectable;
use tokio::task::JoinHandle;

use crate::error::WizardError;
use crate::field::FieldErrors;
use crate::options::OptionSlot;
use crate::step::{Step, Wizard};
use crate::submit::{self, ListRoute, SubmitOutcome};

pub type ExperimentLogWizard = Session<ExperimentLogStep>;
pub type TaskWizard = Session<TaskStep>;
pub type SeedlingWizard = Session<SeedlingStep>;

/// The steps of one flow and how the flow talks to the backend.
pub trait Mount: Sized {
    type Draft: Draft;
    type Payload: Send + Sync;

    /// Where the user lands after a successful create.
    const ROUTE: ListRoute;

    /// Step titles, in order.
    const TITLES: &'static [&'static str];

    /// Fresh step for `route`, with its option slots in `Loading`.
    fn mount(route: usize) -> Self;

    fn step(&self) -> &dyn Step<Draft = Self::Draft>;

    /// Start the mounted step's option fetches.
    fn load(&self, client: &LabClient, draft: &Self::Draft) -> Vec<JoinHandle<()>>;

    /// Banners of the mounted step's option lists that failed to load.
    fn banners(&self) -> Vec<String>;

    /// Labelled values shown on the review step, as entered.
    fn summary(draft: &Self::Draft) -> Vec<(&'static str, String)>;

    /// Coerce the draft into the create payload.
    ///
    /// # Errors
    ///
    /// Field errors for values that do not parse.
    fn payload(draft: &Self::Draft) -> Result<Self::Payload, FieldErrors>;

    fn create<'a>(
        client: &'a LabClient,
        payload: &'a Self::Payload,
    ) -> impl Future<Output = Result<Created, ApiError>> + Send + 'a;
}

/// One wizard session: the draft, the route, and the mounted step.
pub struct Session<M: Mount> {
    wizard: Wizard<M::Draft>,
    mounted: M,
}

impl<M: Mount> Default for Session<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Mount> Session<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            wizard: Wizard::new(M::TITLES.len()),
            mounted: M::mount(0),
        }
    }

    #[must_use]
    pub const fn wizard(&self) -> &Wizard<M::Draft> {
        &self.wizard
    }

    #[must_use]
    pub const fn draft(&self) -> &M::Draft {
        self.wizard.draft()
    }

    #[must_use]
    pub const fn route(&self) -> usize {
        self.wizard.route()
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.mounted.step().title()
    }

    #[must_use]
    pub const fn mounted(&self) -> &M {
        &self.mounted
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.wizard.is_last()
    }

    /// Write user input into the draft. Inline errors of a touched step are
    /// recomputed.
    pub fn edit(&mut self, patch: <M::Draft as Draft>::Patch) {
        self.wizard.store_mut().write(patch);
        self.wizard.refresh(self.mounted.step());
    }

    /// Inline error for `field` on the current step.
    #[must_use]
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.wizard.error_for(self.route(), field)
    }

    /// Fetch the current step's options.
    pub fn load_options(&self, client: &LabClient) -> Vec<JoinHandle<()>> {
        self.mounted.load(client, self.wizard.draft())
    }

    #[must_use]
    pub fn banners(&self) -> Vec<String> {
        self.mounted.banners()
    }

    /// Validate the current step and move to the next one.
    ///
    /// # Errors
    ///
    /// See [`Wizard::next`]. On error nothing moves.
    pub fn next(&mut self) -> Result<usize, WizardError> {
        let route = self.wizard.next(self.mounted.step())?;
        self.mounted = M::mount(route);
        Ok(route)
    }

    /// Move to the previous step. The draft is kept.
    pub fn back(&mut self) -> usize {
        let before = self.route();
        let route = self.wizard.back();
        if route != before {
            self.mounted = M::mount(route);
        }
        route
    }

    #[must_use]
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        M::summary(self.wizard.draft())
    }

    /// Validate the terminal step and build the payload.
    ///
    /// # Errors
    ///
    /// [`SubmitOutcome::Invalid`] when the wizard is not on its last step,
    /// the step rejects the draft, or a value does not parse.
    pub fn prepare(&mut self) -> Result<M::Payload, SubmitOutcome> {
        if !self.wizard.is_last() {
            let mut errors = FieldErrors::new();
            errors.insert("step", "finish the remaining steps first");
            return Err(SubmitOutcome::Invalid(errors));
        }
        if let Err(error) = self.wizard.check(self.mounted.step()) {
            return Err(SubmitOutcome::Invalid(
                error.field_errors().cloned().unwrap_or_default(),
            ));
        }
        M::payload(self.wizard.draft()).map_err(SubmitOutcome::Invalid)
    }

    /// Send the one create call and settle it.
    pub async fn submit(&mut self, client: &LabClient) -> SubmitOutcome {
        let payload = match self.prepare() {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };
        let result = M::create(client, &payload).await;
        self.finish(result)
    }

    /// Settle a create result: reset and remount on success, keep
    /// everything otherwise.
    pub fn finish(&mut self, result: Result<Created, ApiError>) -> SubmitOutcome {
        let outcome = submit::settle(&mut self.wizard, M::ROUTE, result);
        if outcome.is_created() {
            self.mounted = M::mount(0);
        }
        outcome
    }

    pub(crate) const fn store_mut(&mut self) -> &mut crate::store::FormStore<M::Draft> {
        self.wizard.store_mut()
    }

    pub(crate) fn refresh(&mut self) {
        self.wizard.refresh(self.mounted.step());
    }
}

/// Review step shared by flows whose last step only shows the summary.
#[derive(Debug, Default)]
pub struct ReviewStep<D>(std::marker::PhantomData<D>);

impl<D: Draft> Step for ReviewStep<D> {
    type Draft = D;

    fn title(&self) -> &'static str {
        "Review"
    }

    fn validate(&self, _draft: &D) -> FieldErrors {
        FieldErrors::new()
    }
}

/// Ids of list-valued fields that are not known options.
fn unknown_ids<'a>(ids: &'a [String], known: impl Fn(&str) -> bool) -> Vec<&'a str> {
    ids.iter()
        .map(String::as_str)
        .filter(|id| !known(id))
        .collect()
}

/// Start `slot`'s fetch with a clone of the client.
fn load_into<T, F, Fut>(slot: &OptionSlot<T>, client: &LabClient, fetch: F) -> JoinHandle<()>
where
    T: Selectable + Clone + Send + 'static,
    F: FnOnce(LabClient) -> Fut,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + Send + 'static,
{
    slot.spawn_load(fetch(client.clone()))
}
