//! The step capability and the generic step-by-step wizard.

use lab_core::drafts::Draft;

use crate::error::WizardError;
use crate::field::FieldErrors;
use crate::store::FormStore;

/// One step of a wizard.
///
/// A step owns a subset of the draft's fields. It can veto advancing
/// (`validate`) and can derive fields from what the user picked (`resolve`),
/// e.g. copying a method's name next to its id.
pub trait Step {
    type Draft: Draft;

    fn title(&self) -> &'static str;

    /// Errors for the fields this step owns. Empty means the step may advance.
    fn validate(&self, draft: &Self::Draft) -> FieldErrors;

    /// Derived fields to write once the step is accepted.
    fn resolve(&self, _draft: &Self::Draft) -> Option<<Self::Draft as Draft>::Patch> {
        None
    }
}

/// Route pointer, touched flags and the draft store of one wizard session.
#[derive(Debug, Clone)]
pub struct Wizard<D: Draft> {
    store: FormStore<D>,
    route: usize,
    touched: Vec<bool>,
    errors: Vec<FieldErrors>,
}

impl<D: Draft> Wizard<D> {
    /// A wizard with `steps` steps, positioned on the first one.
    #[must_use]
    pub fn new(steps: usize) -> Self {
        let steps = steps.max(1);
        Self {
            store: FormStore::new(),
            route: 0,
            touched: vec![false; steps],
            errors: vec![FieldErrors::new(); steps],
        }
    }

    #[must_use]
    pub const fn store(&self) -> &FormStore<D> {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut FormStore<D> {
        &mut self.store
    }

    #[must_use]
    pub const fn draft(&self) -> &D {
        self.store.read()
    }

    /// Index of the current step.
    #[must_use]
    pub const fn route(&self) -> usize {
        self.route
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.touched.len()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.route + 1 == self.step_count()
    }

    /// Whether the user already tried to leave `step`.
    #[must_use]
    pub fn is_touched(&self, step: usize) -> bool {
        self.touched.get(step).copied().unwrap_or(false)
    }

    /// Validate the current step and advance.
    ///
    /// On failure the step is marked touched, the route and the draft stay
    /// as they are, and the errors are returned. On success the step's
    /// derived fields are written and the route moves forward.
    ///
    /// # Errors
    ///
    /// [`WizardError::Invalid`] when the step rejects the draft,
    /// [`WizardError::LastStep`] on the terminal step.
    pub fn next<S: Step<Draft = D> + ?Sized>(&mut self, step: &S) -> Result<usize, WizardError> {
        if self.is_last() {
            return Err(WizardError::LastStep);
        }
        self.check(step)?;
        if let Some(patch) = step.resolve(self.store.read()) {
            self.store.write(patch);
        }
        self.route += 1;
        tracing::debug!(route = self.route, from = step.title(), "wizard advanced");
        Ok(self.route)
    }

    /// Validate the current step without moving. Used by the terminal step
    /// before it submits.
    ///
    /// # Errors
    ///
    /// [`WizardError::Invalid`] when the step rejects the draft.
    pub fn check<S: Step<Draft = D> + ?Sized>(&mut self, step: &S) -> Result<(), WizardError> {
        let errors = step.validate(self.store.read());
        let route = self.route;
        if errors.is_empty() {
            self.errors[route] = FieldErrors::new();
            return Ok(());
        }
        self.touched[route] = true;
        self.errors[route] = errors.clone();
        Err(WizardError::Invalid {
            step: step.title(),
            errors,
        })
    }

    /// Go back one step. Never validates; the draft is untouched.
    pub fn back(&mut self) -> usize {
        self.route = self.route.saturating_sub(1);
        self.route
    }

    /// Recompute the current step's errors after an edit, once touched.
    pub fn refresh<S: Step<Draft = D> + ?Sized>(&mut self, step: &S) {
        let route = self.route;
        if self.touched[route] {
            self.errors[route] = step.validate(self.store.read());
        }
    }

    /// Inline error for `field` of `step`. Hidden until the step is touched.
    #[must_use]
    pub fn error_for(&self, step: usize, field: &str) -> Option<&str> {
        if !self.is_touched(step) {
            return None;
        }
        self.errors.get(step).and_then(|errors| errors.get(field))
    }

    /// Current errors of `step`, empty until touched.
    #[must_use]
    pub fn errors(&self, step: usize) -> Option<&FieldErrors> {
        if self.is_touched(step) {
            self.errors.get(step)
        } else {
            None
        }
    }

    /// Clear the draft and start over from the first step.
    pub fn reset(&mut self) {
        self.store.reset();
        self.route = 0;
        self.touched.fill(false);
        self.errors.fill(FieldErrors::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_core::drafts::{DraftSeedling, DraftSeedlingPatch};
    use pretty_assertions::assert_eq;

    struct NameStep;

    impl Step for NameStep {
        type Draft = DraftSeedling;

        fn title(&self) -> &'static str {
            "name"
        }

        fn validate(&self, draft: &DraftSeedling) -> FieldErrors {
            let mut errors = FieldErrors::new();
            errors.required("localName", &draft.local_name);
            errors
        }

        fn resolve(&self, draft: &DraftSeedling) -> Option<DraftSeedlingPatch> {
            Some(DraftSeedlingPatch {
                description: Some(format!("named {}", draft.local_name)),
                ..DraftSeedlingPatch::default()
            })
        }
    }

    #[test]
    fn errors_stay_hidden_until_touched() {
        let mut wizard = Wizard::<DraftSeedling>::new(2);
        assert_eq!(wizard.error_for(0, "localName"), None);

        let err = wizard.next(&NameStep).unwrap_err();
        assert!(err.field_errors().unwrap().contains("localName"));
        assert_eq!(wizard.route(), 0);
        assert!(wizard.is_touched(0));
        assert_eq!(wizard.error_for(0, "localName"), Some("required"));
    }

    #[test]
    fn refresh_clears_fixed_fields() {
        let mut wizard = Wizard::<DraftSeedling>::new(2);
        let _ = wizard.next(&NameStep);
        wizard.store_mut().write(DraftSeedlingPatch {
            local_name: Some("Vanda X".into()),
            ..DraftSeedlingPatch::default()
        });
        wizard.refresh(&NameStep);
        assert_eq!(wizard.error_for(0, "localName"), None);
    }

    #[test]
    fn next_applies_resolved_fields_and_back_keeps_them() {
        let mut wizard = Wizard::<DraftSeedling>::new(2);
        wizard.store_mut().write(DraftSeedlingPatch {
            local_name: Some("Vanda X".into()),
            ..DraftSeedlingPatch::default()
        });
        assert_eq!(wizard.next(&NameStep).unwrap(), 1);
        assert_eq!(wizard.draft().description, "named Vanda X");
        assert!(wizard.is_last());
        assert!(matches!(wizard.next(&NameStep), Err(WizardError::LastStep)));

        assert_eq!(wizard.back(), 0);
        assert_eq!(wizard.back(), 0);
        assert_eq!(wizard.draft().local_name, "Vanda X");
    }

    #[test]
    fn reset_returns_to_first_step_with_empty_draft() {
        let mut wizard = Wizard::<DraftSeedling>::new(3);
        let _ = wizard.next(&NameStep);
        wizard.store_mut().write(DraftSeedlingPatch {
            local_name: Some("x".into()),
            ..DraftSeedlingPatch::default()
        });
        wizard.next(&NameStep).unwrap();
        wizard.reset();
        assert_eq!(wizard.route(), 0);
        assert!(!wizard.is_touched(0));
        assert_eq!(wizard.draft(), &DraftSeedling::default());
    }
}
