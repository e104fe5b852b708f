//! The draft record shared by every step of one wizard.

use lab_core::drafts::Draft;

/// Holds one mutable draft for the lifetime of a wizard.
///
/// The store is owned by the wizard that created it and handed to steps by
/// reference; two wizards never share a store, and dropping the wizard
/// drops the draft.
#[derive(Debug, Clone, Default)]
pub struct FormStore<D: Draft> {
    draft: D,
}

impl<D: Draft> FormStore<D> {
    /// A store holding the empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self { draft: D::default() }
    }

    /// Current draft.
    #[must_use]
    pub const fn read(&self) -> &D {
        &self.draft
    }

    /// Merge a partial update. No validation happens here.
    pub fn write(&mut self, patch: D::Patch) {
        self.draft.merge(patch);
    }

    /// Restore the empty draft.
    pub fn reset(&mut self) {
        self.draft = D::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_core::drafts::{DraftTask, DraftTaskPatch};
    use pretty_assertions::assert_eq;

    #[test]
    fn write_merges_and_reset_empties() {
        let mut store = FormStore::<DraftTask>::new();
        assert!(store.read().is_empty());

        store.write(DraftTaskPatch {
            name: Some("Measure".into()),
            is_daily: Some(true),
            ..DraftTaskPatch::default()
        });
        store.write(DraftTaskPatch {
            description: Some("weekly".into()),
            ..DraftTaskPatch::default()
        });
        assert_eq!(store.read().name, "Measure");
        assert!(store.read().is_daily);
        assert_eq!(store.read().description, "weekly");

        store.reset();
        assert_eq!(store.read(), &DraftTask::default());
    }

    #[test]
    fn stores_are_independent() {
        let mut first = FormStore::<DraftTask>::new();
        let second = FormStore::<DraftTask>::new();
        first.write(DraftTaskPatch {
            name: Some("only here".into()),
            ..DraftTaskPatch::default()
        });
        assert!(second.read().is_empty());
    }
}
