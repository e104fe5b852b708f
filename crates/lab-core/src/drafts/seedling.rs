use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Attribute, draft};

draft! {
    /// Seedling being assembled by the create-seedling wizard.
    pub struct DraftSeedling, DraftSeedlingPatch {
        pub local_name: String,
        pub scientific_name: String,
        pub mother_id: String,
        pub father_id: String,
        pub description: String,
        pub date_of_birth: String,
        pub characteristics: Vec<Attribute>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafts::Draft;
    use pretty_assertions::assert_eq;

    #[test]
    fn merge_only_touches_given_fields() {
        let mut draft = DraftSeedling {
            local_name: "Vanda X".into(),
            scientific_name: "Vanda coerulea".into(),
            ..DraftSeedling::default()
        };
        draft.merge(DraftSeedlingPatch {
            father_id: Some("s1".into()),
            ..DraftSeedlingPatch::default()
        });
        assert_eq!(draft.local_name, "Vanda X");
        assert_eq!(draft.scientific_name, "Vanda coerulea");
        assert_eq!(draft.father_id, "s1");
    }

    #[test]
    fn later_write_wins() {
        let mut draft = DraftSeedling::default();
        for name in ["V", "Va", "Vanda"] {
            draft.merge(DraftSeedlingPatch {
                local_name: Some(name.into()),
                ..DraftSeedlingPatch::default()
            });
        }
        assert_eq!(draft.local_name, "Vanda");
    }

    #[test]
    fn default_is_empty() {
        assert!(DraftSeedling::default().is_empty());
        let draft = DraftSeedling {
            description: "x".into(),
            ..DraftSeedling::default()
        };
        assert!(!draft.is_empty());
    }
}
