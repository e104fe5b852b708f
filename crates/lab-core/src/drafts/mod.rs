//! In-progress entity records held across the steps of a wizard.
//!
//! Drafts keep form values exactly as the user entered them (ids and numbers
//! are strings, dates are `YYYY-MM-DD` text). Coercion into backend types
//! happens once, when the final step assembles the create payload.
//!
//! Every draft comes with a `*Patch` type whose fields are all optional.
//! [`Draft::merge`] applies a patch field by field; the last write wins.

/// A draft record a wizard builds up step by step.
///
/// `Default` is the documented empty record a wizard starts from and returns
/// to on reset.
pub trait Draft: Clone + Default + PartialEq {
    type Patch: Default;

    /// Merge a partial update. Fields left as `None` are untouched.
    fn merge(&mut self, patch: Self::Patch);

    /// Whether the draft still equals its empty default.
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Declares a draft struct together with its patch type and `Draft` impl.
macro_rules! draft {
    (
        $(#[$meta:meta])*
        pub struct $name:ident, $patch:ident {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )+
        }

        #[doc = concat!("Partial update for [`", stringify!($name), "`].")]
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $patch {
            $( pub $field: Option<$ty>, )+
        }

        impl $crate::drafts::Draft for $name {
            type Patch = $patch;

            fn merge(&mut self, patch: $patch) {
                $(
                    if let Some(value) = patch.$field {
                        self.$field = value;
                    }
                )+
            }
        }
    };
}

pub(crate) use draft;

mod attribute;
mod experiment_log;
mod seedling;
mod task;

pub use attribute::Attribute;
pub use experiment_log::{DraftExperimentLog, DraftExperimentLogPatch};
pub use seedling::{DraftSeedling, DraftSeedlingPatch};
pub use task::{DraftTask, DraftTaskPatch};
