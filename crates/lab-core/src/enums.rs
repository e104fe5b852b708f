//! Status and kind enums exchanged with the lab backend.
//!
//! The backend encodes every enum as a bare integer. Each enum here
//! serializes to that integer (`try_from`/`into` `i32`) and exposes a
//! `snake_case` label through `as_str()` for display.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// All variants in wire-code order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Integer code used on the wire.
            #[must_use]
            pub const fn code(self) -> i32 {
                match self {
                    $( Self::$variant => $code, )+
                }
            }

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = CoreError;

            fn try_from(code: i32) -> Result<Self, Self::Error> {
                match code {
                    $( $code => Ok(Self::$variant), )+
                    _ => Err(CoreError::UnknownCode { kind: $kind, code }),
                }
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.code()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl schemars::JsonSchema for $name {
            fn schema_name() -> Cow<'static, str> {
                Cow::Borrowed(stringify!($name))
            }

            fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
                schemars::json_schema!({
                    "type": "integer",
                    "enum": [$($code),+]
                })
            }
        }
    };
}

// ---------------------------------------------------------------------------
// MethodType
// ---------------------------------------------------------------------------

wire_enum! {
    /// Propagation technique a breeding method uses.
    pub enum MethodType as "method type" {
        Clonal = 0 => "clonal",
        Sexual = 1 => "sexual",
    }
}

// ---------------------------------------------------------------------------
// ExperimentLogStatus
// ---------------------------------------------------------------------------

wire_enum! {
    /// Lifecycle of an experiment log.
    ///
    /// ```text
    /// draft → in_process → done
    ///       ↘            ↘ cancelled
    /// ```
    pub enum ExperimentLogStatus as "experiment log status" {
        Draft = 0 => "draft",
        InProcess = 1 => "in_process",
        Done = 2 => "done",
        Cancelled = 3 => "cancelled",
    }
}

impl ExperimentLogStatus {
    /// Whether a log in this status still holds on to its batch.
    ///
    /// Only cancelled logs release the batch they referenced.
    #[must_use]
    pub const fn holds_batch(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

wire_enum! {
    /// Status of a technician task.
    pub enum TaskStatus as "task status" {
        Assigned = 0 => "assigned",
        InProcess = 1 => "in_process",
        Done = 2 => "done",
        Cancelled = 3 => "cancelled",
    }
}

// ---------------------------------------------------------------------------
// ReportStatus
// ---------------------------------------------------------------------------

wire_enum! {
    /// Review state of a technician report.
    pub enum ReportStatus as "report status" {
        Pending = 0 => "pending",
        Approved = 1 => "approved",
        Rejected = 2 => "rejected",
    }
}
