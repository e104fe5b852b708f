//! # lab-core
//!
//! Core types shared by every crate of the orchid lab console.
//!
//! - Entity structs for everything the backend serves (methods, batches,
//!   experiment logs, tasks, seedlings, reports, notifications, ...)
//! - Status enums carried on the wire as integer codes
//! - Wizard drafts and their partial-update patches
//! - The paginated list envelope every list endpoint returns, plus a pager
//! - Cross-cutting error types

pub mod drafts;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod paging;
