mod auth;
mod batch;
mod experiment_log;
mod method;
mod notification;
mod report;
mod seedling;
mod task;

pub use auth::AuthCommands;
pub use batch::BatchCommands;
pub use experiment_log::{ExperimentLogCommands, ExperimentLogCreateArgs};
pub use method::MethodCommands;
pub use notification::NotificationCommands;
pub use report::{ReportCommands, ReportCreateArgs};
pub use seedling::{SeedlingCommands, SeedlingCreateArgs};
pub use task::{TaskCommands, TaskCreateArgs};
