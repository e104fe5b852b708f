use clap::Subcommand;

use crate::cli::subcommands::{
    AuthCommands, BatchCommands, ExperimentLogCommands, MethodCommands, NotificationCommands,
    ReportCommands, SeedlingCommands, TaskCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Propagation methods.
    Method {
        #[command(subcommand)]
        action: MethodCommands,
    },
    /// Tissue-culture batches.
    Batch {
        #[command(subcommand)]
        action: BatchCommands,
    },
    /// Experiment logs.
    #[command(name = "experiment-log")]
    ExperimentLog {
        #[command(subcommand)]
        action: ExperimentLogCommands,
    },
    /// Technician tasks.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Seedlings.
    Seedling {
        #[command(subcommand)]
        action: SeedlingCommands,
    },
    /// Technician reports and disease analysis.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// Notifications of the signed-in user.
    Notification {
        #[command(subcommand)]
        action: NotificationCommands,
    },
    /// Bearer token management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
}
