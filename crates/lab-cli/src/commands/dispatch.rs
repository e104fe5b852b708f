use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Method { action } => commands::method::handle(&action, ctx, flags).await,
        Commands::Batch { action } => commands::batch::handle(&action, ctx, flags).await,
        Commands::ExperimentLog { action } => {
            commands::experiment_log::handle(&action, ctx, flags).await
        }
        Commands::Task { action } => commands::task::handle(&action, ctx, flags).await,
        Commands::Seedling { action } => commands::seedling::handle(&action, ctx, flags).await,
        Commands::Report { action } => commands::report::handle(&action, ctx, flags).await,
        Commands::Notification { action } => {
            commands::notification::handle(&action, ctx, flags).await
        }
        Commands::Auth { .. } => unreachable!("auth is pre-dispatched in main"),
    }
}
