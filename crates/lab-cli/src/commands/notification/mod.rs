mod list;
mod read;
mod watch;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::NotificationCommands;
use crate::context::AppContext;

/// Handle `orchid notification`.
pub async fn handle(
    action: &NotificationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        NotificationCommands::List { unread, filter } => {
            list::run(*unread, filter.as_deref(), ctx, flags).await
        }
        NotificationCommands::Read { id } => read::run(id, ctx, flags).await,
        NotificationCommands::Watch { no_hub, mark_read } => {
            watch::run(*no_hub, *mark_read, ctx, flags).await
        }
    }
}
