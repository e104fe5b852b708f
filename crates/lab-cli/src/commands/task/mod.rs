mod create;

use anyhow::Context;
use lab_core::entities::Task;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::commands::shared::paging::show_page;
use crate::context::AppContext;
use crate::output::output_entity;

/// Handle `orchid task`.
pub async fn handle(
    action: &TaskCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaskCommands::List { filter } => {
            show_page::<Task>(lab_client::tasks::PATH, "tasks", filter.as_deref(), ctx, flags).await
        }
        TaskCommands::Get { id } => {
            let task = ctx
                .client
                .get_task(id)
                .await
                .with_context(|| format!("could not load task '{id}'"))?;
            output_entity(&task, flags.format)
        }
        TaskCommands::Create(args) => create::run(args, ctx, flags).await,
    }
}
