mod create;

use anyhow::Context;
use lab_core::entities::Seedling;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SeedlingCommands;
use crate::commands::shared::paging::show_page;
use crate::context::AppContext;
use crate::output::output_entity;

/// Handle `orchid seedling`.
pub async fn handle(
    action: &SeedlingCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SeedlingCommands::List { filter } => {
            show_page::<Seedling>(
                lab_client::seedlings::PATH,
                "seedlings",
                filter.as_deref(),
                ctx,
                flags,
            )
            .await
        }
        SeedlingCommands::Get { id } => {
            let seedling = ctx
                .client
                .get_seedling(id)
                .await
                .with_context(|| format!("could not load seedling '{id}'"))?;
            output_entity(&seedling, flags.format)
        }
        SeedlingCommands::Create(args) => create::run(args, ctx, flags).await,
    }
}
