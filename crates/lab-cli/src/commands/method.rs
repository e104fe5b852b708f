use anyhow::Context;
use lab_core::entities::Method;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MethodCommands;
use crate::commands::shared::paging::show_page;
use crate::context::AppContext;
use crate::output::output_entity;

/// Handle `orchid method`.
pub async fn handle(
    action: &MethodCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MethodCommands::List { filter } => {
            show_page::<Method>(lab_client::methods::PATH, "methods", filter.as_deref(), ctx, flags)
                .await
        }
        MethodCommands::Get { id } => {
            let method = ctx
                .client
                .get_method(id)
                .await
                .with_context(|| format!("could not load method '{id}'"))?;
            output_entity(&method, flags.format)
        }
    }
}
