mod analyze;
mod create;

use anyhow::Context;
use lab_core::entities::Report;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::commands::shared::paging::show_page;
use crate::context::AppContext;
use crate::output::output_entity;

/// Handle `orchid report`.
pub async fn handle(
    action: &ReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReportCommands::List { filter } => {
            show_page::<Report>(lab_client::reports::PATH, "reports", filter.as_deref(), ctx, flags)
                .await
        }
        ReportCommands::Get { id } => {
            let report = ctx
                .client
                .get_report(id)
                .await
                .with_context(|| format!("could not load report '{id}'"))?;
            output_entity(&report, flags.format)
        }
        ReportCommands::Create(args) => create::run(args, ctx, flags).await,
        ReportCommands::Analyze { image } => analyze::run(image, ctx, flags).await,
    }
}
