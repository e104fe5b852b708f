mod create;

use anyhow::Context;
use lab_core::entities::ExperimentLog;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExperimentLogCommands;
use crate::commands::shared::paging::show_page;
use crate::context::AppContext;
use crate::output::output_entity;

/// Handle `orchid experiment-log`.
pub async fn handle(
    action: &ExperimentLogCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ExperimentLogCommands::List { filter } => {
            show_page::<ExperimentLog>(
                lab_client::experiment_logs::PATH,
                "experiment logs",
                filter.as_deref(),
                ctx,
                flags,
            )
            .await
        }
        ExperimentLogCommands::Get { id } => {
            let log = ctx
                .client
                .get_experiment_log(id)
                .await
                .with_context(|| format!("could not load experiment log '{id}'"))?;
            output_entity(&log, flags.format)
        }
        ExperimentLogCommands::Create(args) => create::run(args, ctx, flags).await,
    }
}
