use anyhow::Context;
use lab_core::entities::{Batch, ExperimentLog};
use lab_core::paging::ListRequest;
use lab_wizard::availability::BatchUsage;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BatchCommands;
use crate::commands::shared::paging::pager;
use crate::context::AppContext;
use crate::output::{Tabular, output_page};
use crate::progress::Progress;

/// A batch with whether a new experiment log may use it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchStatus {
    #[serde(flatten)]
    batch: Batch,
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    unavailable_reason: Option<String>,
}

impl Tabular for BatchStatus {
    fn row(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.batch.id.to_string()),
            ("name", self.batch.name.clone()),
            ("lab", self.batch.lab_name.clone().unwrap_or_else(|| "-".into())),
            (
                "state",
                if self.available { "available" } else { "held" }.to_string(),
            ),
            (
                "held by",
                self.unavailable_reason.clone().unwrap_or_else(|| "-".into()),
            ),
        ]
    }
}

fn statuses(batches: Vec<Batch>, logs: &[ExperimentLog], only_available: bool) -> Vec<BatchStatus> {
    let usage = BatchUsage::new(logs);
    batches
        .into_iter()
        .map(|batch| {
            let unavailable_reason = usage.unavailable_reason(batch.id);
            BatchStatus {
                available: unavailable_reason.is_none(),
                unavailable_reason,
                batch,
            }
        })
        .filter(|status| !only_available || status.available)
        .collect()
}

/// Handle `orchid batch`.
pub async fn handle(
    action: &BatchCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        BatchCommands::List { filter, available } => {
            let mut pager = pager(ctx, flags);
            let spinner = Progress::spinner("Loading batches…");
            let request = pager.request(filter.clone());
            let every_log = ListRequest::all();
            let (batches, logs) = tokio::join!(
                ctx.client.list_batches(&request),
                ctx.client.list_experiment_logs(&every_log),
            );
            spinner.finish_clear();

            let batches = batches.context("could not load batches")?;
            let logs = logs.context("could not load experiment logs")?;
            pager.observe(&batches);
            let rows = statuses(batches.data, &logs.data, *available);
            output_page(&rows, &pager, flags.format)
        }
    }
}
