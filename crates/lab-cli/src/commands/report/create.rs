use lab_client::reports::NewReport;
use serde::Serialize;

use super::analyze::{analyze_file, summarize};
use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCreateArgs;
use crate::commands::shared::parse::parse_attribute;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct ReportCreatedResponse {
    id: Option<String>,
    analysed_images: usize,
    message: &'static str,
}

pub async fn run(
    args: &ReportCreateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if args.name.trim().is_empty() || args.content.trim().is_empty() {
        anyhow::bail!("a report needs a name and content");
    }
    let attributes = args
        .attributes
        .iter()
        .map(|raw| parse_attribute(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    // Images are analysed one at a time; the first failure stops the filing.
    let mut analyses = Vec::with_capacity(args.images.len());
    for image in &args.images {
        let (file_name, analysis) = analyze_file(&ctx.client, image).await?;
        analyses.push(summarize(&file_name, &analysis));
    }

    let payload = NewReport {
        name: args.name.trim().to_string(),
        content: args.content.clone(),
        task_id: args.task.trim().to_string(),
        sample_id: args
            .sample
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string),
        attributes,
        analyses,
    };

    let spinner = Progress::spinner("Filing report…");
    let result = ctx.client.create_report(&payload).await;
    spinner.finish_clear();

    match result {
        Ok(created) => output(
            &ReportCreatedResponse {
                id: created.id,
                analysed_images: payload.analyses.len(),
                message: "Report created",
            },
            flags.format,
        ),
        Err(error) => match error.rejection_message() {
            Some(message) => Err(anyhow::anyhow!(message.to_string())),
            None => {
                tracing::warn!(%error, "report create failed");
                anyhow::bail!("Could not create report. Please try again.")
            }
        },
    }
}
