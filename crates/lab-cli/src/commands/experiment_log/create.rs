use lab_core::drafts::DraftExperimentLogPatch;
use lab_wizard::ExperimentLogWizard;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExperimentLogCreateArgs;
use crate::commands::shared::wizard::{advance, enter_step, print_summary, submit};
use crate::context::AppContext;

pub async fn run(
    args: &ExperimentLogCreateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut wizard = ExperimentLogWizard::new();

    wizard.edit(DraftExperimentLogPatch {
        name: Some(args.name.clone()),
        method_id: Some(args.method.clone()),
        start_date: Some(args.start_date.clone()),
        end_date: Some(args.end_date.clone()),
        description: args.description.clone(),
        ..DraftExperimentLogPatch::default()
    });
    enter_step(&wizard, &ctx.client, flags).await;
    advance(&mut wizard)?;

    wizard.edit(DraftExperimentLogPatch {
        batch_id: Some(args.batch.clone()),
        number_of_samples: Some(args.samples.clone()),
        mother_seedling_id: args.mother.clone(),
        technician_ids: Some(args.technicians.clone()),
        ..DraftExperimentLogPatch::default()
    });
    enter_step(&wizard, &ctx.client, flags).await;
    advance(&mut wizard)?;

    enter_step(&wizard, &ctx.client, flags).await;
    print_summary(&wizard, flags);
    submit(&mut wizard, &ctx.client, flags).await
}
