use lab_core::drafts::DraftTaskPatch;
use lab_wizard::flows::TaskStep;
use lab_wizard::{FieldErrors, TaskWizard};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCreateArgs;
use crate::commands::shared::parse::parse_row;
use crate::commands::shared::wizard::{
    advance, await_loads, enter_step, format_field_errors, print_summary, submit,
};
use crate::context::AppContext;

pub async fn run(args: &TaskCreateArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = args
        .attributes
        .iter()
        .map(|raw| parse_row(raw, "attribute"))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut wizard = TaskWizard::new();
    wizard.edit(DraftTaskPatch {
        name: Some(args.name.clone()),
        start_date: Some(args.start_date.clone()),
        end_date: Some(args.end_date.clone()),
        is_daily: Some(args.daily),
        description: args.description.clone(),
        ..DraftTaskPatch::default()
    });
    enter_step(&wizard, &ctx.client, flags).await;

    // Stages and samples belong to the chosen log and load only once it is picked.
    let children = wizard.choose_experiment_log(&args.experiment_log, &ctx.client);
    await_loads(wizard.title(), children).await;
    if let TaskStep::General(step) = wizard.mounted() {
        for banner in [step.stages.error(), step.samples.error()].into_iter().flatten() {
            eprintln!("  ! {banner}");
        }
    }
    wizard.edit(DraftTaskPatch {
        stage_ref: Some(args.stage.clone()),
        sample_ref: args.sample.clone(),
        ..DraftTaskPatch::default()
    });
    advance(&mut wizard)?;

    enter_step(&wizard, &ctx.client, flags).await;
    let mut unknown = FieldErrors::new();
    for row in &rows {
        let index = wizard.add_attribute();
        if wizard.select_element(index, &row.key).is_none() {
            unknown.insert(
                format!("attributes[{index}].referenceElementId"),
                format!("unknown element '{}'", row.key),
            );
        }
        wizard.set_attribute_value(index, &row.value);
        wizard.set_attribute_description(index, &row.description);
    }
    if !unknown.is_empty() {
        eprintln!("{}", format_field_errors(wizard.title(), &unknown));
        anyhow::bail!("step '{}' has {} unknown element(s)", wizard.title(), unknown.len());
    }
    advance(&mut wizard)?;

    wizard.edit(DraftTaskPatch {
        assigned_technicians: Some(args.technicians.clone()),
        ..DraftTaskPatch::default()
    });
    enter_step(&wizard, &ctx.client, flags).await;
    print_summary(&wizard, flags);
    submit(&mut wizard, &ctx.client, flags).await
}
