use lab_core::drafts::DraftSeedlingPatch;
use lab_wizard::SeedlingWizard;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SeedlingCreateArgs;
use crate::commands::shared::parse::parse_row;
use crate::commands::shared::wizard::{advance, enter_step, print_summary, submit};
use crate::context::AppContext;

pub async fn run(
    args: &SeedlingCreateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let rows = args
        .characteristics
        .iter()
        .map(|raw| parse_row(raw, "characteristic"))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut wizard = SeedlingWizard::new();

    wizard.edit(DraftSeedlingPatch {
        local_name: Some(args.local_name.clone()),
        scientific_name: Some(args.scientific_name.clone()),
        date_of_birth: Some(args.date_of_birth.clone()),
        mother_id: args.mother.clone(),
        father_id: args.father.clone(),
        description: args.description.clone(),
        ..DraftSeedlingPatch::default()
    });
    enter_step(&wizard, &ctx.client, flags).await;
    advance(&mut wizard)?;

    enter_step(&wizard, &ctx.client, flags).await;
    for row in &rows {
        let index = wizard.add_characteristic(&row.key, &row.description);
        if !row.value.is_empty() {
            wizard.set_characteristic_value(index, &row.value);
        }
    }
    advance(&mut wizard)?;

    enter_step(&wizard, &ctx.client, flags).await;
    print_summary(&wizard, flags);
    submit(&mut wizard, &ctx.client, flags).await
}
