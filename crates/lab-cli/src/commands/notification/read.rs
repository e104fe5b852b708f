use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct MarkReadResponse<'a> {
    id: &'a str,
    read: bool,
}

/// The call is fire-and-forget: a failure is logged, never reported as a
/// command error. It is still awaited so the process does not exit first.
pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    lab_notify::spawn_mark_read(ctx.client.clone(), id.to_string()).await?;
    output(&MarkReadResponse { id, read: true }, flags.format)
}
