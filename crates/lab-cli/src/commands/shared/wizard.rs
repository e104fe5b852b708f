//! Driving a create wizard from command-line flags.
//!
//! Each step is filled from the flags, its options are loaded behind a
//! spinner, and the wizard is asked to advance. A refused step prints its
//! inline errors and stops the command; nothing is sent.

use futures::future::join_all;
use lab_client::LabClient;
use lab_wizard::{FieldErrors, Mount, Session, SubmitOutcome};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::progress::Progress;

/// Print a progress line on stderr unless `--quiet`.
pub fn note(flags: &GlobalFlags, message: &str) {
    if !flags.quiet {
        eprintln!("{message}");
    }
}

/// Announce the mounted step and load its options.
pub async fn enter_step<M: Mount>(session: &Session<M>, client: &LabClient, flags: &GlobalFlags) {
    note(
        flags,
        &format!(
            "[{}/{}] {}",
            session.route() + 1,
            M::TITLES.len(),
            session.title()
        ),
    );
    await_loads(session.title(), session.load_options(client)).await;
    for banner in session.banners() {
        eprintln!("  ! {banner}");
    }
}

/// Wait for option fetches behind a spinner.
pub async fn await_loads(title: &str, handles: Vec<JoinHandle<()>>) {
    if handles.is_empty() {
        return;
    }
    let spinner = Progress::spinner(&format!("{title}: loading options…"));
    for result in join_all(handles).await {
        if let Err(error) = result {
            tracing::warn!(%error, "option loader task failed");
        }
    }
    spinner.finish_clear();
}

/// Validate the mounted step and move on.
pub fn advance<M: Mount>(session: &mut Session<M>) -> anyhow::Result<()> {
    let title = session.title();
    session.next().map(|_| ()).map_err(|error| {
        if let Some(errors) = error.field_errors() {
            eprintln!("{}", format_field_errors(title, errors));
        }
        anyhow::Error::from(error)
    })
}

pub fn format_field_errors(title: &str, errors: &FieldErrors) -> String {
    let mut out = format!("{title}:");
    for (field, message) in errors.iter() {
        out.push_str(&format!("\n  {field}: {message}"));
    }
    out
}

/// Print the review summary, aligned on the label column.
pub fn print_summary<M: Mount>(session: &Session<M>, flags: &GlobalFlags) {
    if flags.quiet {
        return;
    }
    eprintln!("{}", format_summary(&session.summary()));
}

fn format_summary(summary: &[(&'static str, String)]) -> String {
    let width = summary
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    summary
        .iter()
        .map(|(label, value)| {
            let value = if value.trim().is_empty() { "-" } else { value };
            let fill = " ".repeat(width - label.chars().count());
            format!("  {label}{fill}  {value}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CreatedResponse {
    pub id: Option<String>,
    pub list: &'static str,
    pub message: String,
}

/// Submit from the last step. A created entity is printed; every other
/// outcome becomes the command's error, carrying the toast text.
pub async fn submit<M: Mount>(
    session: &mut Session<M>,
    client: &LabClient,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let title = session.title();
    let spinner = Progress::spinner("Submitting…");
    let outcome = session.submit(client).await;
    spinner.finish_clear();
    output(&settle(title, outcome)?, flags.format)
}

fn settle(title: &str, outcome: SubmitOutcome) -> anyhow::Result<CreatedResponse> {
    match outcome {
        SubmitOutcome::Created { id, route, toast } => Ok(CreatedResponse {
            id,
            list: route.path(),
            message: toast.message,
        }),
        SubmitOutcome::Rejected { toast } | SubmitOutcome::Failed { toast } => {
            Err(anyhow::anyhow!(toast.message))
        }
        SubmitOutcome::Invalid(errors) => {
            eprintln!("{}", format_field_errors(title, &errors));
            anyhow::bail!("nothing was sent: {} invalid field(s)", errors.len())
        }
    }
}
