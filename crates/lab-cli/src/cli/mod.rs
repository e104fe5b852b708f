use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `orchid` binary.
#[derive(Debug, Parser)]
#[command(
    name = "orchid",
    version,
    about = "Orchid lab console - tissue-culture experiments, tasks and seedlings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// How results are printed
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Page of a list to show (1-based)
    #[arg(long, global = true)]
    pub page: Option<u32>,

    /// Rows per page (defaults to general.page_size)
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// No spinners, step headers or summaries
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (defaults to the nearest directory with .orchid)
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    /// Flags every command handler sees.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            page: self.page,
            page_size: self.page_size,
            quiet: self.quiet,
            project: self.project.clone(),
        }
    }
}
