use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Technician report commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// List reports.
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Get a report by ID.
    Get { id: String },
    /// File a report for a task. Each image is analysed before filing.
    Create(ReportCreateArgs),
    /// Run disease analysis on one plant image.
    Analyze { image: PathBuf },
}

#[derive(Clone, Debug, Args)]
pub struct ReportCreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub content: String,
    /// Task ID.
    #[arg(long)]
    pub task: String,
    /// Sample ID.
    #[arg(long)]
    pub sample: Option<String>,
    /// ELEMENT_ID=VALUE[:DESCRIPTION]; repeat for several.
    #[arg(long = "attribute")]
    pub attributes: Vec<String>,
    /// Plant image to analyse and attach; repeat for several.
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
}
