use clap::{Args, Subcommand};

/// Technician task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List tasks.
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Get a task by ID.
    Get { id: String },
    /// Create a task (general → attributes → technicians).
    Create(TaskCreateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct TaskCreateArgs {
    #[arg(long)]
    pub name: String,
    /// Experiment log ID.
    #[arg(long)]
    pub experiment_log: String,
    /// Stage ID within the experiment log.
    #[arg(long)]
    pub stage: String,
    /// Sample ID within the experiment log.
    #[arg(long)]
    pub sample: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub start_date: String,
    /// YYYY-MM-DD, not before the start date
    #[arg(long)]
    pub end_date: String,
    /// Repeat the task every day between the two dates.
    #[arg(long)]
    pub daily: bool,
    #[arg(long)]
    pub description: Option<String>,
    /// ELEMENT_ID=VALUE[:DESCRIPTION]; repeat for several.
    #[arg(long = "attribute")]
    pub attributes: Vec<String>,
    /// Technician ID; repeat for several.
    #[arg(long = "technician")]
    pub technicians: Vec<String>,
}
