use clap::{Args, Subcommand};

/// Experiment log commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ExperimentLogCommands {
    /// List experiment logs.
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Get an experiment log by ID.
    Get { id: String },
    /// Create an experiment log (general → resources → review).
    Create(ExperimentLogCreateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ExperimentLogCreateArgs {
    #[arg(long)]
    pub name: String,
    /// Method ID.
    #[arg(long)]
    pub method: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub start_date: String,
    /// YYYY-MM-DD, not before the start date
    #[arg(long)]
    pub end_date: String,
    /// Tissue-culture batch ID; must not be held by another open log.
    #[arg(long)]
    pub batch: String,
    /// Number of samples.
    #[arg(long)]
    pub samples: String,
    /// Mother seedling ID (required for sexual propagation).
    #[arg(long)]
    pub mother: Option<String>,
    /// Technician ID; repeat for several.
    #[arg(long = "technician")]
    pub technicians: Vec<String>,
    #[arg(long)]
    pub description: Option<String>,
}
