use clap::{Args, Subcommand};

/// Seedling commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SeedlingCommands {
    /// List seedlings.
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Get a seedling by ID.
    Get { id: String },
    /// Create a seedling (identity → characteristics → summary).
    Create(SeedlingCreateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SeedlingCreateArgs {
    #[arg(long)]
    pub local_name: String,
    #[arg(long)]
    pub scientific_name: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: String,
    /// Mother seedling ID.
    #[arg(long)]
    pub mother: Option<String>,
    /// Father seedling ID.
    #[arg(long)]
    pub father: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// NAME[=VALUE][:DESCRIPTION]; repeat for several.
    #[arg(long = "characteristic")]
    pub characteristics: Vec<String>,
}
