use clap::Subcommand;

/// Propagation method commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MethodCommands {
    /// List methods.
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Get a method by ID.
    Get { id: String },
}
