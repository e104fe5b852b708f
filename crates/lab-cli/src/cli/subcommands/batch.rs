use clap::Subcommand;

/// Tissue-culture batch commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BatchCommands {
    /// List batches with whether each is free for a new experiment log.
    List {
        #[arg(long)]
        filter: Option<String>,
        /// Only batches no open experiment log holds.
        #[arg(long)]
        available: bool,
    },
}
