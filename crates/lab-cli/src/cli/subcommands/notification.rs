use clap::Subcommand;

/// Notification commands.
#[derive(Clone, Debug, Subcommand)]
pub enum NotificationCommands {
    /// List notifications, newest first.
    List {
        /// Only unread notifications.
        #[arg(long)]
        unread: bool,
        /// Case-insensitive match on title and content.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Mark a notification read.
    Read { id: String },
    /// Follow the feed live until interrupted.
    Watch {
        /// Poll only; do not connect to the push hub.
        #[arg(long)]
        no_hub: bool,
        /// Mark each notification read as it is shown.
        #[arg(long)]
        mark_read: bool,
    },
}
