use clap::Subcommand;

/// Bearer token management.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Store the bearer token issued by the lab sign-in page.
    #[command(name = "set-token")]
    SetToken {
        /// The JWT, as issued.
        token: String,
    },
    /// Show who the stored token belongs to and when it expires.
    Status,
    /// Remove the stored token.
    Logout,
}
