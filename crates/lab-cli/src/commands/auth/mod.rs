mod logout;
mod set_token;
mod status;

use lab_config::LabConfig;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `orchid auth <subcommand>`. Runs before the backend client is
/// built.
pub fn handle(action: &AuthCommands, flags: &GlobalFlags, config: &LabConfig) -> anyhow::Result<()> {
    match action {
        AuthCommands::SetToken { token } => set_token::handle(token, flags),
        AuthCommands::Status => status::handle(flags, config),
        AuthCommands::Logout => logout::handle(flags),
    }
}
