//! CLI entrypoint module structure.
use anyhow::Result;

use crate::discovery::SourceDirectory;

pub mod args;
pub mod profile;

pub use args::{CliCommand, LaunchProfileArgs, ParsedCommand};
pub use profile::{
    build_launch_args, resolve_config_path, resolve_credentials, Credentials, LaunchProfile,
    TransportMode, OPENAI_API_KEY_ENV, SMITHERY_API_KEY_ENV,
};

/// Execute CLI command mode and return a user-facing result payload.
pub fn execute_cli_command(command: CliCommand) -> Result<String> {
    let directory = SourceDirectory::new();
    let rendered = match command {
        CliCommand::Sources => serde_json::to_string_pretty(&directory.list_sources())?,
        CliCommand::Validate { source_name } => {
            serde_json::to_string_pretty(&directory.validate(&source_name))?
        }
    };
    Ok(rendered)
}
