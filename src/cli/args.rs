//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::{
    build_launch_args, resolve_config_path, resolve_credentials, LaunchProfile, TransportMode,
};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    RunServer(LaunchProfile),
    Cli(CliCommand),
}

/// Offline inspection commands. Neither touches the network.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Print the known discovery sources as JSON.
    Sources,
    /// Check whether a source name is a known source and print the result as JSON.
    Validate {
        /// Source identifier, matched case-insensitively.
        source_name: String,
    },
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mcp-discovery",
    author,
    version,
    about = "MCP server for discovering other MCP servers",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Select stdio (default) or tcp.
    #[arg(long, value_enum, default_value_t = TransportMode::Stdio)]
    pub transport: TransportMode,
    /// Path to config.toml (overrides MCP_DISCOVERY_CONFIG).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Bind host for tcp mode (overrides `[server].host`).
    #[arg(long = "host")]
    pub host_override: Option<String>,
    /// Bind port for tcp mode (overrides `[server].port`).
    #[arg(long = "port", value_parser = clap::value_parser!(u16).range(1024..))]
    pub port_override: Option<u16>,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config_override)?;
        let launch_args = build_launch_args(
            self.transport,
            &config_path,
            self.host_override.as_deref(),
            self.port_override,
        );

        Ok(LaunchProfile {
            config_path,
            transport: self.transport,
            host_override: self.host_override,
            port_override: self.port_override,
            credentials: resolve_credentials(),
            launch_args,
        })
    }

    /// Parse CLI args into either server launch mode or utility command mode.
    pub fn into_command(self) -> Result<ParsedCommand> {
        match self.command {
            Some(command) => Ok(ParsedCommand::Cli(command)),
            None => Ok(ParsedCommand::RunServer(self.build()?)),
        }
    }
}
