//! Load and validate server configuration.
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod providers;
pub mod server;
pub mod telemetry;

pub use providers::{
    parse_smithery_section, parse_web_search_section, RawSmitherySection, RawWebSearchSection,
    SmitherySection, WebSearchSection, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
    DEFAULT_SMITHERY_BASE_URL,
};
pub use server::{parse_server_section, RawServerSection, ServerSection, DEFAULT_HOST, DEFAULT_PORT};

pub const CONFIG_ENV_KEY: &str = "MCP_DISCOVERY_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
const ENV_PREFIX: &str = "MCP_DISCOVERY";

/// Where the config file path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathSource {
    Cli,
    Env,
    Default,
}

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub smithery: SmitherySection,
    pub web_search: WebSearchSection,
    pub source_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawServerConfig {
    server: Option<RawServerSection>,
    smithery: Option<RawSmitherySection>,
    web_search: Option<RawWebSearchSection>,
}

impl ServerConfig {
    /// Load configuration from a specific path, overlaid with `MCP_DISCOVERY_*` variables.
    ///
    /// A missing file is not an error: every field has a default.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        Self::load_layered(path, None)
    }

    /// `env_overrides` replaces the process environment as the overlay source when set.
    fn load_layered(
        path: PathBuf,
        env_overrides: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        info!(
            target: "mcp_discovery::config",
            path = %path.display(),
            exists = path.exists(),
            "Starting configuration load"
        );

        let builder = config::Config::builder()
            .add_source(config::File::from(path.clone()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env_overrides),
            );
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "mcp_discovery::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawServerConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "mcp_discovery::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "mcp_discovery::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawServerConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let server = parse_server_section(raw.server, &path)?;
        let smithery = parse_smithery_section(raw.smithery, &path)?;
        let web_search = parse_web_search_section(raw.web_search, &path)?;

        Ok(Self {
            server,
            smithery,
            web_search,
            source_path: path,
        })
    }
}
