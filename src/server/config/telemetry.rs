use tracing::{debug, info};

use super::{ConfigPathSource, ServerConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_path_source(path: &std::path::Path, source: ConfigPathSource) {
    match source {
        ConfigPathSource::Cli => debug!(
            target: "mcp_discovery::config",
            path = %path.display(),
            "Using configuration path from --config"
        ),
        ConfigPathSource::Env => info!(
            target: "mcp_discovery::config",
            path = %path.display(),
            "Loading configuration using MCP_DISCOVERY_CONFIG environment variable"
        ),
        ConfigPathSource::Default => debug!(
            target: "mcp_discovery::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "MCP_DISCOVERY_CONFIG not set; using default config.toml"
        ),
    }
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "mcp_discovery::config",
        path = %config.source_path.display(),
        host = %config.server.host,
        port = config.server.port,
        smithery_base_url = %config.smithery.base_url,
        smithery_max_retries = config.smithery.max_retries,
        web_search_base_url = %config.web_search.base_url,
        web_search_model = %config.web_search.model,
        web_search_max_retries = config.web_search.max_retries,
        "Configuration loaded successfully"
    );
}
