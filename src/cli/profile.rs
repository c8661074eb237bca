//! LaunchProfile plus config-path and credential resolution.
use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::server::config::{
    telemetry, ConfigPathSource, ServerConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH,
};

pub const SMITHERY_API_KEY_ENV: &str = "SMITHERY_API_KEY";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// MCP transport mode.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TransportMode {
    Stdio,
    Tcp,
}

impl TransportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Stdio => "stdio",
            TransportMode::Tcp => "tcp",
        }
    }
}

/// Upstream API keys read from the process environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub smithery_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &Option<String>| if key.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("smithery_api_key", &redact(&self.smithery_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .finish()
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    pub config_path: PathBuf,
    pub transport: TransportMode,
    pub host_override: Option<String>,
    pub port_override: Option<u16>,
    pub credentials: Credentials,
    pub launch_args: Vec<String>,
}

impl LaunchProfile {
    /// CLI `--host`/`--port` win over file and environment values.
    pub fn apply_overrides(&self, config: &mut ServerConfig) {
        if let Some(host) = &self.host_override {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port_override {
            config.server.port = port;
        }
    }
}

/// Resolve config path in the order: CLI override → env var → default.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    let (path, source) = select_config_path(override_path, env::var_os(CONFIG_ENV_KEY));
    telemetry::log_path_source(&path, source);

    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(cwd.join(path))
}

fn select_config_path(
    override_path: Option<PathBuf>,
    env_value: Option<OsString>,
) -> (PathBuf, ConfigPathSource) {
    if let Some(path) = override_path {
        return (path, ConfigPathSource::Cli);
    }
    match env_value.filter(|value| !value.is_empty()) {
        Some(value) => (PathBuf::from(value), ConfigPathSource::Env),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), ConfigPathSource::Default),
    }
}

/// Read both API keys; blank values count as absent.
pub fn resolve_credentials() -> Credentials {
    Credentials {
        smithery_api_key: read_key(SMITHERY_API_KEY_ENV),
        openai_api_key: read_key(OPENAI_API_KEY_ENV),
    }
}

/// Build launch arguments suitable for reproduction/logging.
pub fn build_launch_args(
    transport: TransportMode,
    config: &Path,
    host: Option<&str>,
    port: Option<u16>,
) -> Vec<String> {
    let mut args = vec![
        format!("--transport={}", transport.as_str()),
        format!("--config={}", config.display()),
    ];
    if let Some(host) = host {
        args.push(format!("--host={host}"));
    }
    if let Some(port) = port {
        args.push(format!("--port={port}"));
    }
    args
}

fn read_key(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| normalize_key(&value))
}

fn normalize_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
