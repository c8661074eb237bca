//! `[smithery]` and `[web_search]` upstream settings.
use std::{path::Path, time::Duration};

use reqwest::Url;
use serde::Deserialize;

use crate::lib::errors::ConfigError;

pub const DEFAULT_SMITHERY_BASE_URL: &str = "https://registry.smithery.ai";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Registry endpoint settings. `timeout == None` leaves requests unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmitherySection {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub max_retries: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSearchSection {
    pub base_url: String,
    pub model: String,
    pub timeout: Option<Duration>,
    pub max_retries: u32,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawSmitherySection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawWebSearchSection {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

pub fn parse_smithery_section(
    raw: Option<RawSmitherySection>,
    path: &Path,
) -> Result<SmitherySection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let base_url = raw
        .base_url
        .unwrap_or_else(|| DEFAULT_SMITHERY_BASE_URL.to_string());
    validate_base_url(&base_url, path, "smithery.base_url")?;
    let timeout = parse_timeout(raw.timeout_secs, path, "smithery.timeout_secs")?;

    Ok(SmitherySection {
        base_url,
        timeout,
        max_retries: raw.max_retries.unwrap_or(0),
    })
}

pub fn parse_web_search_section(
    raw: Option<RawWebSearchSection>,
    path: &Path,
) -> Result<WebSearchSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let base_url = raw
        .base_url
        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
    validate_base_url(&base_url, path, "web_search.base_url")?;

    let model = raw
        .model
        .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
    if model.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "web_search.model",
            message: "Model name must not be blank".into(),
        });
    }
    let timeout = parse_timeout(raw.timeout_secs, path, "web_search.timeout_secs")?;

    Ok(WebSearchSection {
        base_url,
        model,
        timeout,
        max_retries: raw.max_retries.unwrap_or(0),
    })
}

fn validate_base_url(value: &str, path: &Path, field: &'static str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::InvalidField {
        path: path.to_path_buf(),
        field,
        message,
    };

    let url = Url::parse(value).map_err(|err| invalid(format!("`{value}` is not a URL: {err}")))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(()),
        _ => Err(invalid(format!(
            "`{value}` must be an absolute http(s) URL"
        ))),
    }
}

fn parse_timeout(
    secs: Option<u64>,
    path: &Path,
    field: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    match secs {
        None => Ok(None),
        Some(0) => Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field,
            message: "Timeout must be at least one second; omit it to disable".into(),
        }),
        Some(secs) => Ok(Some(Duration::from_secs(secs))),
    }
}
