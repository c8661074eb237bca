//! Fixed directory of known discovery sources and the identity check over it.

use std::collections::BTreeMap;

use serde::Serialize;

/// A known source of MCP server listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub id: &'static str,
    pub description: &'static str,
    trust_message: &'static str,
}

/// Description entry as served by `resource://sources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Success,
    Caution,
}

/// Answer to "is this a known source". `Caution` is a normal value, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub message: String,
}

const KNOWN_SOURCES: [SourceDescriptor; 2] = [
    SourceDescriptor {
        id: "smithery",
        description: "The smithery mcp server",
        trust_message: "Smithery is a trusted source of mcp servers",
    },
    SourceDescriptor {
        id: "web_search",
        description: "The openai web search mcp server",
        trust_message: "The openai web search is a trusted source of mcp servers",
    },
];

/// Read-only table of source identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceDirectory;

impl SourceDirectory {
    pub fn new() -> Self {
        Self
    }

    pub fn list_sources(&self) -> BTreeMap<&'static str, SourceSummary> {
        KNOWN_SOURCES
            .iter()
            .map(|source| {
                (
                    source.id,
                    SourceSummary {
                        description: source.description,
                    },
                )
            })
            .collect()
    }

    /// Case-insensitive lookup. Total: every input maps to a result.
    pub fn validate(&self, source_id: &str) -> ValidationResult {
        let normalized = source_id.to_lowercase();
        match KNOWN_SOURCES.iter().find(|source| source.id == normalized) {
            Some(source) => ValidationResult {
                status: ValidationStatus::Success,
                message: source.trust_message.to_string(),
            },
            None => ValidationResult {
                status: ValidationStatus::Caution,
                message: format!(
                    "The source name {normalized} might not be a valid source of mcp servers"
                ),
            },
        }
    }
}
