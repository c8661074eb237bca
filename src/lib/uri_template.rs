//! Single-placeholder resource URI templates such as `resource://{source_name}/validate_sources`.

use std::fmt;

use super::errors::TemplateError;

/// A parsed URI template: literal prefix, one named placeholder, literal suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    raw: String,
    prefix: String,
    placeholder: String,
    suffix: String,
}

impl UriTemplate {
    /// Returns true if `pattern` contains a placeholder and must be parsed as a template.
    pub fn is_template(pattern: &str) -> bool {
        pattern.contains('{') || pattern.contains('}')
    }

    pub fn parse(pattern: &str) -> Result<Self, TemplateError> {
        let err_template = || pattern.to_string();

        let open = pattern
            .find('{')
            .ok_or_else(|| TemplateError::UnopenedPlaceholder {
                template: err_template(),
            })?;
        let prefix = &pattern[..open];
        if prefix.contains('}') {
            return Err(TemplateError::UnopenedPlaceholder {
                template: err_template(),
            });
        }

        let rest = &pattern[open + 1..];
        let close = rest
            .find('}')
            .ok_or_else(|| TemplateError::UnclosedPlaceholder {
                template: err_template(),
            })?;
        let placeholder = &rest[..close];
        if placeholder.contains('{') {
            return Err(TemplateError::UnclosedPlaceholder {
                template: err_template(),
            });
        }
        if placeholder.trim().is_empty() {
            return Err(TemplateError::EmptyPlaceholder {
                template: err_template(),
            });
        }

        let suffix = &rest[close + 1..];
        if suffix.contains('{') {
            return Err(TemplateError::MultiplePlaceholders {
                template: err_template(),
            });
        }
        if suffix.contains('}') {
            return Err(TemplateError::UnopenedPlaceholder {
                template: err_template(),
            });
        }

        Ok(Self {
            raw: pattern.to_string(),
            prefix: prefix.to_string(),
            placeholder: placeholder.to_string(),
            suffix: suffix.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Extract the percent-decoded value bound to the placeholder.
    ///
    /// The raw segment must be non-empty and free of `/`. A segment whose escapes
    /// do not decode to UTF-8 does not match.
    pub fn extract(&self, uri: &str) -> Option<String> {
        let remainder = uri.strip_prefix(self.prefix.as_str())?;
        let value = remainder.strip_suffix(self.suffix.as_str())?;
        if value.is_empty() || value.contains('/') {
            return None;
        }
        urlencoding::decode(value).ok().map(|decoded| decoded.into_owned())
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
