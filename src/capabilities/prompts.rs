//! Prompt templates rendering a single conversational message.

use rmcp::model::{JsonObject, PromptMessage, PromptMessageRole};
use serde::Serialize;

use crate::lib::errors::DispatchError;

/// Author of a rendered prompt message. Prompts here only speak as the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

/// A rendered prompt message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn into_prompt_message(self) -> PromptMessage {
        let role = match self.role {
            MessageRole::User => PromptMessageRole::User,
        };
        PromptMessage::new_text(role, self.content)
    }
}

/// Declared prompt argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptArgumentSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// A parameterized prompt registered in the prompt namespace.
pub trait PromptHandler: Send + Sync {
    fn description(&self) -> &str;

    fn arguments(&self) -> Vec<PromptArgumentSpec>;

    fn render(&self, args: &JsonObject) -> Result<Message, DispatchError>;
}

/// Fetch a required string argument for `prompt`.
pub fn required_string_argument<'a>(
    prompt: &str,
    args: &'a JsonObject,
    name: &str,
) -> Result<&'a str, DispatchError> {
    match args.get(name) {
        Some(value) => value.as_str().ok_or_else(|| {
            DispatchError::invalid_arguments(prompt, format!("`{name}` must be a string"))
        }),
        None => Err(DispatchError::invalid_arguments(
            prompt,
            format!("missing required argument `{name}`"),
        )),
    }
}
