//! Completion Model
//!
//! Domain types for server-requested LLM completions, shaped for display
//! and for settlement by a UI rather than for the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use switchproto::{IncludeContext, Role, StopReason, ToolChoice, ToolDefinition};

/// One block of message or response content.
///
/// Unlike the wire union this enum is closed. Anything the wire carries
/// that has no arm here is degraded to a placeholder text block during
/// conversion, so downstream code never meets an unknown shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Image {
        data: String,
        mime_type: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: Vec<String>,
        is_error: bool,
    },
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Create an image block.
    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        ContentBlock::Image {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Get the text if this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// One conversation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::text(text)],
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentBlock::text(text)],
        }
    }
}

/// Model selection preferences with hints flattened to plain names.
///
/// The wire nests each hint in an object; hints without a name carry no
/// signal and are dropped during conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelPreferences {
    pub hints: Vec<String>,
    pub intelligence_priority: Option<f64>,
    pub speed_priority: Option<f64>,
    pub cost_priority: Option<f64>,
}

/// A completion request as shown to the user for approval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub model_preferences: Option<ModelPreferences>,
    pub system_prompt: Option<String>,
    pub max_tokens: u32,
    pub stop_sequences: Vec<String>,
    pub temperature: Option<f64>,
    pub include_context: Option<IncludeContext>,
    pub tools: Vec<ToolDefinition>,
    pub tool_choice: Option<ToolChoice>,
}

impl CompletionRequest {
    /// Hint names from the model preferences, in request order.
    pub fn hint_names(&self) -> &[String] {
        self.model_preferences
            .as_ref()
            .map(|prefs| prefs.hints.as_slice())
            .unwrap_or(&[])
    }
}

/// A tool invocation requested by the completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// The answer a completion request settles with.
///
/// `content` is the primary block; tool calls ride alongside and are
/// rendered as extra content blocks on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: ContentBlock,
    pub model: String,
    pub stop_reason: StopReason,
    pub tool_calls: Vec<ToolCall>,
}

impl CompletionResponse {
    /// A plain text answer.
    pub fn text(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: ContentBlock::text(text),
            model: model.into(),
            stop_reason: StopReason::EndTurn,
            tool_calls: Vec::new(),
        }
    }

    /// Add a tool call, switching the stop reason to tool use.
    pub fn with_tool_call(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: Value,
    ) -> Self {
        self.tool_calls.push(ToolCall {
            id: id.into(),
            name: name.into(),
            arguments,
        });
        self.stop_reason = StopReason::ToolUse;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_constructors() {
        let msg = Message::user("hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content[0].as_text(), Some("hello"));
    }

    #[test]
    fn test_hint_names_without_preferences() {
        let request = CompletionRequest::default();
        assert!(request.hint_names().is_empty());
    }

    #[test]
    fn test_hint_names_in_order() {
        let request = CompletionRequest {
            model_preferences: Some(ModelPreferences {
                hints: vec!["claude-3-sonnet".to_string(), "gpt-4".to_string()],
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(request.hint_names(), ["claude-3-sonnet", "gpt-4"]);
    }

    #[test]
    fn test_with_tool_call_sets_stop_reason() {
        let response = CompletionResponse::text("Checking the weather.", "test-model")
            .with_tool_call("call_1", "get_weather", serde_json::json!({"city": "Paris"}));

        assert_eq!(response.stop_reason, StopReason::ToolUse);
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].name, "get_weather");
    }
}
