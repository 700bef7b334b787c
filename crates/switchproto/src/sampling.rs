//! Sampling Types
//!
//! Wire shapes for server-initiated `sampling/createMessage` requests.
//! Per MCP 2025-11-25 schema, including tool use in sampling (SEP-1577).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{MessageContent, Role};

/// A message in a createMessage request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl SamplingMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::single(crate::content::Content::text(text)),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::single(crate::content::Content::text(text)),
        }
    }
}

/// Model preferences for sampling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPreferences {
    /// Hints for model selection, evaluated in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<ModelHint>>,

    /// Priority for model intelligence (0.0-1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence_priority: Option<f64>,

    /// Priority for response speed (0.0-1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_priority: Option<f64>,

    /// Priority for cost efficiency (0.0-1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_priority: Option<f64>,
}

/// Hint for model selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelHint {
    /// Model name substring or family, e.g. "claude-3-sonnet".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ModelHint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// What MCP server context to include in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IncludeContext {
    None,
    ThisServer,
    AllServers,
}

/// Tool made available to the model for one sampling request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON Schema for the tool's arguments, passed through verbatim.
    pub input_schema: Value,
}

/// How the model may use the provided tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolChoice {
    /// Model decides whether to call a tool.
    Auto,
    /// Model must not call any tool.
    None,
    /// Model must call some tool.
    Required,
    /// Model must call the named tool.
    Tool { name: String },
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    EndTurn,
    StopSequence,
    MaxTokens,
    ToolUse,
}

/// Parameters of a `sampling/createMessage` request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageParams {
    /// Conversation so far.
    pub messages: Vec<SamplingMessage>,

    /// Model selection preferences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_preferences: Option<ModelPreferences>,

    /// System prompt the server would like used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// What context to include from MCP servers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_context: Option<IncludeContext>,

    /// Temperature (0.0-2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Maximum tokens to generate. Required by the schema.
    pub max_tokens: u32,

    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,

    /// Tools the model may call during this request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,

    /// Constraint on tool usage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,

    /// Provider-specific passthrough metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Result of a `sampling/createMessage` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageResult {
    /// Always assistant for generated completions.
    pub role: Role,

    /// Generated content. An array when tool calls are present.
    pub content: MessageContent,

    /// Model that produced the completion.
    pub model: String,

    /// Why generation stopped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_params_field_names() {
        let params = CreateMessageParams {
            messages: vec![SamplingMessage::user("Hello")],
            max_tokens: 100,
            system_prompt: Some("Be brief.".to_string()),
            stop_sequences: Some(vec!["END".to_string()]),
            ..Default::default()
        };

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["maxTokens"], 100);
        assert_eq!(json["systemPrompt"], "Be brief.");
        assert_eq!(json["stopSequences"][0], "END");
        assert!(json.get("modelPreferences").is_none());
    }

    #[test]
    fn test_model_preferences_parse() {
        let raw = serde_json::json!({
            "hints": [{"name": "claude-3-sonnet"}, {}],
            "speedPriority": 0.8
        });
        let prefs: ModelPreferences = serde_json::from_value(raw).unwrap();

        let hints = prefs.hints.unwrap();
        assert_eq!(hints[0].name.as_deref(), Some("claude-3-sonnet"));
        assert_eq!(hints[1].name, None);
        assert_eq!(prefs.speed_priority, Some(0.8));
        assert_eq!(prefs.cost_priority, None);
    }

    #[test]
    fn test_tool_definition_field_names() {
        let tool = ToolDefinition {
            name: "get_weather".to_string(),
            description: Some("Look up current weather".to_string()),
            input_schema: serde_json::json!({"type": "object"}),
        };

        let json = serde_json::to_value(&tool).unwrap();
        assert_eq!(json["name"], "get_weather");
        assert_eq!(json["inputSchema"]["type"], "object");
    }

    #[test]
    fn test_tool_choice_shapes() {
        let auto: ToolChoice = serde_json::from_value(serde_json::json!({"type": "auto"})).unwrap();
        assert_eq!(auto, ToolChoice::Auto);

        let named: ToolChoice =
            serde_json::from_value(serde_json::json!({"type": "tool", "name": "get_weather"}))
                .unwrap();
        assert_eq!(
            named,
            ToolChoice::Tool {
                name: "get_weather".to_string()
            }
        );
    }

    #[test]
    fn test_stop_reason_camel_case() {
        assert_eq!(serde_json::to_value(StopReason::EndTurn).unwrap(), "endTurn");
        assert_eq!(serde_json::to_value(StopReason::ToolUse).unwrap(), "toolUse");
    }

    #[test]
    fn test_result_serialization() {
        let result = CreateMessageResult {
            role: Role::Assistant,
            content: MessageContent::single(Content::text("Hi there")),
            model: "claude-3-sonnet".to_string(),
            stop_reason: Some(StopReason::EndTurn),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"]["type"], "text");
        assert_eq!(json["model"], "claude-3-sonnet");
        assert_eq!(json["stopReason"], "endTurn");
    }
}
