//! Content Types
//!
//! Types for content blocks in sampling messages.
//! Per MCP 2025-11-25 schema, including the tool blocks added by SEP-1577.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Content block in a sampling message or tool result.
///
/// Unrecognized block kinds land in the `Unknown` arm instead of failing
/// the whole message; servers are free to ship block types newer than this
/// crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    /// Text content.
    Text { text: String },

    /// Base64-encoded image.
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },

    /// Model-requested tool invocation.
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },

    /// Result of a prior tool invocation, echoed back to the model.
    ToolResult {
        #[serde(rename = "toolUseId")]
        tool_use_id: String,
        content: Vec<Content>,
        #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },

    /// Catch-all for block kinds this crate does not know about.
    #[serde(untagged)]
    Unknown(Value),
}

impl Content {
    /// Create text content.
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    /// Create image content from base64 data.
    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Content::Image {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Create a tool use block.
    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Content::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    /// Create a tool result block.
    pub fn tool_result(tool_use_id: impl Into<String>, content: Vec<Content>) -> Self {
        Content::ToolResult {
            tool_use_id: tool_use_id.into(),
            content,
            is_error: None,
        }
    }

    /// Check if this is text content.
    pub fn is_text(&self) -> bool {
        matches!(self, Content::Text { .. })
    }

    /// Get the text if this is text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Message content on the wire: a single block or an array of blocks.
///
/// `Blocks` must stay the first variant. Untagged deserialization tries
/// variants in order, and `Content`'s catch-all arm would otherwise swallow
/// arrays whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Blocks(Vec<Content>),
    Block(Content),
}

impl MessageContent {
    /// Wrap a single block.
    pub fn single(block: Content) -> Self {
        MessageContent::Block(block)
    }

    /// Wrap a list of blocks.
    pub fn many(blocks: Vec<Content>) -> Self {
        MessageContent::Blocks(blocks)
    }

    /// Flatten into a list of blocks.
    pub fn into_vec(self) -> Vec<Content> {
        match self {
            MessageContent::Block(block) => vec![block],
            MessageContent::Blocks(blocks) => blocks,
        }
    }

    /// View the blocks without consuming the wrapper.
    pub fn as_slice(&self) -> &[Content] {
        match self {
            MessageContent::Block(block) => std::slice::from_ref(block),
            MessageContent::Blocks(blocks) => blocks,
        }
    }
}

impl From<Content> for MessageContent {
    fn from(block: Content) -> Self {
        MessageContent::Block(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_content() {
        let content = Content::text("Hello, World!");

        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "Hello, World!");
    }

    #[test]
    fn test_image_content() {
        let content = Content::image("base64data...", "image/png");

        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["data"], "base64data...");
        assert_eq!(json["mimeType"], "image/png");
    }

    #[test]
    fn test_tool_use_content() {
        let content = Content::tool_use("call_1", "get_weather", serde_json::json!({"city": "Paris"}));

        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "tool_use");
        assert_eq!(json["id"], "call_1");
        assert_eq!(json["name"], "get_weather");
        assert_eq!(json["input"]["city"], "Paris");
    }

    #[test]
    fn test_tool_result_field_names() {
        let content = Content::tool_result("call_1", vec![Content::text("22C, sunny")]);

        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "tool_result");
        assert_eq!(json["toolUseId"], "call_1");
        assert_eq!(json["content"][0]["text"], "22C, sunny");
        assert!(json.get("isError").is_none());
    }

    #[test]
    fn test_unknown_block_is_captured_not_rejected() {
        let raw = serde_json::json!({
            "type": "video",
            "data": "base64video...",
            "mimeType": "video/mp4"
        });

        let parsed: Content = serde_json::from_value(raw.clone()).unwrap();
        match &parsed {
            Content::Unknown(value) => assert_eq!(value, &raw),
            other => panic!("expected Unknown, got {other:?}"),
        }

        // Unknown blocks serialize back to their original shape.
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }

    #[test]
    fn test_message_content_single_block() {
        let raw = serde_json::json!({"type": "text", "text": "hi"});
        let parsed: MessageContent = serde_json::from_value(raw).unwrap();

        assert_eq!(parsed, MessageContent::Block(Content::text("hi")));
    }

    #[test]
    fn test_message_content_block_array() {
        let raw = serde_json::json!([
            {"type": "text", "text": "one"},
            {"type": "text", "text": "two"}
        ]);
        let parsed: MessageContent = serde_json::from_value(raw).unwrap();

        assert_eq!(
            parsed.into_vec(),
            vec![Content::text("one"), Content::text("two")]
        );
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
        assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), "assistant");
    }
}
