//! Wire Conversion
//!
//! Translates between the wire shapes in `switchproto` and the domain
//! model. Every function here is total: malformed or unrecognized input
//! degrades field by field (placeholder text blocks, string fallbacks)
//! rather than failing the whole request.

use std::collections::BTreeMap;

use serde_json::Value;
use switchproto::{
    Content, CreateMessageParams, CreateMessageResult, ElicitParams, ElicitResult,
    ElicitValue, ElicitationAction, ElicitationSchema, FieldSchema, MessageContent, Role,
    StopReason,
};

use crate::model::{
    CompletionRequest, CompletionResponse, ContentBlock, ElicitationRequest, ElicitationResult,
    FieldSpec, FieldType, FormSchema, Message, ModelPreferences, ToolCall,
};

/// Convert inbound createMessage params into the domain request.
pub fn to_completion_request(params: &CreateMessageParams) -> CompletionRequest {
    let messages = params
        .messages
        .iter()
        .map(|message| Message {
            role: message.role,
            content: message
                .content
                .as_slice()
                .iter()
                .map(convert_content_block)
                .collect(),
        })
        .collect();

    let model_preferences = params.model_preferences.as_ref().map(|prefs| {
        ModelPreferences {
            // Unnamed hints carry no signal and are dropped.
            hints: prefs
                .hints
                .as_deref()
                .unwrap_or_default()
                .iter()
                .filter_map(|hint| hint.name.clone())
                .collect(),
            intelligence_priority: prefs.intelligence_priority,
            speed_priority: prefs.speed_priority,
            cost_priority: prefs.cost_priority,
        }
    });

    CompletionRequest {
        messages,
        model_preferences,
        system_prompt: params.system_prompt.clone(),
        max_tokens: params.max_tokens,
        stop_sequences: params.stop_sequences.clone().unwrap_or_default(),
        temperature: params.temperature,
        include_context: params.include_context,
        tools: params.tools.clone().unwrap_or_default(),
        tool_choice: params.tool_choice.clone(),
    }
}

/// Render a settled completion as the wire result.
///
/// Tool calls become extra `tool_use` blocks after the primary block, in
/// call order, so the result is always a well-formed assistant message.
pub fn to_wire_completion_result(response: &CompletionResponse) -> CreateMessageResult {
    let primary = to_wire_block(&response.content);

    let content = if response.tool_calls.is_empty() {
        MessageContent::single(primary)
    } else {
        let mut blocks = Vec::with_capacity(1 + response.tool_calls.len());
        blocks.push(primary);
        for call in &response.tool_calls {
            blocks.push(Content::tool_use(
                call.id.clone(),
                call.name.clone(),
                call.arguments.clone(),
            ));
        }
        MessageContent::many(blocks)
    };

    CreateMessageResult {
        role: Role::Assistant,
        content,
        model: response.model.clone(),
        stop_reason: Some(response.stop_reason),
    }
}

/// Read a wire completion result back into the domain response.
///
/// Inverse of [`to_wire_completion_result`], used to display answers a
/// real provider produced.
pub fn from_wire_completion_result(result: &CreateMessageResult) -> CompletionResponse {
    let mut tool_calls = Vec::new();
    let mut primary = None;

    for block in result.content.as_slice() {
        match block {
            Content::ToolUse { id, name, input } => tool_calls.push(ToolCall {
                id: id.clone(),
                name: name.clone(),
                arguments: input.clone(),
            }),
            other => {
                if primary.is_none() {
                    primary = Some(convert_content_block(other));
                }
            }
        }
    }

    CompletionResponse {
        content: primary.unwrap_or_else(|| ContentBlock::text("[no content]")),
        model: result.model.clone(),
        stop_reason: result.stop_reason.unwrap_or(StopReason::EndTurn),
        tool_calls,
    }
}

/// Convert inbound elicit params into the domain request.
///
/// A request with `requestedSchema` is a form; anything else reads as a
/// URL visit, with missing fields defaulting to empty strings.
pub fn to_elicitation_request(params: &ElicitParams, server_name: &str) -> ElicitationRequest {
    match &params.requested_schema {
        Some(schema) => ElicitationRequest::Form {
            message: params.message.clone(),
            schema: convert_form_schema(schema),
            server_name: server_name.to_string(),
        },
        None => ElicitationRequest::Url {
            message: params.message.clone(),
            url: params.url.clone().unwrap_or_default(),
            elicitation_id: params.elicitation_id.clone().unwrap_or_default(),
            server_name: server_name.to_string(),
        },
    }
}

/// Render a settled elicitation as the wire result.
///
/// Accept payload values are coerced to the narrow value set the schema
/// allows; decline and cancel omit content entirely.
pub fn to_wire_elicit_result(result: &ElicitationResult) -> ElicitResult {
    match result.action {
        ElicitationAction::Accept => {
            let content: BTreeMap<String, ElicitValue> = result
                .content
                .as_ref()
                .map(|values| {
                    values
                        .iter()
                        .map(|(name, value)| (name.clone(), coerce_value(value)))
                        .collect()
                })
                .unwrap_or_default();
            ElicitResult::accept(content)
        }
        ElicitationAction::Decline => ElicitResult::decline(),
        ElicitationAction::Cancel => ElicitResult::cancel(),
    }
}

/// Map one wire block into the closed domain union.
fn convert_content_block(block: &Content) -> ContentBlock {
    match block {
        Content::Text { text } => ContentBlock::Text { text: text.clone() },
        Content::Image { data, mime_type } => ContentBlock::Image {
            data: data.clone(),
            mime_type: mime_type.clone(),
        },
        Content::ToolUse { id, name, input } => ContentBlock::ToolUse {
            id: id.clone(),
            name: name.clone(),
            input: input.clone(),
        },
        Content::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => ContentBlock::ToolResult {
            tool_use_id: tool_use_id.clone(),
            content: content.iter().map(render_block_text).collect(),
            is_error: is_error.unwrap_or(false),
        },
        Content::Unknown(value) => ContentBlock::text(unsupported_placeholder(value)),
    }
}

fn to_wire_block(block: &ContentBlock) -> Content {
    match block {
        ContentBlock::Text { text } => Content::Text { text: text.clone() },
        ContentBlock::Image { data, mime_type } => Content::Image {
            data: data.clone(),
            mime_type: mime_type.clone(),
        },
        ContentBlock::ToolUse { id, name, input } => Content::ToolUse {
            id: id.clone(),
            name: name.clone(),
            input: input.clone(),
        },
        ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => Content::ToolResult {
            tool_use_id: tool_use_id.clone(),
            content: content.iter().map(Content::text).collect(),
            is_error: is_error.then_some(true),
        },
    }
}

/// Text rendering of a nested tool result block.
fn render_block_text(block: &Content) -> String {
    match block {
        Content::Text { text } => text.clone(),
        Content::Image { mime_type, .. } => format!("[image: {mime_type}]"),
        Content::ToolUse { name, .. } => format!("[tool use: {name}]"),
        Content::ToolResult { tool_use_id, .. } => format!("[tool result: {tool_use_id}]"),
        Content::Unknown(value) => unsupported_placeholder(value),
    }
}

fn unsupported_placeholder(value: &Value) -> String {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("untyped");
    format!("[unsupported content block: {kind}]")
}

fn convert_form_schema(schema: &ElicitationSchema) -> FormSchema {
    let properties = schema
        .properties
        .as_ref()
        .map(|props| {
            props
                .iter()
                .map(|(name, definition)| parse_field(name, definition))
                .collect()
        })
        .unwrap_or_default();

    FormSchema {
        properties,
        required: schema.required.clone().unwrap_or_default(),
    }
}

fn parse_field(name: &str, definition: &Value) -> FieldSpec {
    let schema = FieldSchema::from_value(definition);

    // Absent and unrecognized declared types both read as string.
    let field_type = match schema.field_type.as_deref() {
        Some("number") | Some("integer") => FieldType::Number,
        Some("boolean") => FieldType::Boolean,
        _ => FieldType::String,
    };

    FieldSpec {
        name: name.to_string(),
        field_type,
        description: schema.description,
        choices: schema
            .enum_values
            .unwrap_or_default()
            .iter()
            .map(value_to_string)
            .collect(),
        default: schema.default,
    }
}

/// Coerce an arbitrary domain value into the wire value set.
fn coerce_value(value: &Value) -> ElicitValue {
    match value {
        Value::Bool(flag) => ElicitValue::Bool(*flag),
        Value::Number(number) => ElicitValue::Number(number.clone()),
        Value::String(text) => ElicitValue::String(text.clone()),
        Value::Array(items) => ElicitValue::StringList(items.iter().map(value_to_string).collect()),
        other => ElicitValue::String(other.to_string()),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use switchproto::{ModelHint, SamplingMessage};

    #[test]
    fn test_hints_flatten_and_drop_unnamed() {
        let params = CreateMessageParams {
            messages: vec![SamplingMessage::user("hi")],
            max_tokens: 50,
            model_preferences: Some(switchproto::ModelPreferences {
                hints: Some(vec![
                    ModelHint::new("claude-3-sonnet"),
                    ModelHint { name: None },
                    ModelHint::new("gpt-4"),
                ]),
                ..Default::default()
            }),
            ..Default::default()
        };

        let request = to_completion_request(&params);
        assert_eq!(request.hint_names(), ["claude-3-sonnet", "gpt-4"]);
        assert_eq!(request.max_tokens, 50);
    }

    #[test]
    fn test_unknown_block_becomes_placeholder() {
        let raw = serde_json::json!({
            "messages": [{
                "role": "user",
                "content": {"type": "video", "data": "..."}
            }],
            "maxTokens": 10
        });
        let params: CreateMessageParams = serde_json::from_value(raw).unwrap();

        let request = to_completion_request(&params);
        assert_eq!(
            request.messages[0].content[0],
            ContentBlock::text("[unsupported content block: video]")
        );
    }

    #[test]
    fn test_tool_result_flattens_to_strings() {
        let wire = Content::ToolResult {
            tool_use_id: "call_9".to_string(),
            content: vec![Content::text("ok"), Content::image("data", "image/png")],
            is_error: None,
        };

        let block = convert_content_block(&wire);
        assert_eq!(
            block,
            ContentBlock::ToolResult {
                tool_use_id: "call_9".to_string(),
                content: vec!["ok".to_string(), "[image: image/png]".to_string()],
                is_error: false,
            }
        );
    }

    #[test]
    fn test_wire_result_round_trip_with_tool_calls() {
        let response = CompletionResponse::text("Let me check two things.", "claude-3-sonnet")
            .with_tool_call("call_1", "get_weather", serde_json::json!({"city": "Paris"}))
            .with_tool_call("call_2", "get_time", serde_json::json!({"zone": "CET"}));

        let wire = to_wire_completion_result(&response);
        assert_eq!(wire.role, Role::Assistant);
        let blocks = wire.content.as_slice();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].as_text(), Some("Let me check two things."));

        let restored = from_wire_completion_result(&wire);
        assert_eq!(restored, response);
    }

    #[test]
    fn test_form_field_type_defaults_to_string() {
        let params: ElicitParams = serde_json::from_value(serde_json::json!({
            "message": "Tell us more",
            "requestedSchema": {
                "type": "object",
                "properties": {
                    "note": {"description": "anything"},
                    "count": {"type": "integer"},
                    "odd": {"type": "tuple"}
                },
                "required": ["note"]
            }
        }))
        .unwrap();

        let request = to_elicitation_request(&params, "survey");
        let ElicitationRequest::Form { schema, .. } = request else {
            panic!("expected form request");
        };

        let by_name = |name: &str| {
            schema
                .properties
                .iter()
                .find(|field| field.name == name)
                .unwrap()
                .clone()
        };
        assert_eq!(by_name("note").field_type, FieldType::String);
        assert_eq!(by_name("count").field_type, FieldType::Number);
        assert_eq!(by_name("odd").field_type, FieldType::String);
        assert!(schema.is_required("note"));
    }

    #[test]
    fn test_missing_schema_reads_as_url_request() {
        let params: ElicitParams = serde_json::from_value(serde_json::json!({
            "message": "Sign in",
            "url": "https://example.com/auth",
            "elicitationId": "el-7"
        }))
        .unwrap();

        let request = to_elicitation_request(&params, "auth");
        assert_eq!(
            request,
            ElicitationRequest::Url {
                message: "Sign in".to_string(),
                url: "https://example.com/auth".to_string(),
                elicitation_id: "el-7".to_string(),
                server_name: "auth".to_string(),
            }
        );
    }

    #[test]
    fn test_accept_value_coercion() {
        let mut content = serde_json::Map::new();
        content.insert("name".to_string(), serde_json::json!("Ada"));
        content.insert("age".to_string(), serde_json::json!(36));
        content.insert("subscribed".to_string(), serde_json::json!(true));
        content.insert("tags".to_string(), serde_json::json!(["a", 2, null]));
        content.insert("extra".to_string(), serde_json::json!({"nested": 1}));

        let wire = to_wire_elicit_result(&ElicitationResult::accept(content));
        let values = wire.content.unwrap();

        assert_eq!(values["name"], ElicitValue::String("Ada".to_string()));
        assert_eq!(values["age"], ElicitValue::Number(36.into()));
        assert_eq!(values["subscribed"], ElicitValue::Bool(true));
        assert_eq!(
            values["tags"],
            ElicitValue::StringList(vec![
                "a".to_string(),
                "2".to_string(),
                "null".to_string()
            ])
        );
        assert_eq!(
            values["extra"],
            ElicitValue::String("{\"nested\":1}".to_string())
        );
    }

    #[test]
    fn test_decline_and_cancel_omit_content() {
        assert_eq!(
            to_wire_elicit_result(&ElicitationResult::decline()),
            ElicitResult::decline()
        );
        assert_eq!(
            to_wire_elicit_result(&ElicitationResult::cancel()),
            ElicitResult::cancel()
        );
    }
}
