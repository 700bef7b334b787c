//! Elicitation Types
//!
//! Wire shapes for server-initiated `elicitation/create` requests.
//! Per MCP 2025-11-25 schema: form mode carries a flat object schema,
//! URL mode sends the user to an external address.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters of an `elicitation/create` request.
///
/// One permissive struct covers both modes. A request with
/// `requested_schema` is a form request; without one it is a URL request
/// and `url` / `elicitation_id` carry the destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElicitParams {
    /// Message to display to the user.
    pub message: String,

    /// Schema for the requested input (form mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_schema: Option<ElicitationSchema>,

    /// Address the user should visit (URL mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Server-side correlation ID for the URL visit (URL mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elicitation_id: Option<String>,
}

impl ElicitParams {
    /// Create a form-mode request.
    pub fn form(message: impl Into<String>, schema: ElicitationSchema) -> Self {
        Self {
            message: message.into(),
            requested_schema: Some(schema),
            url: None,
            elicitation_id: None,
        }
    }

    /// Create a URL-mode request.
    pub fn url(
        message: impl Into<String>,
        url: impl Into<String>,
        elicitation_id: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            requested_schema: None,
            url: Some(url.into()),
            elicitation_id: Some(elicitation_id.into()),
        }
    }
}

/// Schema for elicitation input (restricted subset of JSON Schema).
///
/// Property definitions stay as raw values so a re-serialized request
/// round-trips keys this crate does not model; use [`FieldSchema::from_value`]
/// to read one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElicitationSchema {
    #[serde(rename = "type")]
    pub schema_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ElicitationSchema {
    /// Create an empty object schema.
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: Some(serde_json::Map::new()),
            required: None,
        }
    }

    /// Add a property definition.
    pub fn with_property(mut self, name: &str, definition: Value) -> Self {
        self.properties
            .get_or_insert_with(serde_json::Map::new)
            .insert(name.to_string(), definition);
        self
    }

    /// Mark a property as required.
    pub fn with_required(mut self, name: &str) -> Self {
        self.required
            .get_or_insert_with(Vec::new)
            .push(name.to_string());
        self
    }
}

/// A single property definition inside an elicitation schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// Declared type. Absent or unrecognized values read as "string".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Allowed values for choice fields.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    /// Pre-filled value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldSchema {
    /// Read a property definition out of a raw schema value.
    ///
    /// Malformed definitions degrade to an all-defaults schema instead of
    /// failing; unknown keys are ignored.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// A value the user supplied for one form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElicitValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    StringList(Vec<String>),
}

impl From<bool> for ElicitValue {
    fn from(value: bool) -> Self {
        ElicitValue::Bool(value)
    }
}

impl From<&str> for ElicitValue {
    fn from(value: &str) -> Self {
        ElicitValue::String(value.to_string())
    }
}

impl From<String> for ElicitValue {
    fn from(value: String) -> Self {
        ElicitValue::String(value)
    }
}

impl From<i64> for ElicitValue {
    fn from(value: i64) -> Self {
        ElicitValue::Number(value.into())
    }
}

/// User action in response to elicitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElicitationAction {
    /// User provided valid input.
    Accept,
    /// User declined to provide input.
    Decline,
    /// User dismissed without choosing.
    Cancel,
}

/// Result of an `elicitation/create` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElicitResult {
    /// What the user did.
    pub action: ElicitationAction,

    /// Collected field values, present only on accept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, ElicitValue>>,
}

impl ElicitResult {
    /// An accept result carrying field values.
    pub fn accept(content: BTreeMap<String, ElicitValue>) -> Self {
        Self {
            action: ElicitationAction::Accept,
            content: Some(content),
        }
    }

    /// A decline result.
    pub fn decline() -> Self {
        Self {
            action: ElicitationAction::Decline,
            content: None,
        }
    }

    /// A cancel result.
    pub fn cancel() -> Self {
        Self {
            action: ElicitationAction::Cancel,
            content: None,
        }
    }
}
