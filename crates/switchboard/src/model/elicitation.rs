//! Elicitation Model
//!
//! Domain types for server-requested user input. Form requests carry a
//! flattened, ordered field list ready for rendering; URL requests carry
//! the destination to open.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use switchproto::ElicitationAction;

/// The type a form field collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Boolean,
}

/// One renderable form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub field_type: FieldType,
    pub description: Option<String>,
    /// Allowed values for choice fields, empty for free input.
    pub choices: Vec<String>,
    /// Pre-filled value from the schema.
    pub default: Option<Value>,
}

impl FieldSpec {
    /// A plain string field with no constraints.
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::String,
            description: None,
            choices: Vec::new(),
            default: None,
        }
    }
}

/// A form's fields plus which of them must be answered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub properties: Vec<FieldSpec>,
    pub required: Vec<String>,
}

impl FormSchema {
    /// Whether the named field must be answered.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|required| required == name)
    }
}

/// A user input request as shown to the user for approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ElicitationRequest {
    /// Collect structured input through a form.
    Form {
        message: String,
        schema: FormSchema,
        server_name: String,
    },
    /// Send the user to an external address.
    Url {
        message: String,
        url: String,
        elicitation_id: String,
        server_name: String,
    },
}

impl ElicitationRequest {
    /// The message to display, whichever mode this is.
    pub fn message(&self) -> &str {
        match self {
            ElicitationRequest::Form { message, .. } => message,
            ElicitationRequest::Url { message, .. } => message,
        }
    }

    /// Which server asked.
    pub fn server_name(&self) -> &str {
        match self {
            ElicitationRequest::Form { server_name, .. } => server_name,
            ElicitationRequest::Url { server_name, .. } => server_name,
        }
    }
}

/// The answer an elicitation request settles with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElicitationResult {
    pub action: ElicitationAction,
    /// Field values keyed by property name, present only on accept.
    pub content: Option<serde_json::Map<String, Value>>,
}

impl ElicitationResult {
    pub fn accept(content: serde_json::Map<String, Value>) -> Self {
        Self {
            action: ElicitationAction::Accept,
            content: Some(content),
        }
    }

    pub fn decline() -> Self {
        Self {
            action: ElicitationAction::Decline,
            content: None,
        }
    }

    pub fn cancel() -> Self {
        Self {
            action: ElicitationAction::Cancel,
            content: None,
        }
    }
}
