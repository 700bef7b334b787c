//! Testing Profiles
//!
//! Scripted answers for auto mode. A profile describes what a simulated
//! model or user would reply, so servers can be exercised without a human
//! clicking through every request.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use switchproto::StopReason;
use uuid::Uuid;

/// Pattern-matched response override for completion requests.
///
/// `pattern` is literal text with `*` wildcards, matched against the
/// request's model hints. The first matching override in list order wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOverride {
    pub pattern: String,
    pub response: String,
}

/// A named bundle of scripted answers.
///
/// Profiles are immutable once stored; edits replace the whole profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestingProfile {
    pub id: Uuid,
    pub name: String,

    /// Label for the completion source this profile simulates.
    pub sampling_provider: String,

    /// Gate for profile-driven completion answers.
    pub auto_respond: bool,

    /// Completion text when no override matches.
    pub default_response: Option<String>,

    /// Model name reported on profile-built responses.
    pub default_model: Option<String>,

    /// Stop reason reported on profile-built responses.
    pub default_stop_reason: Option<StopReason>,

    /// Hint-matched response overrides, evaluated in order.
    pub model_overrides: Vec<ModelOverride>,

    /// Gate for profile-driven elicitation answers.
    pub elicitation_auto_respond: bool,

    /// Form field values keyed by property name.
    pub elicitation_defaults: serde_json::Map<String, Value>,
}

impl TestingProfile {
    /// Create a profile with a fresh ID and everything switched off.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sampling_provider: "stub".to_string(),
            auto_respond: false,
            default_response: None,
            default_model: None,
            default_stop_reason: None,
            model_overrides: Vec::new(),
            elicitation_auto_respond: false,
            elicitation_defaults: serde_json::Map::new(),
        }
    }

    /// Enable completion auto-response with the given default text.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.auto_respond = true;
        self.default_response = Some(response.into());
        self
    }

    /// Report this model name on profile-built responses.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    /// Add a hint-matched override.
    pub fn with_override(mut self, pattern: impl Into<String>, response: impl Into<String>) -> Self {
        self.model_overrides.push(ModelOverride {
            pattern: pattern.into(),
            response: response.into(),
        });
        self
    }

    /// Enable elicitation auto-response with the given field value.
    pub fn with_elicitation_default(mut self, field: impl Into<String>, value: Value) -> Self {
        self.elicitation_auto_respond = true;
        self.elicitation_defaults.insert(field.into(), value);
        self
    }
}
