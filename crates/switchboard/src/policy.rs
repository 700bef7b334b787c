//! Approval Policy
//!
//! How the broker disposes of an inbound request before (or instead of)
//! involving the user, and the profile-driven answers used in auto mode.

use serde::{Deserialize, Serialize};
use switchproto::StopReason;

use crate::model::{
    CompletionRequest, CompletionResponse, ContentBlock, ElicitationRequest, ElicitationResult,
    FormSchema, TestingProfile,
};

/// Model name reported when a profile answers without naming one.
const PROFILE_MODEL: &str = "testing-profile";

/// What happens when a server-initiated request arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalMode {
    /// Surface the request and wait for the user.
    #[default]
    Ask,
    /// Try scripted answers first, fall back to asking.
    Auto,
    /// Refuse without involving the user.
    Deny,
}

/// Build a completion answer from a profile, if its gates allow.
pub fn profile_completion_answer(
    profile: &TestingProfile,
    request: &CompletionRequest,
) -> Option<CompletionResponse> {
    if !profile.auto_respond {
        return None;
    }

    let text = select_response_text(profile, request)?;
    Some(CompletionResponse {
        content: ContentBlock::text(text),
        model: profile
            .default_model
            .clone()
            .unwrap_or_else(|| PROFILE_MODEL.to_string()),
        stop_reason: profile.default_stop_reason.unwrap_or(StopReason::EndTurn),
        tool_calls: Vec::new(),
    })
}

/// First matching override in list order, else the profile default.
fn select_response_text(profile: &TestingProfile, request: &CompletionRequest) -> Option<String> {
    let hints = request.hint_names();
    for rule in &profile.model_overrides {
        if hints.iter().any(|hint| pattern_matches(&rule.pattern, hint)) {
            tracing::debug!(pattern = %rule.pattern, "Model override matched");
            return Some(rule.response.clone());
        }
    }
    profile.default_response.clone()
}

/// Build an elicitation answer from a profile, if its gates allow.
///
/// Returns `None` when a required form field has no available value, so
/// the request falls through to the user instead of sending a half-filled
/// accept.
pub fn profile_elicitation_answer(
    profile: &TestingProfile,
    request: &ElicitationRequest,
) -> Option<ElicitationResult> {
    if !profile.elicitation_auto_respond {
        return None;
    }

    match request {
        // A URL visit has nothing to fill in; accepting means "opened".
        ElicitationRequest::Url { .. } => Some(ElicitationResult::accept(serde_json::Map::new())),
        ElicitationRequest::Form { schema, .. } => fill_form(profile, schema),
    }
}

fn fill_form(profile: &TestingProfile, schema: &FormSchema) -> Option<ElicitationResult> {
    let mut content = serde_json::Map::new();
    for field in &schema.properties {
        let value = profile
            .elicitation_defaults
            .get(&field.name)
            .cloned()
            .or_else(|| field.default.clone());
        if let Some(value) = value {
            content.insert(field.name.clone(), value);
        }
    }

    if schema
        .required
        .iter()
        .any(|name| !content.contains_key(name))
    {
        return None;
    }

    Some(ElicitationResult::accept(content))
}

/// Literal match with `*` wildcards.
///
/// Segments between wildcards must appear in order; the match is anchored
/// at both ends, so `claude-*` does not match `my-claude-fork`.
pub fn pattern_matches(pattern: &str, text: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == text;
    }

    let segments: Vec<&str> = pattern.split('*').collect();
    let last = segments.len() - 1;
    let mut rest = text;

    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            continue;
        }
        if i == 0 {
            match rest.strip_prefix(segment) {
                Some(after) => rest = after,
                None => return false,
            }
        } else if i == last {
            return rest.ends_with(segment);
        } else {
            match rest.find(segment) {
                Some(pos) => rest = &rest[pos + segment.len()..],
                None => return false,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldSpec, ModelPreferences};
    use pretty_assertions::assert_eq;

    fn request_with_hints(hints: &[&str]) -> CompletionRequest {
        CompletionRequest {
            model_preferences: Some(ModelPreferences {
                hints: hints.iter().map(|h| h.to_string()).collect(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_pattern_exact_without_wildcard() {
        assert!(pattern_matches("gpt-4", "gpt-4"));
        assert!(!pattern_matches("gpt-4", "gpt-4o"));
    }

    #[test]
    fn test_pattern_prefix_wildcard() {
        assert!(pattern_matches("claude-*", "claude-3-sonnet"));
        assert!(!pattern_matches("claude-*", "my-claude-fork"));
    }

    #[test]
    fn test_pattern_infix_wildcard() {
        assert!(pattern_matches("*sonnet*", "claude-3-sonnet-latest"));
        assert!(pattern_matches("claude-*-sonnet", "claude-3-sonnet"));
        assert!(!pattern_matches("claude-*-sonnet", "claude-3-haiku"));
    }

    #[test]
    fn test_pattern_star_matches_everything() {
        assert!(pattern_matches("*", "anything"));
        assert!(pattern_matches("*", ""));
    }

    #[test]
    fn test_profile_gate_blocks_answers() {
        let mut profile = TestingProfile::new("gated").with_default_response("yes");
        profile.auto_respond = false;

        assert!(profile_completion_answer(&profile, &CompletionRequest::default()).is_none());
    }

    #[test]
    fn test_override_order_and_default() {
        let profile = TestingProfile::new("scripted")
            .with_default_response("B")
            .with_override("claude-*", "A")
            .with_override("*", "C");

        let claude = profile_completion_answer(&profile, &request_with_hints(&["claude-3-sonnet"]));
        assert_eq!(claude.unwrap().content.as_text(), Some("A"));

        // A matching catch-all still beats the profile default.
        let gpt = profile_completion_answer(&profile, &request_with_hints(&["gpt-4"]));
        assert_eq!(gpt.unwrap().content.as_text(), Some("C"));

        let no_rules = TestingProfile::new("plain").with_default_response("B");
        let fallback = profile_completion_answer(&no_rules, &request_with_hints(&["gpt-4"]));
        assert_eq!(fallback.unwrap().content.as_text(), Some("B"));
    }

    #[test]
    fn test_profile_model_and_stop_reason_fallbacks() {
        let plain = TestingProfile::new("plain").with_default_response("ok");
        let answer = profile_completion_answer(&plain, &CompletionRequest::default()).unwrap();
        assert_eq!(answer.model, "testing-profile");
        assert_eq!(answer.stop_reason, StopReason::EndTurn);

        let named = TestingProfile::new("named")
            .with_default_response("ok")
            .with_default_model("fake-fast-1");
        let answer = profile_completion_answer(&named, &CompletionRequest::default()).unwrap();
        assert_eq!(answer.model, "fake-fast-1");
    }

    #[test]
    fn test_form_fill_from_profile_and_schema_defaults() {
        let profile =
            TestingProfile::new("filler").with_elicitation_default("city", serde_json::json!("Paris"));

        let schema = FormSchema {
            properties: vec![
                FieldSpec::string("city"),
                FieldSpec {
                    default: Some(serde_json::json!("no comment")),
                    ..FieldSpec::string("note")
                },
            ],
            required: vec!["city".to_string(), "note".to_string()],
        };
        let request = ElicitationRequest::Form {
            message: "Survey".to_string(),
            schema,
            server_name: "survey".to_string(),
        };

        let answer = profile_elicitation_answer(&profile, &request).unwrap();
        let content = answer.content.unwrap();
        assert_eq!(content["city"], serde_json::json!("Paris"));
        assert_eq!(content["note"], serde_json::json!("no comment"));
    }

    #[test]
    fn test_form_with_unfillable_required_field_falls_through() {
        let profile = TestingProfile::new("filler")
            .with_elicitation_default("other", serde_json::json!("x"));

        let request = ElicitationRequest::Form {
            message: "Survey".to_string(),
            schema: FormSchema {
                properties: vec![FieldSpec::string("city")],
                required: vec!["city".to_string()],
            },
            server_name: "survey".to_string(),
        };

        assert!(profile_elicitation_answer(&profile, &request).is_none());
    }

    #[test]
    fn test_url_request_gets_bare_accept() {
        let profile = TestingProfile::new("filler")
            .with_elicitation_default("unused", serde_json::json!(1));

        let request = ElicitationRequest::Url {
            message: "Sign in".to_string(),
            url: "https://example.com".to_string(),
            elicitation_id: "el-1".to_string(),
            server_name: "auth".to_string(),
        };

        let answer = profile_elicitation_answer(&profile, &request).unwrap();
        assert_eq!(answer.content, Some(serde_json::Map::new()));
    }
}
