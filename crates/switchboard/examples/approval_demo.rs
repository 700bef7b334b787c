//! Approval Demo - drives a broker through its three decision modes
//!
//! Usage: cargo run --example approval_demo
//!
//! Plays both sides of the conversation: the transport side submits
//! incoming createMessage/elicit requests, and a console "UI" surfaces
//! them and settles each one by ID.

use std::sync::Arc;

use async_trait::async_trait;
use switchboard::model::{
    CompletionRequest, CompletionResponse, ElicitationRequest, ElicitationResult, TestingProfile,
};
use switchboard::switchproto::{
    CreateMessageParams, ElicitParams, ElicitationSchema, ModelHint, ModelPreferences,
    SamplingMessage,
};
use switchboard::{ApprovalMode, BrokerEvents, BrokerOptions, ProfileStore, RequestBroker};
use tokio::sync::mpsc;

/// Console stand-in for a real approval UI.
///
/// Prints what the broker surfaces and forwards each pending ID to
/// `main`, which plays the part of the user clicking a button.
struct ConsoleUi {
    surfaced: mpsc::UnboundedSender<String>,
}

#[async_trait]
impl BrokerEvents for ConsoleUi {
    async fn completion_requested(
        &self,
        id: &str,
        request: &CompletionRequest,
        _parent: Option<&str>,
    ) {
        println!("🔔 Completion {id} needs approval:");
        for message in &request.messages {
            for block in &message.content {
                if let Some(text) = block.as_text() {
                    println!("     [{:?}] {text}", message.role);
                }
            }
        }
        let _ = self.surfaced.send(id.to_string());
    }

    async fn elicitation_requested(
        &self,
        id: &str,
        request: &ElicitationRequest,
        _parent: Option<&str>,
    ) {
        println!("🔔 Elicitation {id}: {}", request.message());
        let _ = self.surfaced.send(id.to_string());
    }

    async fn completion_auto_approved(
        &self,
        id: &str,
        _request: &CompletionRequest,
        response: &CompletionResponse,
    ) {
        println!("🤖 {id} answered by profile: {:?}", response.content.as_text());
    }

    async fn completion_auto_denied(&self, id: &str, _request: &CompletionRequest) {
        println!("🚫 {id} denied by policy");
    }
}

fn question(text: &str, hint: Option<&str>) -> CreateMessageParams {
    CreateMessageParams {
        messages: vec![SamplingMessage::user(text)],
        max_tokens: 256,
        model_preferences: hint.map(|name| ModelPreferences {
            hints: Some(vec![ModelHint::new(name)]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let ui = Arc::new(ConsoleUi { surfaced: tx });

    println!("🎛️  Switchboard Approval Demo");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // ─── Ask mode: every request waits for a human ───
    println!();
    println!("━━━ Ask mode ━━━");
    let broker = Arc::new(RequestBroker::new(
        ui.clone(),
        BrokerOptions::default().with_server_name("demo-server"),
    ));

    let pending = tokio::spawn({
        let broker = broker.clone();
        async move {
            broker
                .handle_create_message(question("What is the capital of France?", None), None)
                .await
        }
    });

    let id = rx.recv().await.expect("completion surfaced");
    println!("👤 Approving with a hand-written answer...");
    broker.settle_completion(&id, CompletionResponse::text("Paris.", "human-operator"));
    let result = pending.await??;
    println!("📤 Wire result:\n{}", serde_json::to_string_pretty(&result)?);

    let pending = tokio::spawn({
        let broker = broker.clone();
        async move {
            broker
                .handle_elicit(
                    ElicitParams::form(
                        "Which city should the report cover?",
                        ElicitationSchema::object()
                            .with_property("city", serde_json::json!({"type": "string"}))
                            .with_required("city"),
                    ),
                    None,
                )
                .await
        }
    });

    let id = rx.recv().await.expect("elicitation surfaced");
    println!("👤 Filling in the form...");
    let mut answers = serde_json::Map::new();
    answers.insert("city".to_string(), serde_json::json!("Lyon"));
    broker.settle_elicitation(&id, ElicitationResult::accept(answers));
    let result = pending.await??;
    println!("📤 Wire result:\n{}", serde_json::to_string_pretty(&result)?);

    // ─── Deny mode: nothing reaches the user ───
    println!();
    println!("━━━ Deny mode ━━━");
    let strict = RequestBroker::new(
        ui.clone(),
        BrokerOptions::default()
            .with_server_name("demo-server")
            .with_completion_mode(ApprovalMode::Deny),
    );
    match strict
        .handle_create_message(question("Please run this for me", None), None)
        .await
    {
        Ok(_) => println!("📤 Unexpected approval"),
        Err(e) => println!("📤 Server is told: {e}"),
    }

    // ─── Auto mode: an active profile answers by model hint ───
    println!();
    println!("━━━ Auto mode ━━━");
    let profiles = Arc::new(ProfileStore::new());
    let profile = TestingProfile::new("demo")
        .with_default_response("Scripted fallback answer.")
        .with_override("claude-*", "Scripted Claude answer.");
    let profile_id = profile.id;
    profiles.save(profile);
    profiles.set_active(Some(profile_id));

    let scripted = RequestBroker::new(
        ui,
        BrokerOptions::default()
            .with_server_name("demo-server")
            .with_completion_mode(ApprovalMode::Auto),
    )
    .with_profiles(profiles);

    for hint in [Some("claude-3-sonnet"), Some("gpt-4")] {
        let result = scripted
            .handle_create_message(question("Summarize the log", hint), None)
            .await?;
        println!(
            "📤 hint {:?} -> {:?} (model {})",
            hint,
            result.content.as_slice()[0].as_text(),
            result.model
        );
    }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🏁 Done");

    Ok(())
}
