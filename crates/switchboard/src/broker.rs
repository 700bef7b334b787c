//! Request Broker
//!
//! Owns the pending registries for one server connection and drives each
//! inbound request through policy: deny settles immediately, auto tries
//! scripted answers and falls back to asking, ask suspends the handler
//! until the user settles the entry by ID.

use std::sync::Arc;

use switchproto::{CreateMessageParams, CreateMessageResult, ElicitParams, ElicitResult};

use crate::convert;
use crate::error::BrokerError;
use crate::events::{AutoResponder, BrokerEvents};
use crate::id::{RequestIdGenerator, RequestKind};
use crate::model::{CompletionRequest, CompletionResponse, ElicitationRequest, ElicitationResult};
use crate::pending::PendingMap;
use crate::policy::{self, ApprovalMode};
use crate::profiles::ProfileStore;

/// Construction-time broker settings.
#[derive(Debug, Clone)]
pub struct BrokerOptions {
    /// Name of the peer server, shown on elicitation requests.
    pub server_name: String,

    /// Policy for completion requests.
    pub completion_mode: ApprovalMode,

    /// Policy for elicitation requests.
    pub elicitation_mode: ApprovalMode,
}

impl Default for BrokerOptions {
    fn default() -> Self {
        Self {
            server_name: "unknown-server".to_string(),
            completion_mode: ApprovalMode::Ask,
            elicitation_mode: ApprovalMode::Ask,
        }
    }
}

impl BrokerOptions {
    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    pub fn with_completion_mode(mut self, mode: ApprovalMode) -> Self {
        self.completion_mode = mode;
        self
    }

    pub fn with_elicitation_mode(mut self, mode: ApprovalMode) -> Self {
        self.elicitation_mode = mode;
        self
    }
}

/// Broker for the server-initiated requests of one connection.
///
/// Handlers take `&self` and any number may be suspended at once; the
/// settlement methods may be called from any task, in any order. Each
/// broker instance is fully isolated; dropping it drops whatever is
/// still pending.
pub struct RequestBroker {
    options: BrokerOptions,
    events: Arc<dyn BrokerEvents>,
    responder: Option<Arc<dyn AutoResponder>>,
    profiles: Arc<ProfileStore>,
    ids: RequestIdGenerator,
    completions: PendingMap<CompletionResponse>,
    elicitations: PendingMap<ElicitationResult>,
}

impl RequestBroker {
    pub fn new(events: Arc<dyn BrokerEvents>, options: BrokerOptions) -> Self {
        Self {
            options,
            events,
            responder: None,
            profiles: Arc::new(ProfileStore::new()),
            ids: RequestIdGenerator::new(),
            completions: PendingMap::new(RequestKind::Completion.as_str()),
            elicitations: PendingMap::new(RequestKind::Elicitation.as_str()),
        }
    }

    /// Consult this responder before the active profile in auto mode.
    pub fn with_responder(mut self, responder: Arc<dyn AutoResponder>) -> Self {
        self.responder = Some(responder);
        self
    }

    /// Share a profile store with other brokers or the embedding UI.
    pub fn with_profiles(mut self, profiles: Arc<ProfileStore>) -> Self {
        self.profiles = profiles;
        self
    }

    /// The profile store auto mode consults.
    pub fn profiles(&self) -> &Arc<ProfileStore> {
        &self.profiles
    }

    /// Name of the peer server this broker fronts.
    pub fn server_name(&self) -> &str {
        &self.options.server_name
    }

    /// Handle an inbound `sampling/createMessage` request.
    ///
    /// `parent` is the wire ID of the server's request, passed through to
    /// the UI for correlation. In ask mode (and auto fallthrough) this
    /// suspends until someone settles the generated entry; there is no
    /// timeout, an unanswered request stays pending indefinitely.
    pub async fn handle_create_message(
        &self,
        params: CreateMessageParams,
        parent: Option<String>,
    ) -> Result<CreateMessageResult, BrokerError> {
        let request = convert::to_completion_request(&params);
        let id = self.ids.next_id(RequestKind::Completion);
        let mode = self.options.completion_mode;

        tracing::debug!(
            request_id = %id,
            mode = ?mode,
            messages = request.messages.len(),
            "Inbound completion request"
        );

        match mode {
            ApprovalMode::Deny => {
                tracing::info!(request_id = %id, "Completion request auto-denied");
                self.events.completion_auto_denied(&id, &request).await;
                return Err(BrokerError::AutoDenied);
            }
            ApprovalMode::Auto => {
                if let Some(response) = self.auto_completion_answer(&request).await {
                    tracing::info!(
                        request_id = %id,
                        model = %response.model,
                        "Completion request auto-approved"
                    );
                    self.events
                        .completion_auto_approved(&id, &request, &response)
                        .await;
                    return Ok(convert::to_wire_completion_result(&response));
                }
                tracing::debug!(request_id = %id, "No auto answer, asking the user");
            }
            ApprovalMode::Ask => {}
        }

        let (guard, rx) = self.completions.register(&id);
        self.events
            .completion_requested(&id, &request, parent.as_deref())
            .await;

        let settlement = rx.await;
        guard.disarm();

        match settlement {
            Ok(Ok(response)) => Ok(convert::to_wire_completion_result(&response)),
            Ok(Err(reason)) => Err(reason),
            // Sender dropped without settling: the registry went away.
            Err(_) => Err(BrokerError::ConnectionClosed),
        }
    }

    /// Handle an inbound `elicitation/create` request.
    ///
    /// Policy refusals surface as a wire decline rather than an error;
    /// "the user said no" is a normal elicitation outcome.
    pub async fn handle_elicit(
        &self,
        params: ElicitParams,
        parent: Option<String>,
    ) -> Result<ElicitResult, BrokerError> {
        let request = convert::to_elicitation_request(&params, &self.options.server_name);
        let id = self.ids.next_id(RequestKind::Elicitation);
        let mode = self.options.elicitation_mode;

        tracing::debug!(request_id = %id, mode = ?mode, "Inbound elicitation request");

        match mode {
            ApprovalMode::Deny => {
                tracing::info!(request_id = %id, "Elicitation request auto-declined");
                self.events.elicitation_auto_denied(&id, &request).await;
                return Ok(ElicitResult::decline());
            }
            ApprovalMode::Auto => {
                if let Some(result) = self.auto_elicitation_answer(&request).await {
                    tracing::info!(
                        request_id = %id,
                        action = ?result.action,
                        "Elicitation request auto-answered"
                    );
                    self.events
                        .elicitation_auto_approved(&id, &request, &result)
                        .await;
                    return Ok(convert::to_wire_elicit_result(&result));
                }
                tracing::debug!(request_id = %id, "No auto answer, asking the user");
            }
            ApprovalMode::Ask => {}
        }

        let (guard, rx) = self.elicitations.register(&id);
        self.events
            .elicitation_requested(&id, &request, parent.as_deref())
            .await;

        let settlement = rx.await;
        guard.disarm();

        match settlement {
            Ok(Ok(result)) => Ok(convert::to_wire_elicit_result(&result)),
            Ok(Err(BrokerError::UserRejected { .. })) => Ok(ElicitResult::decline()),
            Ok(Err(reason)) => Err(reason),
            Err(_) => Err(BrokerError::ConnectionClosed),
        }
    }

    async fn auto_completion_answer(
        &self,
        request: &CompletionRequest,
    ) -> Option<CompletionResponse> {
        if let Some(responder) = &self.responder {
            if let Some(response) = responder.complete(request).await {
                return Some(response);
            }
        }
        let profile = self.profiles.active()?;
        policy::profile_completion_answer(&profile, request)
    }

    async fn auto_elicitation_answer(
        &self,
        request: &ElicitationRequest,
    ) -> Option<ElicitationResult> {
        if let Some(responder) = &self.responder {
            if let Some(result) = responder.elicit(request).await {
                return Some(result);
            }
        }
        let profile = self.profiles.active()?;
        policy::profile_elicitation_answer(&profile, request)
    }

    /// Resolve a pending completion with the user's answer.
    pub fn settle_completion(&self, id: &str, response: CompletionResponse) -> bool {
        self.completions.settle(id, response)
    }

    /// Reject a pending completion on the user's behalf.
    pub fn reject_completion(&self, id: &str, reason: Option<String>) -> bool {
        self.completions.fail(id, BrokerError::UserRejected { reason })
    }

    /// Fail a pending completion because the peer cancelled it.
    pub fn cancel_completion(&self, id: &str) -> bool {
        self.completions.fail(id, BrokerError::Cancelled)
    }

    /// Fail a pending completion with an explicit reason.
    pub fn fail_completion(&self, id: &str, message: impl Into<String>) -> bool {
        self.completions.fail(id, BrokerError::Rejected(message.into()))
    }

    /// Resolve a pending elicitation with the user's answer.
    pub fn settle_elicitation(&self, id: &str, result: ElicitationResult) -> bool {
        self.elicitations.settle(id, result)
    }

    /// Reject a pending elicitation on the user's behalf.
    ///
    /// The suspended handler turns this into a wire decline.
    pub fn reject_elicitation(&self, id: &str, reason: Option<String>) -> bool {
        self.elicitations.fail(id, BrokerError::UserRejected { reason })
    }

    /// Fail a pending elicitation because the peer cancelled it.
    pub fn cancel_elicitation(&self, id: &str) -> bool {
        self.elicitations.fail(id, BrokerError::Cancelled)
    }

    /// Fail a pending elicitation with an explicit reason.
    ///
    /// Unlike a user rejection this propagates as an error, not a decline.
    pub fn fail_elicitation(&self, id: &str, message: impl Into<String>) -> bool {
        self.elicitations.fail(id, BrokerError::Rejected(message.into()))
    }

    /// Fail everything pending in both registries with the same reason.
    ///
    /// Called on disconnect so no handler waits on a peer that is gone.
    /// Safe to call repeatedly; later calls find nothing to fail.
    pub fn drain_all(&self, reason: BrokerError) -> usize {
        let failed = self.completions.drain(&reason) + self.elicitations.drain(&reason);
        if failed > 0 {
            tracing::info!(count = failed, reason = %reason, "Drained all pending requests");
        }
        failed
    }

    /// Completion requests awaiting settlement.
    pub fn pending_completions(&self) -> usize {
        self.completions.len()
    }

    /// Elicitation requests awaiting settlement.
    pub fn pending_elicitations(&self) -> usize {
        self.elicitations.len()
    }
}
