//! Broker Events
//!
//! Seams between the broker and its embedder. `BrokerEvents` surfaces
//! requests that need a human decision; `AutoResponder` supplies
//! programmatic answers consulted in auto mode.

use async_trait::async_trait;

use crate::model::{CompletionRequest, CompletionResponse, ElicitationRequest, ElicitationResult};

/// Callbacks the broker fires as requests move through policy.
///
/// The `*_requested` callbacks fire when a request is registered and
/// waiting for the user, including auto-mode fallthrough; settle the
/// entry by its ID once the user decides. The entry already exists when
/// the callback runs, so settling from inside it is safe.
///
/// The auto-approved and auto-denied callbacks are observability hooks
/// with no-op defaults; the request in question is already settled when
/// they fire.
#[async_trait]
pub trait BrokerEvents: Send + Sync {
    /// A completion request is pending user approval.
    async fn completion_requested(
        &self,
        id: &str,
        request: &CompletionRequest,
        parent: Option<&str>,
    );

    /// An elicitation request is pending user input.
    async fn elicitation_requested(
        &self,
        id: &str,
        request: &ElicitationRequest,
        parent: Option<&str>,
    );

    /// Auto mode answered a completion without the user.
    async fn completion_auto_approved(
        &self,
        _id: &str,
        _request: &CompletionRequest,
        _response: &CompletionResponse,
    ) {
    }

    /// Auto mode answered an elicitation without the user.
    async fn elicitation_auto_approved(
        &self,
        _id: &str,
        _request: &ElicitationRequest,
        _result: &ElicitationResult,
    ) {
    }

    /// Deny mode refused a completion.
    async fn completion_auto_denied(&self, _id: &str, _request: &CompletionRequest) {}

    /// Deny mode refused an elicitation.
    async fn elicitation_auto_denied(&self, _id: &str, _request: &ElicitationRequest) {}
}

/// Programmatic answers, consulted before the active profile in auto mode.
///
/// Both methods default to deferring, so an implementation can script one
/// request family and leave the other to profiles or the user.
#[async_trait]
pub trait AutoResponder: Send + Sync {
    /// Answer a completion request, or `None` to defer.
    async fn complete(&self, _request: &CompletionRequest) -> Option<CompletionResponse> {
        None
    }

    /// Answer an elicitation request, or `None` to defer.
    async fn elicit(&self, _request: &ElicitationRequest) -> Option<ElicitationResult> {
        None
    }
}
