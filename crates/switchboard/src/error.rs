//! Broker Errors
//!
//! Failure reasons a pending request can settle with. `Clone` so a single
//! drain reason can fan out to every pending entry.

/// Why a completion or elicitation request did not produce a normal answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrokerError {
    /// Policy mode is deny; the request was refused without user involvement.
    #[error("request denied by policy")]
    AutoDenied,

    /// The user explicitly refused the request.
    #[error("request rejected by user{}", reason_suffix(.reason))]
    UserRejected { reason: Option<String> },

    /// The requesting peer cancelled while the request was pending.
    #[error("request cancelled")]
    Cancelled,

    /// The connection dropped with the request still pending.
    #[error("connection closed")]
    ConnectionClosed,

    /// Settled with an explicit failure reason.
    #[error("request failed: {0}")]
    Rejected(String),
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(": {reason}"),
        None => String::new(),
    }
}
