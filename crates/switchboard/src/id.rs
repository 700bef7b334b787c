//! Request IDs
//!
//! Generates the IDs pending requests are tracked and settled by.

use std::sync::atomic::{AtomicU64, Ordering};

/// The two request families the broker intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Completion,
    Elicitation,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Completion => "completion",
            RequestKind::Elicitation => "elicitation",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generator for request IDs of the form `<kind>-<unix-millis>-<counter>`.
///
/// The counter makes same-millisecond bursts collision-free within one
/// generator. IDs are unique per broker instance, not across processes.
#[derive(Debug, Default)]
pub struct RequestIdGenerator {
    counter: AtomicU64,
}

impl RequestIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Produce the next ID for the given kind.
    pub fn next_id(&self, kind: RequestKind) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", kind.as_str(), millis, seq)
    }
}
