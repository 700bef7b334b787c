//! switchboard - Approval broker for MCP server-initiated requests
//!
//! An MCP server can turn the tables on its client: `sampling/createMessage`
//! asks the client to run an LLM completion, `elicitation/create` asks it to
//! collect user input. This crate sits between the transport and the user
//! for exactly those two request families. It converts wire payloads into a
//! typed domain model, applies a per-kind approval policy, and tracks every
//! request waiting on a human as a pending entry that is settled by ID from
//! the outside.
//!
//! # Policy modes
//!
//! - **Ask** (default): surface the request through [`BrokerEvents`] and
//!   suspend until someone settles it. No timeout; unanswered means
//!   pending forever.
//! - **Auto**: try an [`AutoResponder`], then the active
//!   [`TestingProfile`](model::TestingProfile); if neither answers, fall
//!   through to ask.
//! - **Deny**: refuse without involving the user. Completions fail with
//!   [`BrokerError::AutoDenied`]; elicitations decline politely.
//!
//! Whatever happens, every accepted request settles exactly once:
//! resolved, rejected, or swept by [`RequestBroker::drain_all`] when the
//! connection goes away.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use switchboard::{BrokerEvents, BrokerOptions, RequestBroker};
//!
//! struct Ui;
//!
//! #[async_trait::async_trait]
//! impl BrokerEvents for Ui {
//!     async fn completion_requested(
//!         &self,
//!         id: &str,
//!         request: &switchboard::model::CompletionRequest,
//!         _parent: Option<&str>,
//!     ) {
//!         // Render the request; later, from any task:
//!         // broker.settle_completion(id, response) or
//!         // broker.reject_completion(id, Some("no".into()))
//!     }
//!
//!     async fn elicitation_requested(
//!         &self,
//!         id: &str,
//!         request: &switchboard::model::ElicitationRequest,
//!         _parent: Option<&str>,
//!     ) {
//!     }
//! }
//!
//! let broker = RequestBroker::new(
//!     Arc::new(Ui),
//!     BrokerOptions::default().with_server_name("travel-server"),
//! );
//!
//! // Wire dispatch, driven by the transport:
//! // let result = broker.handle_create_message(params, Some(rpc_id)).await?;
//! ```

pub mod broker;
pub mod convert;
pub mod error;
pub mod events;
pub mod id;
pub mod model;
pub mod pending;
pub mod policy;
pub mod profiles;

// Re-export the main surface at crate root
pub use broker::{BrokerOptions, RequestBroker};
pub use error::BrokerError;
pub use events::{AutoResponder, BrokerEvents};
pub use id::{RequestIdGenerator, RequestKind};
pub use pending::PendingMap;
pub use policy::ApprovalMode;
pub use profiles::ProfileStore;

// Wire types travel with the broker API
pub use switchproto;
