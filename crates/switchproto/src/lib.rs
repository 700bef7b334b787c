//! switchproto - Wire types for MCP server-initiated requests
//!
//! Serde models for the two request families an MCP server may send back
//! to its connected client, per the MCP 2025-11-25 schema:
//!
//! - **Sampling**: `sampling/createMessage` asks the client to run an LLM
//!   completion, optionally with tools (SEP-1577)
//! - **Elicitation**: `elicitation/create` asks the client to collect
//!   structured user input through a form, or to send the user to a URL
//!
//! Only the request params and result payloads are modelled here. The
//! JSON-RPC envelope, transport and session handshake belong to the
//! embedding client.

pub mod content;
pub mod elicitation;
pub mod sampling;

// Re-export commonly used types at crate root
pub use content::{Content, MessageContent, Role};
pub use elicitation::{
    ElicitParams, ElicitResult, ElicitValue, ElicitationAction, ElicitationSchema, FieldSchema,
};
pub use sampling::{
    CreateMessageParams, CreateMessageResult, IncludeContext, ModelHint, ModelPreferences,
    SamplingMessage, StopReason, ToolChoice, ToolDefinition,
};
