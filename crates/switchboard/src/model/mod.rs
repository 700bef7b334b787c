//! Domain Model
//!
//! UI-facing request and response types, decoupled from the wire shapes:
//!
//! - `completion`: Completion requests/responses with typed content blocks
//! - `elicitation`: Form and URL elicitation requests and their results
//! - `profile`: Testing profiles for scripted auto-responses
//!
//! Wire enums whose shape is identical on both sides (`Role`,
//! `IncludeContext`, `StopReason`, tool definitions, elicitation actions)
//! are reused from `switchproto` rather than mirrored.

pub mod completion;
pub mod elicitation;
pub mod profile;

pub use completion::{
    CompletionRequest, CompletionResponse, ContentBlock, Message, ModelPreferences, ToolCall,
};
pub use elicitation::{
    ElicitationRequest, ElicitationResult, FieldSpec, FieldType, FormSchema,
};
pub use profile::{ModelOverride, TestingProfile};
