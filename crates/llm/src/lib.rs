//! LLM client and prompt building for the AI coach
//!
//! The client speaks the OpenAI-compatible chat completions protocol. Prompt
//! construction is pure and deterministic so it can be tested without a
//! network.

#![allow(clippy::missing_errors_doc, reason = "errors are LlmError variants documented on the enum")]

mod ai_types;
mod client;
mod coach;
pub mod error;
pub mod prompt;

pub use ai_types::{ChatRequest, Message};
pub use client::{LlmClient, truncate};
pub use coach::CoachReply;
pub use error::LlmError;
pub use prompt::{CoachContext, build_system_prompt, extract_suggested_actions, next_step_label};
