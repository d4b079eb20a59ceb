//! Shared domain types for the data science tutor.
//!
//! Messages, sessions, LLM request/response shapes, configuration, and the
//! error taxonomy used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
