//! Infrastructure layer for the data science tutor.
//!
//! Contains implementations of the ports defined in `dstutor-core`: the
//! OpenAI-compatible model provider (Gemini by default), environment and OS
//! keychain secret providers, and the `config.toml` loader.

pub mod config;
pub mod keychain;
pub mod llm;
pub mod secret;
