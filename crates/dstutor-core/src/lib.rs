//! Conversation logic and port definitions for the data science tutor.
//!
//! This crate defines the "ports" (traits) that the infrastructure layer
//! implements: model providers and secret providers. It depends only on
//! `dstutor-types` and `dstutor-observe` -- never on `dstutor-infra` or any
//! network/IO crate.

pub mod chat;
pub mod llm;
pub mod repository;
pub mod service;
