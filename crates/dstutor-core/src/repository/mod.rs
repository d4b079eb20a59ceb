//! Storage port definitions.
//!
//! The infrastructure layer (dstutor-infra) implements these traits. The core
//! crate never depends on a specific storage technology.

pub mod secret;
