//! Model access: the provider port, its boxed wrapper, and the per-turn client.

pub mod box_provider;
pub mod client;
pub mod provider;
