//! Secret provider implementations.
//!
//! - `env`: Environment variable provider (read-only, highest priority)
//! - `chain`: Secret chain builder wiring the providers together

pub mod chain;
pub mod env;
