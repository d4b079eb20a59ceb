//! Business logic services.
//!
//! Services depend on traits (ports), never on concrete infrastructure.

pub mod secret;
