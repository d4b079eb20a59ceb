//! HTTP layer for the tutor.
//!
//! A server-rendered chat page at `/`, a JSON API at `/api/v1/` using the
//! envelope response format, and `/health`.

pub mod error;
pub mod handlers;
pub mod page;
pub mod response;
pub mod router;
