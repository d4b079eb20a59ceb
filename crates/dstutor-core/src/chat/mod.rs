//! Conversation handling: history storage, turn processing, and the session
//! controller the HTTP layer drives.

pub mod controller;
pub mod prompt;
pub mod store;
pub mod turn;
