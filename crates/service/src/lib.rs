//! Service layer for the slash-command bots.
//! - `storage`: the JSON-file backed dictionary and its persistence backends.
//! - `slash`: command parsing and replies, independent of HTTP.
//! - `errors`: error types shared by both.

pub mod errors;
pub mod slash;
pub mod storage;
