//! Shared building blocks for the slash-command services: logging setup,
//! filesystem helpers and the webhook wire types.

pub mod env;
pub mod types;
pub mod utils;
