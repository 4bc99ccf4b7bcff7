//! Storage abstractions for service layer
//!
//! `PersDict` is the string dictionary mirrored to a JSON file on every
//! mutation; `persistence` holds the backends it writes through.

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod pers_dict;
pub mod persistence;

#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryFile;
pub use pers_dict::{Match, PersDict};
pub use persistence::{JsonFile, Persistence};
