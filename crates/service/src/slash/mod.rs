//! Slash-command logic: turn the argument text of a command into a reply.
//!
//! Transport concerns (token checks, the response envelope) live in the
//! server crate; everything here is plain functions over injected state.

pub mod cerino;
pub mod directory;
pub mod meme;

/// What to send back to the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Only the invoking user should see the reply.
    pub private: bool,
}

impl Reply {
    pub fn private(text: impl Into<String>) -> Self {
        Self { text: text.into(), private: true }
    }

    pub fn public(text: impl Into<String>) -> Self {
        Self { text: text.into(), private: false }
    }

    /// A complaint followed by the usage block, always private.
    pub(crate) fn with_usage(complaint: &str, usage: &str) -> Self {
        Self::private(format!("{complaint}\n\n{usage}"))
    }
}
