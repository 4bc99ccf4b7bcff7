use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Fields posted by the chat platform when a user runs a slash command.
///
/// The payload arrives form-encoded; every field is optional so that a
/// partial request still decodes and can be rejected by the token check.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct SlashRequest {
    pub token: Option<String>,
    pub command: Option<String>,
    pub text: Option<String>,
    pub user_name: Option<String>,
    pub channel_name: Option<String>,
    pub channel_id: Option<String>,
    pub team_id: Option<String>,
    pub team_domain: Option<String>,
    pub response_url: Option<String>,
}

impl SlashRequest {
    /// True when both the command name and the shared token match.
    pub fn is_authorized(&self, command: &str, token: &str) -> bool {
        self.command.as_deref() == Some(command) && self.token.as_deref() == Some(token)
    }

    /// The argument text, empty when absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Only the invoking user sees the reply.
    Ephemeral,
    /// Everyone in the channel sees the reply.
    InChannel,
}

impl ResponseType {
    pub fn from_private(private: bool) -> Self {
        if private { Self::Ephemeral } else { Self::InChannel }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SlashResponse {
    pub response_type: ResponseType,
    pub text: String,
}

impl SlashResponse {
    pub fn new(text: impl Into<String>, private: bool) -> Self {
        Self { response_type: ResponseType::from_private(private), text: text.into() }
    }
}
