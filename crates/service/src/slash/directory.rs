//! `/cce`: show the picture of a team member found by name.

use std::{collections::BTreeSet, path::Path};

use tracing::info;

use super::Reply;
use crate::errors::ServiceError;

pub const COMMAND: &str = "/cce";

const DESCRIPTION: &str = "Show the picture of a team member";

const USAGE: &str = "Commands:
- `/cce help`
shows this help
- `/cce PERSON`
shows the picture of PERSON
";

/// Placeholder replaced by the matched name in the picture URL template.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Immutable set of lowercase member names.
#[derive(Debug, Clone)]
pub struct Directory {
    names: BTreeSet<String>,
    picture_url: String,
}

impl Directory {
    /// Read one name per line; blank lines are skipped.
    pub async fn load(path: impl AsRef<Path>, picture_url: impl Into<String>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ServiceError::Directory(format!("{}: {e}", path.display())))?;
        let dir = Self::from_names(content.lines(), picture_url);
        info!(file = %path.display(), names = dir.len(), "member directory loaded");
        Ok(dir)
    }

    pub fn from_names<I, S>(names: I, picture_url: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names, picture_url: picture_url.into() }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Answer one `/cce` invocation.
    pub fn lookup(&self, raw_text: &str) -> Reply {
        let tokens: Vec<&str> = raw_text.split(' ').collect();
        let person = match tokens.as_slice() {
            [person] if !person.trim().is_empty() && *person != "help" => *person,
            _ => return Reply::with_usage(DESCRIPTION, USAGE),
        };

        let needle = person.to_lowercase();
        match self.names.iter().find(|candidate| candidate.contains(&needle)) {
            Some(name) => Reply::public(format!("![]({})", self.picture_url.replace(NAME_PLACEHOLDER, name))),
            None => Reply::private(format!("Could not find a member matching: {person}")),
        }
    }
}
