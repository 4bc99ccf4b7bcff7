//! `/meme`: user-configured activation phrases mapped to response texts.

use tracing::debug;

use super::Reply;
use crate::errors::StoreError;
use crate::storage::{Match, PersDict, Persistence};

pub const COMMAND: &str = "/meme";

const DESCRIPTION: &str = "Show a configurable response in channel";

const USAGE: &str = "Commands:
- `/meme help`
shows this help
- `/meme list`
shows the list of activation phrases
- `/meme add KEY VALUE`
add KEY as activation phrase that will show VALUE, possibly overriding a previous entry
- `/meme del KEY`
delete the activation phrase KEY
- `/meme PHRASE`
show a response partially matching the given PHRASE
";

/// Run one `/meme` invocation against `store`.
///
/// Bad input never fails: it becomes a private reply with the usage block.
/// Only store faults are returned as errors.
pub async fn dispatch<P: Persistence>(store: &PersDict<P>, raw_text: &str) -> Result<Reply, StoreError> {
    if raw_text.trim().is_empty() {
        return Ok(help());
    }

    let tokens: Vec<&str> = raw_text.split(' ').collect();
    debug!(subcommand = tokens[0], args = tokens.len() - 1, "meme dispatch");

    let reply = match tokens.as_slice() {
        ["list", ..] => {
            let keys = store.keys().await;
            if keys.is_empty() {
                Reply::private("no entries available")
            } else {
                let lines: Vec<String> = keys.iter().map(|k| format!("- {k}")).collect();
                Reply::private(lines.join("\n"))
            }
        }
        ["help", ..] => help(),
        ["add", key, value] => {
            store.add(*key, *value).await?;
            Reply::private("OK")
        }
        ["add", ..] => Reply::with_usage("invalid add command", USAGE),
        ["del", key] => {
            if store.delete(key).await? {
                Reply::private("OK")
            } else {
                Reply::private(format!("activation phrase `{key}` not found"))
            }
        }
        ["del", ..] => Reply::with_usage("invalid del command", USAGE),
        [phrase] => match store.get(phrase, Match::Partial).await {
            Some(value) => Reply::public(value),
            None => Reply::private(format!("invalid activation phrase `{phrase}`")),
        },
        _ => Reply::with_usage("invalid command", USAGE),
    };
    Ok(reply)
}

fn help() -> Reply {
    Reply::with_usage(DESCRIPTION, USAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryFile;
    use std::sync::Arc;

    async fn store_with(entries: &[(&str, &str)]) -> Arc<PersDict<MemoryFile>> {
        let store = PersDict::with_backend(MemoryFile::new()).await.expect("memory store");
        for (k, v) in entries {
            store.add(*k, *v).await.expect("seed");
        }
        store
    }

    #[tokio::test]
    async fn list_on_empty_store() -> Result<(), StoreError> {
        let store = store_with(&[]).await;
        assert_eq!(dispatch(&store, "list").await?, Reply::private("no entries available"));
        Ok(())
    }

    #[tokio::test]
    async fn list_shows_bulleted_keys() -> Result<(), StoreError> {
        let store = store_with(&[("lol", "http://x"), ("cat", "http://c")]).await;
        let reply = dispatch(&store, "list extra ignored").await?;
        assert_eq!(reply, Reply::private("- cat\n- lol"));
        Ok(())
    }

    #[tokio::test]
    async fn lookup_is_public_and_partial() -> Result<(), StoreError> {
        let store = store_with(&[("lol", "http://x")]).await;
        assert_eq!(dispatch(&store, "lol").await?, Reply::public("http://x"));
        assert_eq!(dispatch(&store, "lo").await?, Reply::public("http://x"));
        assert_eq!(
            dispatch(&store, "nope").await?,
            Reply::private("invalid activation phrase `nope`")
        );
        Ok(())
    }

    #[tokio::test]
    async fn add_then_lookup() -> Result<(), StoreError> {
        let store = store_with(&[]).await;
        assert_eq!(dispatch(&store, "add foo bar").await?, Reply::private("OK"));
        assert_eq!(store.get("foo", Match::Exact).await.as_deref(), Some("bar"));
        assert_eq!(store.backend().writes(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn malformed_add_and_del_show_usage() -> Result<(), StoreError> {
        let store = store_with(&[]).await;
        for (input, complaint) in [
            ("add foo", "invalid add command"),
            ("add foo bar baz", "invalid add command"),
            ("add foo  bar", "invalid add command"),
            ("del", "invalid del command"),
            ("del a b", "invalid del command"),
            ("what is this", "invalid command"),
        ] {
            let reply = dispatch(&store, input).await?;
            assert!(reply.private, "{input}");
            assert_eq!(reply.text, format!("{complaint}\n\n{USAGE}"), "{input}");
        }
        assert_eq!(store.backend().writes(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn del_reports_missing_and_removes_present() -> Result<(), StoreError> {
        let store = store_with(&[("gone", "soon")]).await;
        assert_eq!(
            dispatch(&store, "del missingkey").await?,
            Reply::private("activation phrase `missingkey` not found")
        );
        assert_eq!(dispatch(&store, "del gone").await?, Reply::private("OK"));
        assert!(store.keys().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn empty_input_is_help() -> Result<(), StoreError> {
        let store = store_with(&[]).await;
        let help = dispatch(&store, "help").await?;
        assert!(help.private);
        assert!(help.text.starts_with(DESCRIPTION));
        assert!(help.text.contains("- `/meme add KEY VALUE`"));
        assert_eq!(dispatch(&store, "").await?, help);
        assert_eq!(dispatch(&store, "   ").await?, help);
        Ok(())
    }

    #[tokio::test]
    async fn store_faults_propagate() -> Result<(), StoreError> {
        let store = store_with(&[]).await;
        store.backend().fail_writes(true);
        assert!(matches!(dispatch(&store, "add k v").await, Err(StoreError::Persistence(_))));
        // lookups still answer from memory
        assert_eq!(dispatch(&store, "k").await?, Reply::public("v"));
        Ok(())
    }
}
