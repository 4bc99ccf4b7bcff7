use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use tokio::sync::Mutex;
use tracing::{debug, error};

use super::persistence::{JsonFile, Persistence};
use crate::errors::StoreError;

/// How `PersDict::get` compares the requested key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// The stored key equals the requested one.
    Exact,
    /// The stored key contains the requested one (case-sensitive).
    /// The first hit in key order wins.
    Partial,
}

/// Thread-safe `String -> String` dictionary persisted as a JSON object.
///
/// One mutex serializes every read, write and flush. Each mutation rewrites
/// the whole file before the lock is released, so after `add`/`delete` return
/// successfully memory and disk hold the same map. Keys iterate in
/// lexicographic order.
pub struct PersDict<P = JsonFile> {
    inner: Mutex<State>,
    backend: P,
}

struct State {
    map: BTreeMap<String, String>,
    /// Memory holds changes the last flush failed to write.
    dirty: bool,
}

impl PersDict<JsonFile> {
    /// Open the dictionary stored at `path`. A missing file yields an empty map.
    pub async fn open<T: Into<PathBuf>>(path: T) -> Result<Arc<Self>, StoreError> {
        Self::with_backend(JsonFile::new(path)).await
    }
}

impl<P: Persistence> PersDict<P> {
    /// Initialize from any persistence backend.
    pub async fn with_backend(backend: P) -> Result<Arc<Self>, StoreError> {
        let map = match backend.load().await? {
            Some(bytes) => serde_json::from_slice::<BTreeMap<String, String>>(&bytes)
                .map_err(|e| StoreError::MalformedStoreFile(format!("{}: {e}", backend.describe())))?,
            None => BTreeMap::new(),
        };
        debug!(location = %backend.describe(), entries = map.len(), "dictionary loaded");
        Ok(Arc::new(Self { inner: Mutex::new(State { map, dirty: false }), backend }))
    }

    pub fn backend(&self) -> &P {
        &self.backend
    }

    async fn flush(&self, state: &mut State) -> Result<(), StoreError> {
        let data = serde_json::to_vec(&state.map).map_err(|e| StoreError::Persistence(e.to_string()))?;
        if let Err(e) = self.backend.save(&data).await {
            error!(location = %self.backend.describe(), error = %e, "dictionary flush failed");
            state.dirty = true;
            return Err(e);
        }
        state.dirty = false;
        Ok(())
    }

    /// Snapshot of the full dictionary.
    pub async fn get_all(&self) -> BTreeMap<String, String> {
        self.inner.lock().await.map.clone()
    }

    /// All keys, in iteration order.
    pub async fn keys(&self) -> Vec<String> {
        self.inner.lock().await.map.keys().cloned().collect()
    }

    pub async fn get(&self, key: &str, mode: Match) -> Option<String> {
        let state = self.inner.lock().await;
        match mode {
            Match::Exact => state.map.get(key).cloned(),
            Match::Partial => state
                .map
                .iter()
                .find(|(k, _)| k.contains(key))
                .map(|(_, v)| v.clone()),
        }
    }

    /// Insert or overwrite and persist. Storing an identical value is a no-op
    /// unless an earlier flush failed, in which case the map is written again.
    ///
    /// On a failed flush the new value stays in memory and the error is returned.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<String>) -> Result<(), StoreError> {
        let (key, value) = (key.into(), value.into());
        let mut state = self.inner.lock().await;
        if state.map.get(&key) == Some(&value) && !state.dirty {
            return Ok(());
        }
        debug!(%key, "dictionary add");
        state.map.insert(key, value);
        self.flush(&mut state).await
    }

    /// Remove `key` and persist; returns whether it existed. Nothing is
    /// written when the key was absent and the file is up to date.
    pub async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut state = self.inner.lock().await;
        let removed = state.map.remove(key).is_some();
        if !removed && !state.dirty {
            return Ok(false);
        }
        debug!(%key, removed, "dictionary delete");
        self.flush(&mut state).await?;
        Ok(removed)
    }
}
