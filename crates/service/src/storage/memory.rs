use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;

use super::persistence::Persistence;
use crate::errors::StoreError;

/// Test double standing in for a file. Counts writes and can be switched to
/// fail, so tests can observe flushes without touching the disk.
#[derive(Debug, Default)]
pub struct MemoryFile {
    contents: Mutex<Option<Vec<u8>>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing file contents.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self { contents: Mutex::new(Some(bytes.into())), ..Self::default() }
    }

    /// Last saved bytes. A poisoned lock still yields the stored data.
    pub fn contents(&self) -> Option<Vec<u8>> {
        match self.contents.lock() {
            Ok(c) => c.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of successful saves so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Persistence for MemoryFile {
    async fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.contents())
    }

    async fn save(&self, bytes: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Persistence("memory file is read-only".into()));
        }
        let mut contents = match self.contents.lock() {
            Ok(c) => c,
            Err(poisoned) => poisoned.into_inner(),
        };
        *contents = Some(bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".into()
    }
}
