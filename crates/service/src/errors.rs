use thiserror::Error;

/// Failures of the persistent dictionary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file exists but is not a JSON object of strings.
    #[error("malformed store file: {0}")]
    MalformedStoreFile(String),
    #[error("cannot read store file: {0}")]
    Read(String),
    /// A flush failed after the in-memory map was already updated.
    #[error("persistence error: {0}")]
    Persistence(String),
}

/// Failures loading the read-only lookup data of a slash command.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("directory error: {0}")]
    Directory(String),
}
