//! Durable-storage backends for the tag document.
//!
//! # Responsibility
//! - Provide whole-document read/replace primitives for the tag store.
//! - Keep file-system details out of store orchestration.
//!
//! # Invariants
//! - `write` replaces the previous content atomically from the caller's
//!   perspective; interrupted writes never leave a truncated document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Whole-document storage seam for [`crate::store::tag_store::TagStore`].
pub trait StorageBackend {
    /// Reads the full document, or `None` when no document exists yet.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replaces the full document content.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// File-backed storage using write-then-rename replacement.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        // Write a sibling file first so a crash mid-write leaves the old
        // document intact; rename within one directory is the atomic step.
        let staging = self.staging_path();
        fs::write(&staging, bytes)?;
        fs::rename(&staging, &self.path)
    }
}

/// In-memory storage for tests and host-free smoke runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    content: Option<Vec<u8>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-seeded with existing document bytes.
    pub fn with_content(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            content: Some(bytes.into()),
        }
    }

    /// Returns the last written document bytes, if any.
    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.content.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.content = Some(bytes.to_vec());
        Ok(())
    }
}
