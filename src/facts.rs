//! Scan result store
//!
//! Holds `FileFacts` keyed by file identity (path + content hash) so that a
//! file is scanned at most once per distinct content, and concurrent callers
//! never share a scratch slot. Entries are handed out as `Arc`s and never
//! mutated after insertion.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::trace;

use crate::hash::ContentHash;
use crate::scanner::{scan, FileFacts};

/// Identity of one version of a file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    pub path: PathBuf,
    pub hash: ContentHash,
}

impl FileKey {
    pub fn new(path: &Path, content: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            hash: ContentHash::from_content(content),
        }
    }
}

/// Thread-safe map of file identity to scan results
#[derive(Debug, Default)]
pub struct FactsStore {
    entries: RwLock<HashMap<FileKey, Arc<FileFacts>>>,
}

impl FactsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Facts for `content` at `path`, scanning only on first sight.
    pub fn facts_for(&self, path: &Path, content: &str) -> Arc<FileFacts> {
        let key = FileKey::new(path, content);
        if let Some(facts) = self.get(&key) {
            return facts;
        }

        // Scan outside the lock; a racing scan of the same content yields
        // identical facts, and the first insert wins.
        let facts = Arc::new(scan(content));
        trace!(
            path = %path.display(),
            imports = facts.imports.len(),
            constraints = facts.constraints.len(),
            "scanned"
        );

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(key).or_insert(facts))
    }

    pub fn get(&self, key: &FileKey) -> Option<Arc<FileFacts>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    /// Drop every cached version of `path`
    pub fn invalidate(&self, path: &Path) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|key, _| key.path != path);
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
