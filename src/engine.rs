//! Evaluation context for one build invocation
//!
//! An [`Engine`] owns everything that is fixed for a build (configuration,
//! derived tag set, standard library index, source tree) plus the shared
//! [`FactsStore`]. It is `Send + Sync` and meant to be shared by every worker
//! that scans files for the host build system.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::config::BuildConfig;
use crate::eligibility::{check_facts, check_file_name, Rejection};
use crate::error::{GoResult, GoScanError};
use crate::facts::FactsStore;
use crate::fs::{walk_go_files, LocalFs, SourceTree};
use crate::scanner::FileFacts;
use crate::stdlib::StandardLibraryIndex;
use crate::tags::TagSet;

#[derive(Debug)]
pub struct Engine<T: SourceTree = LocalFs> {
    pub(crate) config: BuildConfig,
    pub(crate) tags: TagSet,
    pub(crate) stdlib: StandardLibraryIndex,
    pub(crate) tree: T,
    pub(crate) facts: FactsStore,
}

impl Engine<LocalFs> {
    /// Engine over the local file system
    pub fn local(config: BuildConfig, stdlib: StandardLibraryIndex) -> Self {
        Self::new(config, stdlib, LocalFs::new())
    }
}

impl<T: SourceTree> Engine<T> {
    pub fn new(config: BuildConfig, stdlib: StandardLibraryIndex, tree: T) -> Self {
        let tags = config.tag_set();
        debug!(
            os = %config.os,
            arch = %config.arch,
            tags = tags.len(),
            stdlib = stdlib.len(),
            roots = config.source_roots.len(),
            "engine ready"
        );
        Self {
            config,
            tags,
            stdlib,
            tree,
            facts: FactsStore::new(),
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn stdlib(&self) -> &StandardLibraryIndex {
        &self.stdlib
    }

    pub fn facts_store(&self) -> &FactsStore {
        &self.facts
    }

    /// Scan results for `path`, read through the source tree and cached by
    /// content.
    pub fn facts(&self, path: &Path) -> GoResult<Arc<FileFacts>> {
        let content = self
            .tree
            .read(path)
            .map_err(|source| GoScanError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(self.facts.facts_for(path, &content))
    }

    /// Why `path` is excluded, or `None` when it takes part in the build.
    ///
    /// File-name rules run before the file is read.
    pub fn check(&self, path: &Path) -> GoResult<Option<Rejection>> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if let Some(rejection) = check_file_name(name, &self.config) {
            return Ok(Some(rejection));
        }

        let facts = self.facts(path)?;
        Ok(check_facts(&facts, &self.tags))
    }

    /// Pre-filter entry point: should `path` be compiled/considered
    pub fn eligible(&self, path: &Path) -> GoResult<bool> {
        let rejection = self.check(path)?;
        if let Some(reason) = &rejection {
            debug!(path = %path.display(), %reason, "rejected");
        }
        Ok(rejection.is_none())
    }

    /// Eligible `.go` files anywhere under `root`, sorted
    pub fn eligible_in_tree(&self, root: &Path) -> GoResult<Vec<PathBuf>> {
        let mut eligible = Vec::new();
        for path in walk_go_files(root)? {
            if self.eligible(&path)? {
                eligible.push(path);
            }
        }
        Ok(eligible)
    }
}
