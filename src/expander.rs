//! Dependency expansion
//!
//! Turns one Go file into the list of project source files it depends on:
//! scan its imports, drop standard library packages, and resolve the rest
//! through the source roots. This is the graph-edge producer handed to the
//! host build system.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::engine::Engine;
use crate::error::GoResult;
use crate::fs::{normalize, SourceTree};

/// Ordered set of dependency paths. Iterates in first-seen order so that
/// generated build graphs are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    order: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path; returns `false` if it was already present
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.order.push(path);
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.order.iter()
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.order
    }
}

impl Extend<PathBuf> for DependencySet {
    fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, iter: I) {
        for path in iter {
            self.insert(path);
        }
    }
}

impl FromIterator<PathBuf> for DependencySet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for DependencySet {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl fmt::Display for DependencySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for path in &self.order {
            writeln!(f, "{}", path.display())?;
        }
        Ok(())
    }
}

impl<T: SourceTree> Engine<T> {
    /// Project imports of `path` in declaration order, standard library
    /// and repeated packages removed.
    pub fn project_imports(&self, path: &Path) -> GoResult<Vec<String>> {
        let facts = self.facts(path)?;
        let mut seen = HashSet::new();
        Ok(facts
            .imports
            .iter()
            .filter(|package| !self.stdlib.contains(package))
            .filter(|package| seen.insert(package.as_str()))
            .cloned()
            .collect())
    }

    /// Files `path` depends on directly.
    ///
    /// A file that does not exist yet (a generated source not built so far)
    /// has no dependencies.
    pub fn expand(&self, path: &Path) -> GoResult<DependencySet> {
        if !self.tree.is_file(path) {
            debug!(path = %path.display(), "not on disk yet, no dependencies");
            return Ok(DependencySet::new());
        }

        let mut deps = DependencySet::new();
        for package in self.project_imports(path)? {
            deps.extend(self.resolve_package(&package)?);
        }

        debug!(path = %path.display(), deps = deps.len(), "expanded");
        Ok(deps)
    }

    /// Closure of [`expand`](Self::expand): dependencies of dependencies,
    /// breadth first. The starting file itself is not included, however its
    /// path is spelled.
    pub fn expand_transitive(&self, path: &Path) -> GoResult<DependencySet> {
        let start = normalize(path);
        let mut deps = DependencySet::new();
        let mut queue: VecDeque<PathBuf> = self.expand(path)?.into_iter().collect();

        while let Some(next) = queue.pop_front() {
            if normalize(&next) == start || !deps.insert(next.clone()) {
                continue;
            }
            for dep in self.expand(&next)? {
                if !deps.contains(&dep) {
                    queue.push_back(dep);
                }
            }
        }

        Ok(deps)
    }
}
