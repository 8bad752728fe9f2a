//! Source tree access
//!
//! The resolver and expander read files and list package directories only
//! through [`SourceTree`], so tests can substitute an in-memory tree.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::GoResult;

/// Go source file extension (without the dot)
pub const GO_EXTENSION: &str = "go";

/// Read-only view of the files a build can see
pub trait SourceTree: Send + Sync {
    /// Read file content. Bytes that are not valid UTF-8 are replaced, so
    /// a stray Latin-1 comment never hides a file.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Check whether a regular file exists at `path`
    fn is_file(&self, path: &Path) -> bool;

    /// `.go` files directly inside `dir`, sorted by path.
    ///
    /// A missing directory yields an empty list.
    fn go_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Local disk implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl SourceTree for LocalFs {
    fn read(&self, path: &Path) -> io::Result<String> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn go_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if is_go_file(&path) && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

pub fn is_go_file(path: &Path) -> bool {
    path.extension().map(|e| e == GO_EXTENSION).unwrap_or(false)
}

/// Absolute, lexically cleaned form of `path` for identity comparisons.
///
/// Relative paths are joined onto the working directory; `.` segments are
/// dropped and `..` pops the previous segment. Symlinks are not followed.
pub fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Every `.go` file under `root`, sorted. Hidden directories and
/// gitignored paths are skipped.
pub fn walk_go_files(root: &Path) -> GoResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in ignore::WalkBuilder::new(root).build() {
        let entry = entry?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file && is_go_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// In-memory source tree for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
    pub files: std::collections::BTreeMap<PathBuf, String>,
}

#[cfg(test)]
impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

#[cfg(test)]
impl SourceTree for MemoryTree {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn go_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        Ok(self
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir) && is_go_file(p))
            .cloned()
            .collect())
    }
}
