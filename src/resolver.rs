//! Package resolution
//!
//! Maps an import path to the files implementing it by searching each source
//! root for `<root>/src/<package>/*.go`. The first root that has any `.go`
//! file for the package wins; roots are never merged. Matched files are then
//! filtered for eligibility, and rejected ones are dropped silently.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::engine::Engine;
use crate::error::{GoResult, GoScanError};
use crate::fs::SourceTree;

/// Directory a package would occupy under `root`.
///
/// `None` for relative imports (`./x`, `../x`) and any path with a `.` or
/// `..` segment; those never name a directory under `<root>/src`.
pub fn package_dir(root: &Path, package: &str) -> Option<PathBuf> {
    let mut dir = root.join("src");
    for segment in package.split('/').filter(|segment| !segment.is_empty()) {
        if segment == "." || segment == ".." {
            return None;
        }
        dir.push(segment);
    }
    Some(dir)
}

/// Where a package was found and the `.go` files it holds (unfiltered)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLocation {
    pub root: PathBuf,
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

impl<T: SourceTree> Engine<T> {
    /// First source root holding any `.go` file for `package`
    pub fn locate_package(&self, package: &str) -> GoResult<Option<PackageLocation>> {
        for root in &self.config.source_roots {
            let Some(dir) = package_dir(root, package) else {
                debug!(package, "relative import path, not resolvable");
                return Ok(None);
            };
            let files = self
                .tree
                .go_files(&dir)
                .map_err(|source| GoScanError::ReadFailed {
                    path: dir.clone(),
                    source,
                })?;
            if !files.is_empty() {
                return Ok(Some(PackageLocation {
                    root: root.clone(),
                    dir,
                    files,
                }));
            }
        }
        Ok(None)
    }

    /// Eligible files of `package`, in directory order.
    ///
    /// A package found under no root resolves to an empty list; whether
    /// that is fatal is the caller's call.
    pub fn resolve_package(&self, package: &str) -> GoResult<Vec<PathBuf>> {
        let Some(location) = self.locate_package(package)? else {
            debug!(package, "package not found under any source root");
            return Ok(Vec::new());
        };

        let mut eligible = Vec::with_capacity(location.files.len());
        for file in location.files {
            match self.eligible(&file) {
                Ok(true) => eligible.push(file),
                Ok(false) => {}
                Err(e) => warn!(path = %file.display(), error = %e, "skipping unreadable file"),
            }
        }

        debug!(
            package,
            dir = %location.dir.display(),
            files = eligible.len(),
            "resolved package"
        );
        Ok(eligible)
    }
}
