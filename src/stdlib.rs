//! Standard library classification
//!
//! The toolchain is the authority on which import paths it supplies. The
//! index is built once per invocation from two package listings (everything
//! `go list ...` can see, minus what `go list ./...` reports for the project)
//! and is read-only afterwards.

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardLibraryIndex {
    packages: HashSet<String>,
}

impl StandardLibraryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packages visible to the toolchain that are not project packages
    pub fn from_listings<A, P>(all_packages: A, project_packages: P) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let project: HashSet<String> = project_packages.into_iter().map(Into::into).collect();
        let packages = all_packages
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| !project.contains(p))
            .collect();
        Self { packages }
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.contains(package)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StandardLibraryIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            packages: iter.into_iter().map(Into::into).collect(),
        }
    }
}
