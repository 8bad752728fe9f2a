//! File eligibility
//!
//! Decides whether a `.go` file takes part in a build. Cheap file-name rules
//! run first (`_test`, `_GOOS`, `_GOARCH`, `_GOOS_GOARCH` suffixes); only
//! files that survive them are scanned for `// +build` constraints.

use std::fmt;

use crate::config::BuildConfig;
use crate::constraint::evaluate;
use crate::platform::{is_known_arch, is_known_os};
use crate::scanner::{scan_constraints, FileFacts};
use crate::tags::TagSet;

/// Why a file was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// `*_test.go`
    TestFile,
    /// `*_GOOS.go` for another OS
    OsSuffix(String),
    /// `*_GOARCH.go` for another architecture
    ArchSuffix(String),
    /// `*_GOOS_GOARCH.go` with the right arch but another OS
    OsArchSuffix(String),
    /// `// +build` lines not satisfied
    Constraints,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TestFile => write!(f, "test file"),
            Rejection::OsSuffix(os) => write!(f, "file name targets OS '{os}'"),
            Rejection::ArchSuffix(arch) => write!(f, "file name targets arch '{arch}'"),
            Rejection::OsArchSuffix(os) => write!(f, "file name targets OS '{os}' for this arch"),
            Rejection::Constraints => write!(f, "build constraints not satisfied"),
        }
    }
}

/// `foo_linux_amd64.pb.go` -> `["foo", "linux", "amd64"]`
pub fn base_name_parts(file_name: &str) -> Vec<&str> {
    let base = file_name.split('.').next().unwrap_or(file_name);
    base.split('_').collect()
}

/// Apply the file-name conventions. `None` means the name alone does not
/// exclude the file.
pub fn check_file_name(file_name: &str, config: &BuildConfig) -> Option<Rejection> {
    let parts = base_name_parts(file_name);
    let last = *parts.last()?;

    if last == "test" {
        return Some(Rejection::TestFile);
    }
    if last != config.os && is_known_os(last) {
        return Some(Rejection::OsSuffix(last.to_string()));
    }
    if last != config.arch && is_known_arch(last) {
        return Some(Rejection::ArchSuffix(last.to_string()));
    }
    if last == config.arch && parts.len() >= 2 {
        let os = parts[parts.len() - 2];
        if os != config.os && is_known_os(os) {
            return Some(Rejection::OsArchSuffix(os.to_string()));
        }
    }
    None
}

/// Evaluate already-scanned facts against the active tags
pub fn check_facts(facts: &FileFacts, tags: &TagSet) -> Option<Rejection> {
    if evaluate(&facts.constraints, tags) {
        None
    } else {
        Some(Rejection::Constraints)
    }
}

/// Full check without caching: name rules, then constraints in `content`.
pub fn check(file_name: &str, content: &str, config: &BuildConfig) -> Option<Rejection> {
    if let Some(rejection) = check_file_name(file_name, config) {
        return Some(rejection);
    }
    if evaluate(&scan_constraints(content), &config.tag_set()) {
        None
    } else {
        Some(Rejection::Constraints)
    }
}

pub fn is_eligible(file_name: &str, content: &str, config: &BuildConfig) -> bool {
    check(file_name, content, config).is_none()
}
