//! Build configuration types

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GoResult, GoScanError};
use crate::platform::{is_known_arch, is_known_os};
use crate::tags::TagSet;

/// Target platform and toolchain facts for one build invocation.
///
/// Read-only once constructed. `minor_version` is the `N` in `go1.N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_os")]
    pub os: String,

    #[serde(default = "default_arch")]
    pub arch: String,

    #[serde(default = "default_minor_version")]
    pub minor_version: u32,

    #[serde(default)]
    pub tags: BTreeSet<String>,

    #[serde(default)]
    pub cgo_enabled: bool,

    /// Ordered search path; each root holds `src/<package path>/`
    #[serde(default = "default_source_roots")]
    pub source_roots: Vec<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            os: default_os(),
            arch: default_arch(),
            minor_version: default_minor_version(),
            tags: BTreeSet::new(),
            cgo_enabled: false,
            source_roots: default_source_roots(),
        }
    }
}

fn default_os() -> String {
    "linux".to_string()
}

fn default_arch() -> String {
    "amd64".to_string()
}

fn default_minor_version() -> u32 {
    1
}

fn default_source_roots() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}

impl BuildConfig {
    pub fn new(os: impl Into<String>, arch: impl Into<String>, minor_version: u32) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
            minor_version,
            ..Self::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_cgo(mut self, enabled: bool) -> Self {
        self.cgo_enabled = enabled;
        self
    }

    pub fn with_source_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.source_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Active constraint tags for this configuration
    pub fn tag_set(&self) -> TagSet {
        TagSet::for_config(self)
    }

    /// Render user tags as the `-tags` argument for `go build`.
    ///
    /// Returns an empty string when no user tags are set.
    pub fn tags_flag(&self) -> String {
        if self.tags.is_empty() {
            return String::new();
        }
        let joined: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        format!("-tags \"{}\"", joined.join(" "))
    }

    /// Reject targets go/build would not recognize
    pub fn validate(&self) -> GoResult<()> {
        if !is_known_os(&self.os) {
            return Err(GoScanError::UnknownOs {
                os: self.os.clone(),
            });
        }
        if !is_known_arch(&self.arch) {
            return Err(GoScanError::UnknownArch {
                arch: self.arch.clone(),
            });
        }
        Ok(())
    }
}

/// Non-fatal configuration warning (e.g. unknown keys in the config file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The unknown or problematic key
    pub key: String,
    /// The file where the warning occurred
    pub file: PathBuf,
    /// The line number (1-indexed) if available
    pub line: Option<usize>,
    /// A suggested correction if available
    pub suggestion: Option<String>,
}
