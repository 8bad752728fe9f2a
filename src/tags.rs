//! Constraint tag set
//!
//! The flat set of tags a `// +build` line is evaluated against: user tags,
//! target OS, target architecture, `cgo` when enabled, and one `go1.k` tag
//! for every release up to and including the toolchain's.

use std::collections::BTreeSet;

use crate::config::BuildConfig;

/// Active build tags for one configuration. Ordered so that listings are
/// stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_config(config: &BuildConfig) -> Self {
        let mut tags: BTreeSet<String> = config.tags.iter().cloned().collect();
        tags.insert(config.os.clone());
        tags.insert(config.arch.clone());
        if config.cgo_enabled {
            tags.insert("cgo".to_string());
        }
        tags.extend(release_tags(config.minor_version));
        Self(tags)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// `go1.1` through `go1.{minor}`
pub fn release_tags(minor: u32) -> impl Iterator<Item = String> {
    (1..=minor).map(|k| format!("go1.{k}"))
}
