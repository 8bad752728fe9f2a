//! Configuration loading
//!
//! Precedence, lowest first: built-in defaults, `goscan.toml` (project, then
//! user config dir), Go environment variables, CLI flags (applied by the
//! binary).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{GoResult, GoScanError};

use super::types::{BuildConfig, ConfigWarning};

/// File name looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "goscan.toml";

/// Load configuration from a TOML file
pub fn load(path: &Path) -> GoResult<BuildConfig> {
    let (config, _warnings) = load_with_warnings(path)?;
    Ok(config)
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> GoResult<(BuildConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|source| GoScanError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    parse_with_warnings(&content, path)
}

pub(crate) fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> GoResult<(BuildConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: BuildConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| GoScanError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults, then apply env overrides
pub fn load_or_default(project_root: Option<&Path>) -> BuildConfig {
    let candidates = project_root
        .map(|root| root.join(PROJECT_CONFIG_FILE))
        .into_iter()
        .chain(user_config_path());

    for candidate in candidates {
        if !candidate.exists() {
            continue;
        }
        match load_with_warnings(&candidate) {
            Ok((config, warnings)) => {
                for w in &warnings {
                    warn!(key = %w.key, file = %w.file.display(), "unknown config key");
                }
                debug!(file = %candidate.display(), "loaded config");
                return with_env_overrides(config);
            }
            Err(e) => warn!(error = %e, "ignoring unreadable config"),
        }
    }

    with_env_overrides(BuildConfig::default())
}

/// Apply the Go toolchain's own environment variables
pub fn with_env_overrides(config: BuildConfig) -> BuildConfig {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply environment overrides from an arbitrary lookup (testable without
/// touching the process environment).
pub fn with_env_overrides_from<F>(mut config: BuildConfig, lookup: F) -> BuildConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(os) = lookup("GOOS").filter(|v| !v.is_empty()) {
        config.os = os;
    }

    if let Some(arch) = lookup("GOARCH").filter(|v| !v.is_empty()) {
        config.arch = arch;
    }

    // GOTAGS (comma or space separated)
    if let Some(tags) = lookup("GOTAGS") {
        config.tags = tags
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(val) = lookup("CGO_ENABLED") {
        config.cgo_enabled = val.trim() == "1";
    }

    if let Some(gopath) = lookup("GOPATH").filter(|v| !v.is_empty()) {
        let roots: Vec<PathBuf> = std::env::split_paths(&gopath).collect();
        if !roots.is_empty() {
            config.source_roots = roots;
        }
    }

    config
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("goscan").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "os",
        "arch",
        "minor_version",
        "tags",
        "cgo_enabled",
        "source_roots",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
