//! Go toolchain facts
//!
//! The host learns the toolchain version, target platform and standard
//! library contents by running `go version`, `go env` and `go list`. The
//! parsers here are pure so they can be fed captured output; [`GoToolchain`]
//! runs the commands for callers that want the whole probe.
//!
//! Nothing in resolution calls into this module. Its results are injected
//! into an [`Engine`](crate::Engine) as a `BuildConfig` and a
//! `StandardLibraryIndex`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::config::BuildConfig;
use crate::error::{GoResult, GoScanError};
use crate::stdlib::StandardLibraryIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compiler {
    Gc,
    Gccgo,
}

/// Parsed `go version` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoVersion {
    /// Version without the `go` prefix, e.g. `1.21.3`
    pub version: String,
    pub minor: u32,
    pub compiler: Compiler,
    pub host_os: String,
    pub host_arch: String,
}

/// Parse `go version` output.
///
/// ```text
/// go version go1.2.1 linux/amd64
/// go version go1.4.2 gccgo (GCC) 5.3.0 linux/amd64
/// ```
pub fn parse_go_version(output: &str) -> GoResult<GoVersion> {
    let unexpected = || GoScanError::UnexpectedToolchainOutput {
        command: "go version".to_string(),
        output: output.trim().to_string(),
    };

    let parts: Vec<&str> = output.split_whitespace().collect();
    let version = parts
        .iter()
        .skip(2)
        .find_map(|p| p.strip_prefix("go"))
        .ok_or_else(unexpected)?;
    let minor = version
        .split('.')
        .nth(1)
        .map(|m| m.chars().take_while(char::is_ascii_digit).collect::<String>())
        .and_then(|m| m.parse::<u32>().ok())
        .ok_or_else(unexpected)?;
    let (host_os, host_arch) = parts
        .last()
        .and_then(|p| p.split_once('/'))
        .ok_or_else(unexpected)?;

    let compiler = if parts.contains(&"gccgo") {
        Compiler::Gccgo
    } else {
        Compiler::Gc
    };

    Ok(GoVersion {
        version: version.to_string(),
        minor,
        compiler,
        host_os: host_os.to_string(),
        host_arch: host_arch.to_string(),
    })
}

/// Parse `go env` output into the `GO*` and `CGO_ENABLED` variables.
///
/// Accepts `KEY="value"`, `KEY='value'` and Windows `set KEY=value` lines.
pub fn parse_go_env(output: &str) -> BTreeMap<String, String> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let line = line.strip_prefix("set ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            if !(key.starts_with("GO") || key == "CGO_ENABLED") {
                return None;
            }
            Some((key.to_string(), unquote(value).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Parse `go list` output: one import path per line
pub fn parse_package_listing(output: &str) -> Vec<String> {
    output.split_whitespace().map(str::to_string).collect()
}

/// Everything a probe learned
#[derive(Debug, Clone)]
pub struct ToolchainFacts {
    pub version: GoVersion,
    pub env: BTreeMap<String, String>,
    pub stdlib: StandardLibraryIndex,
}

impl ToolchainFacts {
    /// Fill target platform, version and cgo from the toolchain, keeping the
    /// caller's tags and source roots.
    pub fn build_config(&self, base: BuildConfig) -> BuildConfig {
        let non_empty = |key: &str| self.env.get(key).filter(|v| !v.is_empty()).cloned();
        BuildConfig {
            os: non_empty("GOOS").unwrap_or_else(|| self.version.host_os.clone()),
            arch: non_empty("GOARCH").unwrap_or_else(|| self.version.host_arch.clone()),
            minor_version: self.version.minor,
            cgo_enabled: self
                .env
                .get("CGO_ENABLED")
                .map(|v| v == "1")
                .unwrap_or(base.cgo_enabled),
            ..base
        }
    }
}

/// Runs the `go` binary
#[derive(Debug, Clone)]
pub struct GoToolchain {
    go: PathBuf,
}

impl Default for GoToolchain {
    fn default() -> Self {
        Self::new("go")
    }
}

impl GoToolchain {
    pub fn new(go: impl Into<PathBuf>) -> Self {
        Self { go: go.into() }
    }

    /// Query version, environment and package listings. `go list` runs in
    /// `project_root` with GOPATH set to the configured source roots.
    pub fn probe(&self, project_root: &Path, config: &BuildConfig) -> GoResult<ToolchainFacts> {
        let gopath = std::env::join_paths(&config.source_roots).map_err(|e| {
            GoScanError::ToolchainFailed {
                command: "go list".to_string(),
                message: e.to_string(),
            }
        })?;

        let version = parse_go_version(&self.run(project_root, &gopath, &["version"])?)?;
        let env = parse_go_env(&self.run(project_root, &gopath, &["env"])?);
        let all = parse_package_listing(&self.run(project_root, &gopath, &["list", "..."])?);
        let project = parse_package_listing(&self.run(project_root, &gopath, &["list", "./..."])?);
        let stdlib = StandardLibraryIndex::from_listings(all, project);

        debug!(version = %version.version, stdlib = stdlib.len(), "probed go toolchain");
        Ok(ToolchainFacts {
            version,
            env,
            stdlib,
        })
    }

    fn run(&self, dir: &Path, gopath: &std::ffi::OsStr, args: &[&str]) -> GoResult<String> {
        let command = format!("go {}", args.join(" "));
        let output = Command::new(&self.go)
            .args(args)
            .current_dir(dir)
            .env("GOPATH", gopath)
            .output()
            .map_err(|e| GoScanError::ToolchainFailed {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(GoScanError::ToolchainFailed {
                command,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
