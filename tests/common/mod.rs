//! Common test utilities for goscan scenario tests.
//!
//! Provides `GoWorkspace`: an isolated GOPATH-style tree in a temp directory,
//! plus a helper to run the `goscan` binary against it.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use goscan::{BuildConfig, Engine, StandardLibraryIndex};
use tempfile::TempDir;

/// Standard library packages used by the fixtures
pub const STDLIB: &[&str] = &["fmt", "os", "strings", "net/http", "sync"];

/// Result of running the goscan CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated GOPATH with a `src/` directory
pub struct GoWorkspace {
    pub root: TempDir,
}

impl GoWorkspace {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(root.path().join("src")).expect("Failed to create src");
        Self { root }
    }

    /// Absolute path of `relative` under the GOPATH root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Write `src/<relative>`
    pub fn write_source(&self, relative: &str, content: &str) -> PathBuf {
        let full_path = self.path("src").join(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Build config targeting this GOPATH
    pub fn config(&self, os: &str, arch: &str, minor: u32) -> BuildConfig {
        BuildConfig::new(os, arch, minor).with_source_roots([self.root.path()])
    }

    pub fn engine(&self, config: BuildConfig) -> Engine {
        Engine::local(config, STDLIB.iter().copied().collect::<StandardLibraryIndex>())
    }

    /// Run goscan from the GOPATH root with a clean Go environment
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.root.path(), args)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_goscan"))
            .current_dir(cwd)
            .args(args)
            .env_remove("GOOS")
            .env_remove("GOARCH")
            .env_remove("GOTAGS")
            .env_remove("GOPATH")
            .env_remove("CGO_ENABLED")
            .env_remove("RUST_LOG")
            .env("HOME", self.root.path())
            .env("XDG_CONFIG_HOME", self.path(".config"))
            .output()
            .expect("Failed to execute goscan");

        TestResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
