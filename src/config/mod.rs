//! Build configuration
//!
//! Configuration hierarchy (highest priority first):
//! 1. CLI flags
//! 2. Go environment variables (GOOS, GOARCH, GOTAGS, CGO_ENABLED, GOPATH)
//! 3. Project config (`goscan.toml`)
//! 4. User config (`<config dir>/goscan/config.toml`)
//! 5. Built-in defaults

mod loader;
mod types;

pub use loader::{
    load, load_or_default, load_with_warnings, with_env_overrides, with_env_overrides_from,
    PROJECT_CONFIG_FILE,
};
pub use types::{BuildConfig, ConfigWarning};
