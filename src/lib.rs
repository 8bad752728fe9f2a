//! goscan - build-constraint-aware Go source dependency resolver
//!
//! Given a Go source tree, a target platform/toolchain configuration and a
//! set of build tags, goscan decides which files take part in a build, what
//! packages each file imports, and which project source files implement
//! those packages. Incremental build systems use it to derive accurate
//! dependency edges for Go sources.

pub mod config;
pub mod constraint;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod expander;
pub mod facts;
pub mod fs;
pub mod hash;
pub mod platform;
pub mod resolver;
pub mod scanner;
pub mod stdlib;
pub mod tags;
pub mod toolchain;

// Re-exports for convenience
pub use config::{BuildConfig, ConfigWarning};
pub use constraint::{evaluate, ConstraintLine};
pub use eligibility::{is_eligible, Rejection};
pub use engine::Engine;
pub use error::{GoResult, GoScanError};
pub use expander::DependencySet;
pub use facts::{FactsStore, FileKey};
pub use fs::{LocalFs, SourceTree};
pub use scanner::{scan, FileFacts};
pub use stdlib::StandardLibraryIndex;
pub use tags::TagSet;
pub use toolchain::{GoToolchain, ToolchainFacts};
