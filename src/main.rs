//! goscan CLI
//!
//! Usage: goscan [OPTIONS] <COMMAND>
//!
//! Commands:
//!   tags      Print the active build tags
//!   eligible  Report which Go files take part in the build
//!   deps      List the project files a Go file depends on

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use goscan::fs::{is_go_file, walk_go_files};
use goscan::toolchain::parse_package_listing;
use goscan::{config, BuildConfig, Engine, GoToolchain, StandardLibraryIndex};

/// goscan - build-constraint-aware Go dependency scanner
#[derive(Parser, Debug)]
#[command(name = "goscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    target: TargetArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct TargetArgs {
    /// Project root holding goscan.toml
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Target OS (overrides GOOS and config)
    #[arg(long, global = true)]
    os: Option<String>,

    /// Target architecture (overrides GOARCH and config)
    #[arg(long, global = true)]
    arch: Option<String>,

    /// Toolchain minor version, the N in go1.N
    #[arg(long = "go-minor", global = true)]
    go_minor: Option<u32>,

    /// Additional build tags (comma separated, repeatable)
    #[arg(long, global = true, value_delimiter = ',')]
    tags: Vec<String>,

    /// Whether cgo is enabled
    #[arg(long, global = true)]
    cgo: Option<bool>,

    /// Source roots searched for packages, in order (repeatable)
    #[arg(long = "source-root", global = true)]
    source_roots: Vec<PathBuf>,

    /// File listing standard library packages, one per line
    #[arg(long, global = true, conflicts_with = "probe")]
    stdlib: Option<PathBuf>,

    /// Ask the go toolchain for version, platform and standard library
    #[arg(long, global = true)]
    probe: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the active build tags
    Tags,

    /// Report which Go files take part in the build
    Eligible {
        /// Go files or directories to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List the project files a Go file depends on
    Deps {
        /// Go source file
        file: PathBuf,

        /// Follow dependencies of dependencies
        #[arg(long)]
        transitive: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (config, stdlib) = resolve_target(&cli.target)?;
    config.validate()?;
    let engine = Engine::local(config, stdlib);

    match cli.command {
        Commands::Tags => cmd_tags(&engine, cli.json),
        Commands::Eligible { paths } => cmd_eligible(&engine, &paths, cli.json),
        Commands::Deps { file, transitive } => cmd_deps(&engine, &file, transitive, cli.json),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("goscan={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Layer config file, environment, optional toolchain probe and CLI flags
fn resolve_target(args: &TargetArgs) -> Result<(BuildConfig, StandardLibraryIndex)> {
    let mut config = config::load_or_default(Some(args.root.as_path()));
    let mut stdlib = StandardLibraryIndex::new();

    if args.probe {
        let facts = GoToolchain::default()
            .probe(&args.root, &config)
            .context("probing go toolchain")?;
        config = facts.build_config(config);
        stdlib = facts.stdlib;
    } else if let Some(path) = &args.stdlib {
        let listing = std::fs::read_to_string(path)
            .with_context(|| format!("reading stdlib listing {}", path.display()))?;
        stdlib = parse_package_listing(&listing).into_iter().collect();
    }

    Ok((apply_flags(config, args), stdlib))
}

fn apply_flags(mut config: BuildConfig, args: &TargetArgs) -> BuildConfig {
    if let Some(os) = &args.os {
        config.os = os.clone();
    }
    if let Some(arch) = &args.arch {
        config.arch = arch.clone();
    }
    if let Some(minor) = args.go_minor {
        config.minor_version = minor;
    }
    if let Some(cgo) = args.cgo {
        config.cgo_enabled = cgo;
    }
    if !args.source_roots.is_empty() {
        config.source_roots = args.source_roots.clone();
    }
    config.with_tags(args.tags.iter().filter(|t| !t.is_empty()).cloned())
}

fn cmd_tags(engine: &Engine, json: bool) -> Result<()> {
    let tags: Vec<&str> = engine.tags().iter().collect();
    if json {
        println!(
            "{}",
            json!({ "tags": tags, "tags_flag": engine.config().tags_flag() })
        );
    } else {
        for tag in tags {
            println!("{tag}");
        }
    }
    Ok(())
}

fn cmd_eligible(engine: &Engine, paths: &[PathBuf], json: bool) -> Result<()> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(walk_go_files(path)?);
        } else if is_go_file(path) {
            files.push(path.clone());
        }
    }

    let mut report = Vec::with_capacity(files.len());
    for file in &files {
        let rejection = engine.check(file)?;
        if json {
            report.push(json!({
                "path": file.display().to_string(),
                "eligible": rejection.is_none(),
                "reason": rejection.as_ref().map(ToString::to_string),
            }));
        } else {
            match rejection {
                None => println!("+ {}", file.display()),
                Some(reason) => println!("- {} ({reason})", file.display()),
            }
        }
    }

    if json {
        println!("{}", serde_json::Value::Array(report));
    }
    Ok(())
}

fn cmd_deps(engine: &Engine, file: &Path, transitive: bool, json: bool) -> Result<()> {
    let deps = if transitive {
        engine.expand_transitive(file)?
    } else {
        engine.expand(file)?
    };

    if json {
        let list: Vec<String> = deps.iter().map(|p| p.display().to_string()).collect();
        println!(
            "{}",
            json!({ "file": file.display().to_string(), "dependencies": list })
        );
    } else {
        print!("{deps}");
    }
    Ok(())
}
