//! Scenario: Cross-Compiling
//!
//! Journey: the same package is built for several targets and toolchain
//! versions. The set of files that take part must follow file-name
//! suffixes and `// +build` lines for each target.

use std::path::PathBuf;

use goscan::Rejection;

use crate::common::*;

fn net_workspace() -> GoWorkspace {
    let ws = GoWorkspace::new();
    ws.write_source("net/conn.go", "package net\n");
    ws.write_source("net/conn_linux.go", "package net\n");
    ws.write_source("net/conn_windows.go", "package net\n");
    ws.write_source("net/asm_arm64.go", "package net\n");
    ws.write_source("net/sys_darwin_arm64.go", "package net\n");
    ws.write_source(
        "net/poll.go",
        "// +build linux darwin\n// +build !386\n\npackage net\n",
    );
    ws.write_source("net/cgo.go", "// +build cgo\n\npackage net\n");
    ws.write_source("net/modern.go", "// +build go1.18\n\npackage net\n");
    ws
}

fn names(files: Vec<PathBuf>) -> Vec<String> {
    files
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .collect()
}

/// SCENARIO: linux/amd64 on an old toolchain without cgo
#[test]
fn scenario_linux_amd64() {
    let ws = net_workspace();
    let engine = ws.engine(ws.config("linux", "amd64", 6));

    let files = engine.resolve_package("net").unwrap();
    assert_eq!(names(files), vec!["conn.go", "conn_linux.go", "poll.go"]);
}

/// SCENARIO: darwin/arm64 with cgo on a recent toolchain
#[test]
fn scenario_darwin_arm64_cgo() {
    let ws = net_workspace();
    let engine = ws.engine(ws.config("darwin", "arm64", 21).with_cgo(true));

    let files = engine.resolve_package("net").unwrap();
    assert_eq!(
        names(files),
        vec![
            "asm_arm64.go",
            "cgo.go",
            "conn.go",
            "modern.go",
            "poll.go",
            "sys_darwin_arm64.go",
        ]
    );
}

/// SCENARIO: linux/386 loses poll.go to its second constraint line
#[test]
fn scenario_linux_386() {
    let ws = net_workspace();
    let engine = ws.engine(ws.config("linux", "386", 21));

    assert_eq!(
        engine.check(&ws.path("src/net/poll.go")).unwrap(),
        Some(Rejection::Constraints)
    );
    assert_eq!(
        engine.check(&ws.path("src/net/sys_darwin_arm64.go")).unwrap(),
        Some(Rejection::ArchSuffix("arm64".to_string()))
    );
}

/// SCENARIO: linux/arm64 rejects the darwin-only file by its OS part
#[test]
fn scenario_linux_arm64_os_arch_suffix() {
    let ws = net_workspace();
    let engine = ws.engine(ws.config("linux", "arm64", 21));

    assert_eq!(
        engine.check(&ws.path("src/net/sys_darwin_arm64.go")).unwrap(),
        Some(Rejection::OsArchSuffix("darwin".to_string()))
    );
    assert!(engine.eligible(&ws.path("src/net/asm_arm64.go")).unwrap());
}

/// SCENARIO: walking a whole tree for one target
#[test]
fn scenario_eligible_in_tree() {
    let ws = net_workspace();
    ws.write_source("net/conn_test.go", "package net\n");
    let engine = ws.engine(ws.config("windows", "amd64", 21));

    let files = engine.eligible_in_tree(&ws.path("src")).unwrap();
    assert_eq!(
        names(files),
        vec!["conn.go", "conn_windows.go", "modern.go"]
    );
}
