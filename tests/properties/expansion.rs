//! Property tests for dependency expansion over generated package graphs.

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::TempDir;

use goscan::{BuildConfig, Engine, StandardLibraryIndex};

/// Package `i` holds `files[i]` files; each file imports the listed packages
type Graph = Vec<Vec<Vec<usize>>>;

fn graph() -> impl Strategy<Value = Graph> {
    (1usize..=6).prop_flat_map(|packages| {
        proptest::collection::vec(
            proptest::collection::vec(proptest::collection::vec(0..packages, 0..=3), 1..=3),
            packages,
        )
    })
}

/// Graph plus every `(package, file)` of it in a shuffled order
fn graph_with_call_order() -> impl Strategy<Value = (Graph, Vec<(usize, usize)>)> {
    graph().prop_flat_map(|graph| {
        let files: Vec<(usize, usize)> = graph
            .iter()
            .enumerate()
            .flat_map(|(pkg, files)| (0..files.len()).map(move |idx| (pkg, idx)))
            .collect();
        (Just(graph), Just(files).prop_shuffle())
    })
}

fn file_path(root: &Path, (pkg, idx): (usize, usize)) -> PathBuf {
    root.join(format!("src/p{pkg}/f{idx}.go"))
}

fn write_graph(root: &Path, graph: &Graph) {
    for (pkg, files) in graph.iter().enumerate() {
        let dir = root.join("src").join(format!("p{pkg}"));
        std::fs::create_dir_all(&dir).unwrap();
        for (idx, imports) in files.iter().enumerate() {
            let mut content = format!("package p{pkg}\n\nimport (\n\t\"fmt\"\n");
            for dep in imports {
                content.push_str(&format!("\t\"p{dep}\"\n"));
            }
            content.push_str(")\n");
            std::fs::write(dir.join(format!("f{idx}.go")), content).unwrap();
        }
    }
}

fn engine(root: &Path) -> Engine {
    let config = BuildConfig::new("linux", "amd64", 21).with_source_roots([root]);
    Engine::local(config, ["fmt"].into_iter().collect::<StandardLibraryIndex>())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: direct expansion yields exactly the files of the imported
    /// packages, without duplicates, and never a standard library path.
    #[test]
    fn property_expand_matches_imports(graph in graph()) {
        let dir = TempDir::new().unwrap();
        write_graph(dir.path(), &graph);
        let engine = engine(dir.path());

        for (pkg, files) in graph.iter().enumerate() {
            for (idx, imports) in files.iter().enumerate() {
                let file = dir.path().join(format!("src/p{pkg}/f{idx}.go"));
                let deps = engine.expand(&file).unwrap().into_vec();

                let mut expected: Vec<PathBuf> = Vec::new();
                for dep in imports {
                    for j in 0..graph[*dep].len() {
                        let path = dir.path().join(format!("src/p{dep}/f{j}.go"));
                        if !expected.contains(&path) {
                            expected.push(path);
                        }
                    }
                }
                prop_assert_eq!(deps, expected);
            }
        }
    }

    /// PROPERTY: transitive expansion never contains the start file and is
    /// identical whether computed sequentially or from many threads.
    #[test]
    fn property_transitive_is_deterministic(graph in graph()) {
        let dir = TempDir::new().unwrap();
        write_graph(dir.path(), &graph);
        let start = dir.path().join("src/p0/f0.go");

        let sequential = engine(dir.path()).expand_transitive(&start).unwrap();
        prop_assert!(!sequential.contains(&start));

        let shared = engine(dir.path());
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| shared.expand_transitive(&start).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for result in results {
            prop_assert_eq!(&result, &sequential);
        }
    }

    /// PROPERTY: expanding every file in a shuffled order, split across
    /// threads sharing one engine, matches a fresh sequential engine per file.
    #[test]
    fn property_shuffled_concurrent_calls_match_baseline((graph, order) in graph_with_call_order()) {
        let dir = TempDir::new().unwrap();
        write_graph(dir.path(), &graph);

        let shared = engine(dir.path());
        let chunk = order.len().div_ceil(3).max(1);
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = order
                .chunks(chunk)
                .map(|calls| {
                    let shared = &shared;
                    let root = dir.path();
                    s.spawn(move || {
                        calls
                            .iter()
                            .map(|&file| {
                                let path = file_path(root, file);
                                let direct = shared.expand(&path).unwrap();
                                let closure = shared.expand_transitive(&path).unwrap();
                                (file, direct, closure)
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
        });

        prop_assert_eq!(results.len(), order.len());
        for (file, direct, closure) in results {
            let fresh = engine(dir.path());
            let path = file_path(dir.path(), file);
            prop_assert_eq!(direct, fresh.expand(&path).unwrap());
            prop_assert_eq!(closure, fresh.expand_transitive(&path).unwrap());
        }
    }
}
