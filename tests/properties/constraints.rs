//! Property tests for constraint evaluation and file eligibility.

use proptest::prelude::*;

use goscan::{evaluate, is_eligible, BuildConfig, TagSet};

fn tag() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9]{0,6}").unwrap()
}

fn tag_set() -> impl Strategy<Value = TagSet> {
    proptest::collection::vec(tag(), 0..=6).prop_map(|tags| tags.into_iter().collect())
}

/// Plain identifier without `_`, so file-name rules never apply
fn plain_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9]{0,10}")
        .unwrap()
        .prop_filter("not a reserved suffix", |s| {
            s != "test" && !goscan::platform::is_known_os(s) && !goscan::platform::is_known_arch(s)
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a file with no constraint lines and a plain name is always eligible.
    #[test]
    fn property_unconstrained_file_is_eligible(
        name in plain_name(),
        body in "[a-zA-Z0-9 (){}\n\"]{0,200}",
        minor in 0u32..=25,
        cgo in any::<bool>(),
    ) {
        let content = format!("package p\n{body}");
        let config = BuildConfig::new("linux", "amd64", minor).with_cgo(cgo);
        let file_name = format!("{name}.go");
        prop_assert!(is_eligible(&file_name, &content, &config));
    }

    /// PROPERTY: `_test.go` files are never eligible, whatever their content.
    #[test]
    fn property_test_files_never_eligible(name in plain_name(), body in "(?s).{0,120}") {
        let config = BuildConfig::default();
        let file_name = format!("{name}_test.go");
        prop_assert!(!is_eligible(&file_name, &body, &config));
    }

    /// PROPERTY: comma-separated atoms hold only when every atom holds.
    #[test]
    fn property_comma_is_and(tags in tag_set(), atoms in proptest::collection::vec(tag(), 1..=4)) {
        let line = atoms.join(",");
        let expected = atoms.iter().all(|a| tags.contains(a));
        prop_assert_eq!(evaluate(&[line], &tags), expected);
    }

    /// PROPERTY: space-separated fields hold when any field holds.
    #[test]
    fn property_space_is_or(tags in tag_set(), atoms in proptest::collection::vec(tag(), 1..=4)) {
        let line = atoms.join(" ");
        let expected = atoms.iter().any(|a| tags.contains(a));
        prop_assert_eq!(evaluate(&[line], &tags), expected);
    }

    /// PROPERTY: separate lines are ANDed.
    #[test]
    fn property_lines_are_anded(tags in tag_set(), lines in proptest::collection::vec(tag(), 1..=4)) {
        let expected = lines.iter().all(|l| tags.contains(l));
        prop_assert_eq!(evaluate(&lines, &tags), expected);
    }

    /// PROPERTY: `!x` is the complement of `x`.
    #[test]
    fn property_negation_complements(tags in tag_set(), atom in tag()) {
        let positive = evaluate(&[atom.clone()], &tags);
        let negative = evaluate(&[format!("!{atom}")], &tags);
        prop_assert_ne!(positive, negative);
    }

    /// PROPERTY: evaluation never panics on arbitrary text.
    #[test]
    fn property_evaluate_never_panics(tags in tag_set(), lines in proptest::collection::vec("(?s).{0,64}", 0..=4)) {
        let _ = evaluate(&lines, &tags);
    }
}
