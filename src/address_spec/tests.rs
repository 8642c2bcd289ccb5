use super::*;

fn range(prefix: &str, lower: Option<&str>, upper: Option<&str>) -> AddressSpec {
    AddressSpec::bounded_range(prefix, lower, upper).expect("valid range")
}

fn node(url: &str) -> AddressSpec {
    AddressSpec::single_node(url)
}

/// Ranges over `a/b/`: unrestricted, `[c,)`, `(,d]` and `[c,d]`
fn fixtures() -> [AddressSpec; 4] {
    [
        AddressSpec::range("a/b/"),
        range("a/b/", Some("c"), None),
        range("a/b/", None, Some("d")),
        range("a/b/", Some("c"), Some("d")),
    ]
}

fn disjoint(a: &AddressSpec, b: &AddressSpec) -> bool {
    a.is_disjoint(b).expect("supported pair")
}

fn subsumes(a: &AddressSpec, b: &AddressSpec) -> bool {
    a.subsumes(b).expect("supported pair")
}

#[test]
fn test_inverted_bounds_are_rejected() {
    assert!(matches!(
        AddressSpec::bounded_range("a", Some("34"), Some("12")),
        Err(AddressSpecError::InvertedRange { .. })
    ));
    assert!(matches!(
        AddressSpec::bounded_range("b", Some("34"), Some("")),
        Err(AddressSpecError::InvertedRange { .. })
    ));
    assert!(AddressSpec::bounded_range("b", Some("34"), Some("34")).is_ok());
}

#[test]
fn test_range_accessors() {
    let AddressSpec::Range(open) = AddressSpec::range("1/2/3") else {
        panic!("expected range");
    };
    assert_eq!(open.prefix(), "1/2/3");
    assert_eq!(open.lower_bound(), None);
    assert_eq!(open.upper_bound(), None);

    let AddressSpec::Range(bounded) = range("a/", Some("b"), Some("d")) else {
        panic!("expected range");
    };
    assert_eq!(bounded.prefix(), "a/");
    assert_eq!(bounded.lower_bound(), Some("b"));
    assert_eq!(bounded.upper_bound(), Some("d"));
}

#[test]
fn test_structural_equality() {
    assert_eq!(range("foo", None, None), AddressSpec::range("foo"));
    assert_ne!(AddressSpec::range("foo"), range("foo", Some("a"), None));
    assert_ne!(AddressSpec::range("foo"), AddressSpec::range("bar"));
    assert_eq!(range("foo", Some("a"), Some("b")), range("foo", Some("a"), Some("b")));
    assert_ne!(range("foo", Some("a"), None), range("foo", None, Some("b")));
    assert_ne!(range("foo", Some("a"), Some("a")), range("foo", Some(""), Some("a")));
    assert_ne!(AddressSpec::range("foo"), AddressSpec::whole_tree());
    assert_ne!(AddressSpec::range("foo"), node("foo"));
}

fn hash_of(spec: &AddressSpec) -> u64 {
    use std::hash::{DefaultHasher, Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    spec.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_equal_specs_hash_equally() {
    let pairs = [
        (range("foo", None, None), AddressSpec::range("foo")),
        (range("foo", Some("a"), Some("b")), range("foo", Some("a"), Some("b"))),
        (node("foo/bar"), node("foo/bar")),
        (AddressSpec::whole_tree(), AddressSpec::whole_tree()),
        (
            AddressSpec::pattern("foo", r"\.pdf$").expect("pattern"),
            AddressSpec::pattern("foo", r"\.pdf$").expect("pattern"),
        ),
        (
            AddressSpec::union([node("foo/a"), AddressSpec::range("foo/b")]),
            AddressSpec::union([node("foo/a"), AddressSpec::range("foo/b")]),
        ),
    ];
    for (a, b) in &pairs {
        assert_eq!(a, b);
        assert_eq!(hash_of(a), hash_of(b), "{a}");
    }

    let set: std::collections::HashSet<AddressSpec> =
        pairs.into_iter().flat_map(|(a, b)| [a, b]).collect();
    assert_eq!(set.len(), 6);
}

#[test]
fn test_type_predicates() {
    assert!(!AddressSpec::range("foo").is_range_restricted());
    assert!(range("foo", Some("a"), None).is_range_restricted());
    assert!(range("foo", None, Some("b")).is_range_restricted());
    assert!(node("foo").is_single_node());
    assert!(!node("foo").is_whole_tree());
    assert!(AddressSpec::whole_tree().is_whole_tree());
}

#[test]
fn test_match_unrestricted() {
    let spec = AddressSpec::range("foo");
    assert!(spec.matches("foo"));
    assert!(!spec.matches("foobar"));
    assert!(spec.matches("foo/bar"));
    assert!(spec.matches("foo!/bar"));
    assert!(spec.matches("foo/"));
    assert!(spec.matches("foo!/"));
    assert!(!spec.matches("fo"));
    assert!(!spec.matches("1foo"));

    let spec = AddressSpec::range("foo/");
    assert!(!spec.matches("foo"));
    assert!(!spec.matches("foobar"));
    assert!(spec.matches("foo/bar"));
}

#[test]
fn test_match_bounds() {
    let lower = range("foo", Some("/123"), None);
    assert!(lower.matches("foo/123"));
    assert!(lower.matches("foo/123/x"));
    assert!(lower.matches("foo/123.x"));
    assert!(!lower.matches("foo"));
    assert!(!lower.matches("foo/12"));
    assert!(!lower.matches("foo/122"));
    assert!(!lower.matches("foo/0"));

    let upper = range("bar/", None, Some("123"));
    assert!(upper.matches("bar/0"));
    assert!(upper.matches("bar/123"));
    assert!(!upper.matches("bar/"));
    assert!(!upper.matches("bar/123/4"));
    assert!(!upper.matches("bar/124"));
    assert!(!upper.matches("bar"));

    let both = range("bar/", Some("222"), Some("555"));
    assert!(!both.matches("bar/0"));
    assert!(both.matches("bar/222"));
    assert!(both.matches("bar/3333"));
    assert!(both.matches("bar/555"));
    assert!(both.matches("bar/24"));
    assert!(!both.matches("bar/556"));
    assert!(!both.matches("bar/5555"));
    assert!(!both.matches("bar/22"));
}

#[test]
fn test_disjoint_with_single_nodes() {
    let [c1, c2, c3, c4] = fixtures();
    let all = [&c1, &c2, &c3, &c4];

    for spec in all {
        assert!(!disjoint(spec, &AddressSpec::whole_tree()));
        assert!(disjoint(spec, &node("a")));
        assert!(disjoint(spec, &node("a/b")));
        assert!(disjoint(spec, &node("a/c")));
        assert!(!disjoint(spec, &node("a/b/c")));
    }

    assert!(!disjoint(&c1, &node("a/b/")));
    assert!(disjoint(&c2, &node("a/b/")));
    assert!(disjoint(&c3, &node("a/b/")));
    assert!(disjoint(&c4, &node("a/b/")));

    assert!(disjoint(&c2, &node("a/b/a")));
    assert!(disjoint(&c3, &node("a/b/e")));
    assert!(disjoint(&c4, &node("a/b/a")));
    assert!(disjoint(&c4, &node("a/b/e")));
}

#[test]
fn test_disjoint_with_ranges() {
    let [c1, c2, c3, c4] = fixtures();
    let all = [&c1, &c2, &c3, &c4];

    for a in all {
        for b in all {
            assert!(!disjoint(a, b), "{a} vs {b}");
        }
        assert!(!disjoint(a, &AddressSpec::range("a/")));
        assert!(!disjoint(a, &AddressSpec::range("a/b/c")));
    }

    assert!(disjoint(&c1, &range("a/", None, Some("b"))));
    assert!(!disjoint(&c1, &range("a/", None, Some("c"))));
    assert!(!disjoint(&c1, &range("a/", Some("b"), Some("c"))));
    assert!(disjoint(&c1, &range("a/", Some("c"), Some("d"))));

    for spec in [&c2, &c3, &c4] {
        assert!(!disjoint(spec, &AddressSpec::range("a/b/cc")));
    }
    assert!(disjoint(&c2, &AddressSpec::range("a/b/b")));
    assert!(disjoint(&c3, &AddressSpec::range("a/b/e")));
    assert!(disjoint(&c4, &AddressSpec::range("a/b/b")));
    assert!(disjoint(&c4, &AddressSpec::range("a/b/e")));

    assert!(!disjoint(&c2, &range("a/b/", Some("b"), None)));
    assert!(!disjoint(&c2, &range("a/b/", Some("d"), Some("e"))));
    assert!(disjoint(&c2, &range("a/b/", None, Some("b"))));
    assert!(disjoint(&c2, &range("a/b/", Some("a"), Some("b"))));

    assert!(!disjoint(&c3, &range("a/b/", Some("b"), Some("d"))));
    assert!(disjoint(&c3, &range("a/b/", Some("e"), None)));
    assert!(disjoint(&c3, &range("a/b/", Some("e"), Some("f"))));

    assert!(!disjoint(&c4, &range("a/b/", Some("a"), Some("c"))));
    assert!(!disjoint(&c4, &range("a/b/", Some("d"), Some("e"))));
    assert!(!disjoint(&c4, &range("a/b/", Some("a"), Some("e"))));
    assert!(disjoint(&c4, &range("a/b/", None, Some("b"))));
    assert!(disjoint(&c4, &range("a/b/", Some("e"), None)));
}

#[test]
fn test_subsumes_nodes_and_ranges() {
    let [c1, c2, c3, c4] = fixtures();

    for spec in [&c1, &c2, &c3, &c4] {
        assert!(!subsumes(spec, &AddressSpec::whole_tree()));
        assert!(subsumes(spec, &node("a/b/c")));
        assert!(!subsumes(spec, &AddressSpec::range("a/")));
        assert!(!subsumes(spec, &AddressSpec::range("a/c")));
        assert!(subsumes(spec, &AddressSpec::range("a/b/c")));
        assert!(subsumes(spec, spec));
    }

    assert!(subsumes(&c1, &node("a/b/")));
    assert!(!subsumes(&c2, &node("a/b/")));
    assert!(!subsumes(&c2, &node("a/b/b")));
    assert!(!subsumes(&c3, &node("a/b/e")));

    assert!(!subsumes(&c2, &AddressSpec::range("a/b/b")));
    assert!(!subsumes(&c3, &AddressSpec::range("a/b/e")));
    assert!(!subsumes(&c4, &AddressSpec::range("a/b/b")));
    assert!(!subsumes(&c4, &AddressSpec::range("a/b/e")));

    for restricted in [&c2, &c3, &c4] {
        assert!(subsumes(&c1, restricted));
        assert!(!subsumes(restricted, &c1));
    }
}

#[test]
fn test_subsumes_bounds_at_same_anchor() {
    let [_, c2, c3, c4] = fixtures();

    assert!(subsumes(&c2, &range("a/b/", Some("c"), Some("d"))));
    assert!(subsumes(&c2, &range("a/b/", Some("d"), None)));
    assert!(!subsumes(&c2, &range("a/b/", Some("b"), None)));
    assert!(!subsumes(&c2, &range("a/b/", Some("b"), Some("d"))));

    assert!(subsumes(&c3, &range("a/b/", Some("b"), Some("d"))));
    assert!(subsumes(&c3, &range("a/b/", None, Some("c"))));
    assert!(!subsumes(&c3, &range("a/b/", Some("c"), None)));
    assert!(!subsumes(&c3, &range("a/b/", Some("e"), Some("f"))));

    assert!(subsumes(&c4, &range("a/b/", Some("cc"), Some("d"))));
    assert!(subsumes(&c4, &range("a/b/", Some("c"), Some("cz"))));
    assert!(!subsumes(&c4, &range("a/b/", Some("c"), None)));
    assert!(!subsumes(&c4, &range("a/b/", None, Some("d"))));
    assert!(!subsumes(&c4, &range("a/b/", Some("a"), Some("b"))));
}

#[test]
fn test_pruned_algebra_is_unsupported() {
    let pruned = AddressSpec::pruned("a/", "x", PruneMode::Include).expect("pruned");
    let other = AddressSpec::range("a/b");
    assert!(pruned.is_disjoint(&other).is_err());
    assert!(other.is_disjoint(&pruned).is_err());
    assert!(pruned.subsumes(&other).is_err());
    assert!(other.subsumes(&pruned).is_err());
    // Whole-tree answers before the pruned check.
    assert_eq!(pruned.is_disjoint(&AddressSpec::whole_tree()), Ok(false));
    assert_eq!(AddressSpec::whole_tree().subsumes(&pruned), Ok(true));
}

#[test]
fn test_pruned_matching() {
    let include = AddressSpec::pruned("http://x/a", r"\.pdf$", PruneMode::Include).expect("pruned");
    assert!(include.matches("http://x/a"));
    assert!(include.matches("http://x/a/doc.pdf"));
    assert!(!include.matches("http://x/a/doc.html"));
    assert!(!include.matches("http://x/ab.pdf"));

    let exclude = AddressSpec::pruned("http://x/a", r"\.pdf$", PruneMode::Exclude).expect("pruned");
    assert!(exclude.matches("http://x/a"));
    assert!(!exclude.matches("http://x/a/doc.pdf"));
    assert!(exclude.matches("http://x/a/doc.html"));
}

#[test]
fn test_display() {
    assert_eq!(AddressSpec::whole_tree().to_string(), "[whole tree]");
    assert_eq!(node("a/b").to_string(), "[single node: a/b]");
    assert_eq!(AddressSpec::range("a/b").to_string(), "[range: a/b]");
    assert_eq!(range("a/b", Some("/c"), None).to_string(), "[range: a/b, /c - ]");
    assert_eq!(
        AddressSpec::union([node("a"), AddressSpec::range("b")]).to_string(),
        "[union: [single node: a], [range: b]]"
    );
}
