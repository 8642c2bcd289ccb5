//! URL containment helpers shared by matching and the spec algebra
//!
//! A URL is *under* an anchor when it equals the anchor or continues it past a
//! path separator. `foo` contains `foo/bar` and `foo!/bar` (archive member)
//! but not `foobar`. An anchor that already ends in `/` contains any
//! continuation.

/// True if `url` is `anchor` itself or lies below it in the tree
#[must_use]
pub fn is_under(url: &str, anchor: &str) -> bool {
    match url.strip_prefix(anchor) {
        Some("") => true,
        Some(rest) => anchor.ends_with('/') || rest.starts_with('/') || rest.starts_with("!/"),
        None => false,
    }
}

/// True if `url` lies below `anchor` but is not the anchor itself
#[must_use]
pub fn is_strictly_under(url: &str, anchor: &str) -> bool {
    url.len() > anchor.len() && is_under(url, anchor)
}

/// Deepest anchor that every input is under
///
/// Returns an empty string for an empty input or when the inputs share no
/// path ancestor.
pub(crate) fn common_ancestor<'a, I>(anchors: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let anchors: Vec<&str> = anchors.into_iter().collect();
    let Some((first, rest)) = anchors.split_first() else {
        return String::new();
    };

    let mut lcp_len = first.len();
    for other in rest {
        lcp_len = first
            .char_indices()
            .zip(other.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((i, c), _)| i + c.len_utf8())
            .min(lcp_len);
    }
    let lcp = &first[..lcp_len];

    if anchors.iter().all(|a| is_under(a, lcp)) {
        return lcp.to_string();
    }
    match lcp.rfind('/') {
        Some(cut) => lcp[..=cut].to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_under_requires_separator() {
        assert!(is_under("foo", "foo"));
        assert!(is_under("foo/bar", "foo"));
        assert!(is_under("foo!/bar", "foo"));
        assert!(is_under("foo/", "foo"));
        assert!(!is_under("foobar", "foo"));
        assert!(!is_under("fo", "foo"));
        assert!(is_under("foo/bar", "foo/"));
        assert!(!is_under("foo", "foo/"));
    }

    #[test]
    fn test_strictly_under_excludes_anchor() {
        assert!(!is_strictly_under("a/b", "a/b"));
        assert!(is_strictly_under("a/b/c", "a/b"));
        assert!(!is_strictly_under("a/bc", "a/b"));
    }

    #[test]
    fn test_common_ancestor() {
        assert_eq!(common_ancestor(["a/b", "a/c"]), "a/");
        assert_eq!(common_ancestor(["a", "a/b"]), "a");
        assert_eq!(common_ancestor(["a/b", "a/bc"]), "a/");
        assert_eq!(common_ancestor(["x/y", "x/y"]), "x/y");
        assert_eq!(common_ancestor(["x", "y"]), "");
        assert_eq!(common_ancestor(std::iter::empty()), "");
    }
}
