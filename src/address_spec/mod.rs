//! Address specs: immutable descriptions of subsets of a preservation unit's URL tree
//!
//! An [`AddressSpec`] is a closed set of variants. Every variant carries an
//! anchor URL, supports [`AddressSpec::matches`] and reports the anchors that
//! cover it through [`AddressSpec::prefix_list`]. The set algebra
//! ([`AddressSpec::is_disjoint`], [`AddressSpec::subsumes`]) lives in
//! `algebra.rs`.
//!
//! Specs are cheap to clone and safe to share across threads.

mod algebra;
mod descriptor;
mod errors;
pub mod paths;

#[cfg(test)]
mod tests;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use regex::Regex;

pub use descriptor::{PruneModeDescriptor, SpecDescriptor, SpecKind};
pub use errors::{AddressSpecError, SpecResult, UnsupportedOperation};

use crate::utils::constants::WHOLE_TREE_URL;
use paths::{common_ancestor, is_under};

/// Compiled suffix pattern with equality and hashing by source text
#[derive(Clone)]
pub struct SuffixPattern(Regex);

impl SuffixPattern {
    /// Compile `pattern`, reporting the source text on failure
    pub fn new(pattern: &str) -> SpecResult<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| AddressSpecError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for SuffixPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for SuffixPattern {}

impl Hash for SuffixPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Debug for SuffixPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SuffixPattern").field(&self.as_str()).finish()
    }
}

impl fmt::Display for SuffixPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SingleNodeSpec {
    url: String,
}

impl SingleNodeSpec {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// An anchor plus an optional lexicographic interval on the remainder
///
/// With both bounds absent the range is *unrestricted* and also matches the
/// anchor itself. A restricted range matches only URLs strictly under the
/// anchor whose remainder falls in `[lower, upper]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeSpec {
    prefix: String,
    lower: Option<String>,
    upper: Option<String>,
}

impl RangeSpec {
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn lower_bound(&self) -> Option<&str> {
        self.lower.as_deref()
    }

    #[must_use]
    pub fn upper_bound(&self) -> Option<&str> {
        self.upper.as_deref()
    }

    #[must_use]
    pub fn is_restricted(&self) -> bool {
        self.lower.is_some() || self.upper.is_some()
    }
}

/// Whether a pruned spec keeps or drops the remainders matching its filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PruneMode {
    Include,
    Exclude,
}

/// An anchor whose subtree is filtered by a suffix pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrunedSpec {
    prefix: String,
    filter: SuffixPattern,
    mode: PruneMode,
}

impl PrunedSpec {
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn filter(&self) -> &SuffixPattern {
        &self.filter
    }

    #[must_use]
    pub fn mode(&self) -> PruneMode {
        self.mode
    }
}

/// URLs under an anchor whose remainder matches a regular expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternSpec {
    prefix: String,
    pattern: SuffixPattern,
}

impl PatternSpec {
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn pattern(&self) -> &SuffixPattern {
        &self.pattern
    }
}

/// Ordered list of member specs
///
/// Members are copied into an owned, immutable slice at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnionSpec {
    members: Arc<[AddressSpec]>,
    anchor: String,
}

impl UnionSpec {
    #[must_use]
    pub fn members(&self) -> &[AddressSpec] {
        &self.members
    }
}

/// A subset of a preservation unit's URL tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AddressSpec {
    /// Every URL in the unit
    WholeTree,
    SingleNode(SingleNodeSpec),
    Range(RangeSpec),
    Pruned(PrunedSpec),
    Pattern(PatternSpec),
    Union(UnionSpec),
}

impl AddressSpec {
    #[must_use]
    pub fn whole_tree() -> Self {
        Self::WholeTree
    }

    pub fn single_node(url: impl Into<String>) -> Self {
        Self::SingleNode(SingleNodeSpec { url: url.into() })
    }

    /// Unrestricted range: the anchor and everything under it
    pub fn range(prefix: impl Into<String>) -> Self {
        Self::Range(RangeSpec {
            prefix: prefix.into(),
            lower: None,
            upper: None,
        })
    }

    /// Range restricted to remainders in `[lower, upper]`
    ///
    /// Absent bounds are open ends. Passing `None` for both is the same as
    /// [`AddressSpec::range`].
    pub fn bounded_range(
        prefix: impl Into<String>,
        lower: Option<&str>,
        upper: Option<&str>,
    ) -> SpecResult<Self> {
        if let (Some(lo), Some(hi)) = (lower, upper) {
            if lo > hi {
                return Err(AddressSpecError::InvertedRange {
                    lower: lo.to_string(),
                    upper: hi.to_string(),
                });
            }
        }
        Ok(Self::Range(RangeSpec {
            prefix: prefix.into(),
            lower: lower.map(str::to_string),
            upper: upper.map(str::to_string),
        }))
    }

    pub fn pruned(prefix: impl Into<String>, filter: &str, mode: PruneMode) -> SpecResult<Self> {
        Ok(Self::Pruned(PrunedSpec {
            prefix: prefix.into(),
            filter: SuffixPattern::new(filter)?,
            mode,
        }))
    }

    pub fn pattern(prefix: impl Into<String>, pattern: &str) -> SpecResult<Self> {
        Ok(Self::Pattern(PatternSpec {
            prefix: prefix.into(),
            pattern: SuffixPattern::new(pattern)?,
        }))
    }

    pub fn union<I>(members: I) -> Self
    where
        I: IntoIterator<Item = AddressSpec>,
    {
        let members: Arc<[AddressSpec]> = members.into_iter().collect();
        let anchor = if members.iter().any(AddressSpec::is_whole_tree) {
            WHOLE_TREE_URL.to_string()
        } else {
            common_ancestor(members.iter().map(AddressSpec::url))
        };
        Self::Union(UnionSpec { members, anchor })
    }

    /// Anchor URL of the spec
    ///
    /// Whole-tree specs report [`WHOLE_TREE_URL`]; unions report the deepest
    /// path that all of their members are under.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::WholeTree => WHOLE_TREE_URL,
            Self::SingleNode(s) => &s.url,
            Self::Range(r) => &r.prefix,
            Self::Pruned(p) => &p.prefix,
            Self::Pattern(p) => &p.prefix,
            Self::Union(u) => &u.anchor,
        }
    }

    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::WholeTree => true,
            Self::SingleNode(s) => s.url == url,
            Self::Range(r) => {
                if !is_under(url, &r.prefix) {
                    return false;
                }
                let rest = &url[r.prefix.len()..];
                if rest.is_empty() {
                    return !r.is_restricted();
                }
                r.lower.as_deref().is_none_or(|lo| rest >= lo)
                    && r.upper.as_deref().is_none_or(|hi| rest <= hi)
            }
            Self::Pruned(p) => {
                if !is_under(url, &p.prefix) {
                    return false;
                }
                let rest = &url[p.prefix.len()..];
                if rest.is_empty() {
                    return true;
                }
                match p.mode {
                    PruneMode::Include => p.filter.is_match(rest),
                    PruneMode::Exclude => !p.filter.is_match(rest),
                }
            }
            Self::Pattern(p) => {
                is_under(url, &p.prefix) && p.pattern.is_match(&url[p.prefix.len()..])
            }
            Self::Union(u) => u.members.iter().any(|m| m.matches(url)),
        }
    }

    /// Anchors whose subtrees together cover every URL the spec can match
    ///
    /// Unions concatenate their members' lists; duplicates are kept.
    #[must_use]
    pub fn prefix_list(&self) -> Vec<&str> {
        match self {
            Self::Union(u) => u.members.iter().flat_map(AddressSpec::prefix_list).collect(),
            other => vec![other.url()],
        }
    }

    #[must_use]
    pub fn is_whole_tree(&self) -> bool {
        matches!(self, Self::WholeTree)
    }

    #[must_use]
    pub fn is_single_node(&self) -> bool {
        matches!(self, Self::SingleNode(_))
    }

    #[must_use]
    pub fn is_range_restricted(&self) -> bool {
        matches!(self, Self::Range(r) if r.is_restricted())
    }

    /// Short variant name used in diagnostics
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::WholeTree => "whole-tree",
            Self::SingleNode(_) => "single-node",
            Self::Range(_) => "range",
            Self::Pruned(_) => "pruned",
            Self::Pattern(_) => "pattern",
            Self::Union(_) => "union",
        }
    }
}

impl fmt::Display for AddressSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WholeTree => write!(f, "[whole tree]"),
            Self::SingleNode(s) => write!(f, "[single node: {}]", s.url),
            Self::Range(r) if r.is_restricted() => write!(
                f,
                "[range: {}, {} - {}]",
                r.prefix,
                r.lower.as_deref().unwrap_or(""),
                r.upper.as_deref().unwrap_or("")
            ),
            Self::Range(r) => write!(f, "[range: {}]", r.prefix),
            Self::Pruned(p) => {
                let mode = match p.mode {
                    PruneMode::Include => "include",
                    PruneMode::Exclude => "exclude",
                };
                write!(f, "[pruned: {}, {} {}]", p.prefix, mode, p.filter)
            }
            Self::Pattern(p) => write!(f, "[pattern: {}, {}]", p.prefix, p.pattern),
            Self::Union(u) => {
                write!(f, "[union:")?;
                for (i, m) in u.members.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{m}")?;
                }
                write!(f, "]")
            }
        }
    }
}
