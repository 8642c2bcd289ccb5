//! Set algebra over address specs
//!
//! Both operations are sound: `is_disjoint` only answers `true` when no URL can
//! match both specs, and `subsumes` only answers `true` when every URL matched
//! by the other spec is matched by this one. Pruned specs have no decision
//! procedure and yield [`UnsupportedOperation`].

use super::paths::is_strictly_under;
use super::{AddressSpec, UnsupportedOperation};

/// Borrowed view of a spec as an anchored interval
///
/// Pattern specs are widened to the unrestricted range at their anchor.
#[derive(Debug, Clone, Copy)]
struct Region<'a> {
    prefix: &'a str,
    lower: Option<&'a str>,
    upper: Option<&'a str>,
}

impl<'a> Region<'a> {
    fn of(spec: &'a AddressSpec) -> Option<Self> {
        match spec {
            AddressSpec::Range(r) => Some(Self {
                prefix: r.prefix(),
                lower: r.lower_bound(),
                upper: r.upper_bound(),
            }),
            AddressSpec::Pattern(p) => Some(Self {
                prefix: p.prefix(),
                lower: None,
                upper: None,
            }),
            _ => None,
        }
    }

    fn is_restricted(&self) -> bool {
        self.lower.is_some() || self.upper.is_some()
    }

    /// Remainder of `inner`'s prefix relative to this region's prefix
    fn offset_of(&self, inner: &Region<'a>) -> &'a str {
        &inner.prefix[self.prefix.len()..]
    }
}

impl AddressSpec {
    /// True if no URL can match both `self` and `other`
    ///
    /// Symmetric for every supported pair.
    pub fn is_disjoint(&self, other: &AddressSpec) -> Result<bool, UnsupportedOperation> {
        use AddressSpec::{Pruned, SingleNode, Union, WholeTree};

        match (self, other) {
            (WholeTree, _) | (_, WholeTree) => Ok(false),
            (Pruned(_), _) | (_, Pruned(_)) => {
                Err(UnsupportedOperation::new("is_disjoint", "pruned"))
            }
            (Union(u), x) | (x, Union(u)) => {
                for member in u.members() {
                    if !member.is_disjoint(x)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (SingleNode(a), SingleNode(b)) => Ok(a.url() != b.url()),
            (SingleNode(n), x) | (x, SingleNode(n)) => Ok(!x.matches(n.url())),
            (a, b) => match (Region::of(a), Region::of(b)) {
                (Some(ra), Some(rb)) => Ok(regions_disjoint(ra, rb)),
                _ => Ok(false),
            },
        }
    }

    /// True if every URL matched by `other` is also matched by `self`
    pub fn subsumes(&self, other: &AddressSpec) -> Result<bool, UnsupportedOperation> {
        use AddressSpec::{Pattern, Pruned, Range, SingleNode, Union, WholeTree};

        match (self, other) {
            (WholeTree, _) => Ok(true),
            (_, WholeTree) => Ok(false),
            (Pruned(_), _) | (_, Pruned(_)) => Err(UnsupportedOperation::new("subsumes", "pruned")),
            _ if self == other => Ok(true),
            (_, Union(u)) => {
                for member in u.members() {
                    if !self.subsumes(member)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (Union(u), _) => {
                for member in u.members() {
                    if member.subsumes(other)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            (_, SingleNode(n)) => Ok(self.matches(n.url())),
            (SingleNode(_), _) | (Pattern(_), _) => Ok(false),
            (Range(_), _) => match (Region::of(self), Region::of(other)) {
                (Some(outer), Some(inner)) => Ok(region_covers(outer, inner)),
                _ => Ok(false),
            },
        }
    }
}

/// Larger of two lower bounds, `None` being minus infinity
fn max_lower<'a>(a: Option<&'a str>, b: Option<&'a str>) -> Option<&'a str> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) | (None, x) => x,
    }
}

/// Smaller of two upper bounds, `None` being plus infinity
fn min_upper<'a>(a: Option<&'a str>, b: Option<&'a str>) -> Option<&'a str> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) | (None, x) => x,
    }
}

fn regions_disjoint<'a>(a: Region<'a>, b: Region<'a>) -> bool {
    if a.prefix == b.prefix {
        if !a.is_restricted() || !b.is_restricted() {
            return false;
        }
        return match (max_lower(a.lower, b.lower), min_upper(a.upper, b.upper)) {
            (Some(lo), Some(hi)) => lo > hi,
            _ => false,
        };
    }
    if is_strictly_under(b.prefix, a.prefix) {
        !may_reach(a, b)
    } else if is_strictly_under(a.prefix, b.prefix) {
        !may_reach(b, a)
    } else {
        true
    }
}

/// Whether `outer` can match anything under `inner`'s anchor
///
/// `inner.prefix` must be strictly under `outer.prefix`.
fn may_reach<'a>(outer: Region<'a>, inner: Region<'a>) -> bool {
    if !outer.is_restricted() {
        return true;
    }
    let q = outer.offset_of(&inner);
    let below_upper = outer.upper.is_none_or(|hi| q <= hi);
    let above_lower = outer.lower.is_none_or(|lo| lo <= q || lo.starts_with(q));
    below_upper && above_lower
}

fn region_covers<'a>(outer: Region<'a>, inner: Region<'a>) -> bool {
    if outer.prefix == inner.prefix {
        if !outer.is_restricted() {
            return true;
        }
        if !inner.is_restricted() {
            return false;
        }
        let lower_ok = match (outer.lower, inner.lower) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(a), Some(b)) => a <= b,
        };
        let upper_ok = match (outer.upper, inner.upper) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(a), Some(b)) => b <= a,
        };
        return lower_ok && upper_ok;
    }

    if !is_strictly_under(inner.prefix, outer.prefix) {
        return false;
    }
    if !outer.is_restricted() {
        return true;
    }

    // Every remainder seen by `outer` starts with q.
    let q = outer.offset_of(&inner);
    let lower_ok = outer.lower.is_none_or(|lo| {
        let least = format!("{q}{}", inner.lower.unwrap_or(""));
        lo <= least.as_str()
    });
    let upper_ok = match (outer.upper, inner.upper) {
        (None, _) => true,
        (Some(hi), Some(inner_hi)) => format!("{q}{inner_hi}").as_str() <= hi,
        (Some(hi), None) => hi > q && !hi.starts_with(q),
    };
    lower_ok && upper_ok
}
