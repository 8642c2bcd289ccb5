//! Tree relations between subset slots and the slot key format

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::address_spec::paths::is_strictly_under;
use crate::address_spec::{AddressSpec, AddressSpecError};
use crate::unit::AddressedSubset;
use crate::utils::constants::{BOUND_SEPARATOR, KEY_SEPARATOR, WHOLE_TREE_URL};

/// Position of an existing slot relative to a requested one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Same anchor, overlapping content
    Same,
    /// Existing slot is an ancestor of the requested one
    Parent,
    /// Existing slot is a descendant of the requested one
    Child,
    None,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Same => "Same",
            Self::Parent => "Parent",
            Self::Child => "Child",
            Self::None => "No relation",
        })
    }
}

/// Relation of `existing` to `requested` within one unit
///
/// Specs whose disjointness cannot be decided count as overlapping. Only
/// provably disjoint specs are unrelated; overlapping specs whose anchors are
/// not nested (a union spanning hosts, say) count as [`Relation::Same`].
#[must_use]
pub fn relation_of(existing: &AddressSpec, requested: &AddressSpec) -> Relation {
    match (existing.is_whole_tree(), requested.is_whole_tree()) {
        (true, true) => return Relation::Same,
        (true, false) => return Relation::Parent,
        (false, true) => return Relation::Child,
        (false, false) => {}
    }

    if matches!(existing.is_disjoint(requested), Ok(true)) {
        return Relation::None;
    }
    let (a, b) = (existing.url(), requested.url());
    if is_strictly_under(b, a) {
        Relation::Parent
    } else if is_strictly_under(a, b) {
        Relation::Child
    } else {
        Relation::Same
    }
}

/// Parsed subset slot key
///
/// The textual form is `<unit-id>::<anchor>` with an optional
/// `::<lower>-<upper>` suffix for bound-restricted ranges; an absent bound is
/// written as an empty string. Whole-tree subsets use
/// [`WHOLE_TREE_URL`] as anchor. Parsing always yields a range (or whole-tree)
/// spec, and the bound suffix is split at its first `-`.
///
/// The text carries only anchor and bounds. Single-node, pattern, pruned and
/// unrestricted range specs at one anchor render identically, as do unions
/// sharing a common anchor. Use the spec's `Display` (as
/// [`SlotStatus::spec`](super::SlotStatus::spec) does) to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubsetKey {
    unit_id: String,
    spec: AddressSpec,
}

impl SubsetKey {
    pub fn new(unit_id: impl Into<String>, spec: AddressSpec) -> Self {
        Self {
            unit_id: unit_id.into(),
            spec,
        }
    }

    pub fn of<S: AddressedSubset + ?Sized>(subset: &S) -> Self {
        Self::new(subset.unit_id(), subset.spec().clone())
    }

    #[must_use]
    pub fn unit_id(&self) -> &str {
        &self.unit_id
    }

    #[must_use]
    pub fn spec(&self) -> &AddressSpec {
        &self.spec
    }
}

impl fmt::Display for SubsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.unit_id, self.spec.url())?;
        if let AddressSpec::Range(r) = &self.spec {
            if r.is_restricted() {
                write!(
                    f,
                    "{KEY_SEPARATOR}{}{BOUND_SEPARATOR}{}",
                    r.lower_bound().unwrap_or(""),
                    r.upper_bound().unwrap_or("")
                )?;
            }
        }
        Ok(())
    }
}

impl FromStr for SubsetKey {
    type Err = AddressSpecError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let (unit_id, rest) = key
            .split_once(KEY_SEPARATOR)
            .ok_or(AddressSpecError::MissingAnchor)?;
        let (anchor, bounds) = match rest.split_once(KEY_SEPARATOR) {
            Some((anchor, bounds)) => (anchor, Some(bounds)),
            None => (rest, None),
        };
        if anchor.is_empty() {
            return Err(AddressSpecError::MissingAnchor);
        }
        if anchor == WHOLE_TREE_URL {
            return Ok(Self::new(unit_id, AddressSpec::WholeTree));
        }
        let spec = match bounds.and_then(|b| b.split_once(BOUND_SEPARATOR)) {
            Some((lower, upper)) => AddressSpec::bounded_range(
                anchor,
                Some(lower).filter(|s| !s.is_empty()),
                Some(upper).filter(|s| !s.is_empty()),
            )?,
            None => AddressSpec::range(anchor),
        };
        Ok(Self::new(unit_id, spec))
    }
}

/// Relation between two textual slot keys
///
/// Keys of different units, and keys that do not parse, are unrelated.
#[must_use]
pub fn get_relation(key1: &str, key2: &str) -> Relation {
    match (key1.parse::<SubsetKey>(), key2.parse::<SubsetKey>()) {
        (Ok(a), Ok(b)) if a.unit_id == b.unit_id => relation_of(&a.spec, &b.spec),
        (Ok(_), Ok(_)) => Relation::None,
        (a, b) => {
            log::debug!("Unparseable slot key in relation check: {a:?}, {b:?}");
            Relation::None
        }
    }
}
