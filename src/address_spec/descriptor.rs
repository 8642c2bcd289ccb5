//! Serde-facing description of an address spec
//!
//! Data-driven callers (configuration, poll messages) describe specs as loose
//! records. Converting a [`SpecDescriptor`] into an [`AddressSpec`] is the
//! single place where missing fields and malformed patterns are rejected.

use serde::{Deserialize, Serialize};

use super::{AddressSpec, AddressSpecError, PruneMode, SpecResult};

/// Variant tag of a [`SpecDescriptor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecKind {
    WholeTree,
    SingleNode,
    Range,
    Pruned,
    Pattern,
    Union,
}

/// Prune mode as it appears in descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PruneModeDescriptor {
    Include,
    Exclude,
}

impl From<PruneModeDescriptor> for PruneMode {
    fn from(mode: PruneModeDescriptor) -> Self {
        match mode {
            PruneModeDescriptor::Include => PruneMode::Include,
            PruneModeDescriptor::Exclude => PruneMode::Exclude,
        }
    }
}

/// Untyped record describing one address spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecDescriptor {
    pub kind: SpecKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<PruneModeDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<SpecDescriptor>>,
}

impl SpecDescriptor {
    fn new(kind: SpecKind) -> Self {
        Self {
            kind,
            url: None,
            lower: None,
            upper: None,
            pattern: None,
            mode: None,
            members: None,
        }
    }

    fn anchor(&self) -> SpecResult<String> {
        self.url.clone().ok_or(AddressSpecError::MissingAnchor)
    }
}

impl TryFrom<SpecDescriptor> for AddressSpec {
    type Error = AddressSpecError;

    fn try_from(desc: SpecDescriptor) -> SpecResult<Self> {
        match desc.kind {
            SpecKind::WholeTree => Ok(AddressSpec::WholeTree),
            SpecKind::SingleNode => Ok(AddressSpec::single_node(desc.anchor()?)),
            SpecKind::Range => AddressSpec::bounded_range(
                desc.anchor()?,
                desc.lower.as_deref(),
                desc.upper.as_deref(),
            ),
            SpecKind::Pruned => {
                let prefix = desc.anchor()?;
                let mode = desc.mode.unwrap_or(PruneModeDescriptor::Include).into();
                AddressSpec::pruned(prefix, desc.pattern.as_deref().unwrap_or(""), mode)
            }
            SpecKind::Pattern => {
                AddressSpec::pattern(desc.anchor()?, desc.pattern.as_deref().unwrap_or(""))
            }
            SpecKind::Union => {
                let members = desc.members.ok_or(AddressSpecError::MissingMembers)?;
                let members = members
                    .into_iter()
                    .map(AddressSpec::try_from)
                    .collect::<SpecResult<Vec<_>>>()?;
                Ok(AddressSpec::union(members))
            }
        }
    }
}

impl From<&AddressSpec> for SpecDescriptor {
    fn from(spec: &AddressSpec) -> Self {
        match spec {
            AddressSpec::WholeTree => Self::new(SpecKind::WholeTree),
            AddressSpec::SingleNode(s) => Self {
                url: Some(s.url().to_string()),
                ..Self::new(SpecKind::SingleNode)
            },
            AddressSpec::Range(r) => Self {
                url: Some(r.prefix().to_string()),
                lower: r.lower_bound().map(str::to_string),
                upper: r.upper_bound().map(str::to_string),
                ..Self::new(SpecKind::Range)
            },
            AddressSpec::Pruned(p) => Self {
                url: Some(p.prefix().to_string()),
                pattern: Some(p.filter().as_str().to_string()),
                mode: Some(match p.mode() {
                    PruneMode::Include => PruneModeDescriptor::Include,
                    PruneMode::Exclude => PruneModeDescriptor::Exclude,
                }),
                ..Self::new(SpecKind::Pruned)
            },
            AddressSpec::Pattern(p) => Self {
                url: Some(p.prefix().to_string()),
                pattern: Some(p.pattern().as_str().to_string()),
                ..Self::new(SpecKind::Pattern)
            },
            AddressSpec::Union(u) => Self {
                members: Some(u.members().iter().map(SpecDescriptor::from).collect()),
                ..Self::new(SpecKind::Union)
            },
        }
    }
}
