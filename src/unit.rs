//! Collaborator traits for preservation units and their addressed subsets
//!
//! The regulator never reads a unit's content; it only needs the unit's id and,
//! for subsets, the address spec naming the part of the tree being worked on.

use serde::{Deserialize, Serialize};

use crate::address_spec::{AddressSpec, SpecDescriptor};

/// Owner of a URL tree, identified by a globally unique id
pub trait PreservationUnit {
    fn unit_id(&self) -> &str;
}

/// A part of a preservation unit named by an address spec
pub trait AddressedSubset {
    /// Id of the owning unit
    fn unit_id(&self) -> &str;

    fn spec(&self) -> &AddressSpec;
}

impl PreservationUnit for str {
    fn unit_id(&self) -> &str {
        self
    }
}

impl PreservationUnit for String {
    fn unit_id(&self) -> &str {
        self
    }
}

/// Plain (unit id, spec) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitSubset {
    unit_id: String,
    spec: AddressSpec,
}

impl UnitSubset {
    pub fn new(unit_id: impl Into<String>, spec: AddressSpec) -> Self {
        Self {
            unit_id: unit_id.into(),
            spec,
        }
    }

    /// Subset covering the whole unit
    pub fn whole_unit(unit_id: impl Into<String>) -> Self {
        Self::new(unit_id, AddressSpec::WholeTree)
    }
}

impl AddressedSubset for UnitSubset {
    fn unit_id(&self) -> &str {
        &self.unit_id
    }

    fn spec(&self) -> &AddressSpec {
        &self.spec
    }
}

/// Serialisable form of a [`UnitSubset`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsetDescriptor {
    pub unit_id: String,
    pub spec: SpecDescriptor,
}

impl TryFrom<SubsetDescriptor> for UnitSubset {
    type Error = crate::address_spec::AddressSpecError;

    fn try_from(desc: SubsetDescriptor) -> Result<Self, Self::Error> {
        Ok(Self::new(desc.unit_id, AddressSpec::try_from(desc.spec)?))
    }
}
