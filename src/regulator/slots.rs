//! Per-unit slot state
//!
//! One `UnitSlots` exists per unit and is only touched while its mutex is
//! held. Expired leases are removed lazily by the caller before any decision.

use std::collections::HashMap;

use crate::address_spec::AddressSpec;

use super::activity::Activity;

/// A time-bounded claim on a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Lease {
    pub(crate) activity: Activity,
    pub(crate) expires_at_ms: u64,
}

impl Lease {
    pub(crate) fn new(activity: Activity, expires_at_ms: u64) -> Self {
        Self {
            activity,
            expires_at_ms,
        }
    }

    pub(crate) fn is_live(&self, now_ms: u64) -> bool {
        now_ms < self.expires_at_ms
    }

    pub(crate) fn extend(&mut self, extension_ms: u64) {
        self.expires_at_ms = self.expires_at_ms.saturating_add(extension_ms);
    }
}

#[derive(Debug, Default)]
pub(crate) struct UnitSlots {
    pub(crate) unit: Option<Lease>,
    pub(crate) subsets: HashMap<AddressSpec, Lease>,
}

impl UnitSlots {
    /// Remove the unit lease if it has lapsed, returning it
    pub(crate) fn expire_unit(&mut self, now_ms: u64) -> Option<Lease> {
        match self.unit {
            Some(lease) if !lease.is_live(now_ms) => self.unit.take(),
            _ => None,
        }
    }

    /// Remove every lapsed subset lease, returning the removed entries
    pub(crate) fn expire_subsets(&mut self, now_ms: u64) -> Vec<(AddressSpec, Lease)> {
        let expired: Vec<AddressSpec> = self
            .subsets
            .iter()
            .filter(|(_, lease)| !lease.is_live(now_ms))
            .map(|(spec, _)| spec.clone())
            .collect();
        expired
            .into_iter()
            .filter_map(|spec| self.subsets.remove_entry(&spec))
            .collect()
    }

    pub(crate) fn unit_activity(&self) -> Activity {
        self.unit.map_or(Activity::NoActivity, |l| l.activity)
    }

    pub(crate) fn holds_placeholder(&self) -> bool {
        self.unit_activity() == Activity::SubsetPlaceholder
    }

    /// Set or raise the placeholder so it outlives a subset lease
    ///
    /// A unit slot held by a real unit activity is left alone.
    pub(crate) fn cover_with_placeholder(&mut self, expires_at_ms: u64) {
        match &mut self.unit {
            None => self.unit = Some(Lease::new(Activity::SubsetPlaceholder, expires_at_ms)),
            Some(lease) if lease.activity == Activity::SubsetPlaceholder => {
                lease.expires_at_ms = lease.expires_at_ms.max(expires_at_ms);
            }
            Some(_) => {}
        }
    }

    /// Put a placeholder on an empty unit slot while subsets are still busy
    pub(crate) fn cover_live_subsets(&mut self) {
        if self.unit.is_none() {
            if let Some(latest) = self.subsets.values().map(|l| l.expires_at_ms).max() {
                self.unit = Some(Lease::new(Activity::SubsetPlaceholder, latest));
            }
        }
    }

    /// Clear the placeholder once no subset lease remains
    pub(crate) fn release_placeholder_if_idle(&mut self) -> bool {
        if self.subsets.is_empty() && self.holds_placeholder() {
            self.unit = None;
            return true;
        }
        false
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.unit.is_none() && self.subsets.is_empty()
    }
}
