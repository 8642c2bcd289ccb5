//! Read-only view of the live slots

use serde::Serialize;

use super::activity::Activity;
use super::core::ActivityRegulator;
use super::relation::SubsetKey;

/// One live lease
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStatus {
    pub unit_id: String,
    /// Subset slot key; `None` for the unit slot
    pub subset_key: Option<String>,
    /// Full description of the subset's address spec
    ///
    /// Tells apart subsets whose keys coincide, such as a single node and an
    /// unrestricted range at the same anchor.
    pub spec: Option<String>,
    pub activity: Activity,
    pub expires_at_ms: u64,
    pub remaining_ms: u64,
}

impl ActivityRegulator {
    /// Every live lease, unit slots first within each unit
    ///
    /// Applies lazy expiry to every unit it visits. Output is sorted by unit
    /// id, slot key and spec description.
    #[must_use]
    pub fn snapshot(&self) -> Vec<SlotStatus> {
        let mut unit_ids = self.unit_ids();
        unit_ids.sort();

        let mut out = Vec::new();
        for unit_id in unit_ids {
            let Some(slots) = self.existing_slots(&unit_id) else {
                continue;
            };
            let mut slots = slots.lock();
            let now = self.now();
            self.sweep(&unit_id, &mut slots, now);
            if slots.is_empty() {
                continue;
            }

            if let Some(lease) = slots.unit {
                out.push(SlotStatus {
                    unit_id: unit_id.clone(),
                    subset_key: None,
                    spec: None,
                    activity: lease.activity,
                    expires_at_ms: lease.expires_at_ms,
                    remaining_ms: lease.expires_at_ms.saturating_sub(now),
                });
            }
            let mut subsets: Vec<SlotStatus> = slots
                .subsets
                .iter()
                .map(|(spec, lease)| SlotStatus {
                    unit_id: unit_id.clone(),
                    subset_key: Some(SubsetKey::new(unit_id.as_str(), spec.clone()).to_string()),
                    spec: Some(spec.to_string()),
                    activity: lease.activity,
                    expires_at_ms: lease.expires_at_ms,
                    remaining_ms: lease.expires_at_ms.saturating_sub(now),
                })
                .collect();
            subsets.sort_by(|a, b| (&a.subset_key, &a.spec).cmp(&(&b.subset_key, &b.spec)));
            out.extend(subsets);
        }
        out
    }
}
