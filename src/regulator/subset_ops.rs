//! Subset-level leases

use crate::address_spec::AddressSpec;
use crate::unit::AddressedSubset;

use super::activity::Activity;
use super::core::{ActivityRegulator, unit_scope};
use super::events::{ActivityEvent, SlotScope};
use super::relation::{Relation, SubsetKey, relation_of};
use super::rules;
use super::slots::{Lease, UnitSlots};

impl ActivityRegulator {
    /// Try to claim a subset slot for `duration_ms`
    ///
    /// The request must be admitted by the unit slot and by every live subset
    /// slot of the same unit that overlaps it. On success the unit slot is
    /// covered by the subset placeholder unless a unit activity holds it.
    pub fn start_subset_activity<S>(&self, activity: Activity, subset: &S, duration_ms: u64) -> bool
    where
        S: AddressedSubset + ?Sized,
    {
        let unit_id = subset.unit_id();
        if self.refuse_if_stopped(format_args!("start {activity} on '{}'", subset.spec())) {
            return false;
        }

        let slots = self.slots_for(unit_id);
        let mut slots = slots.lock();
        if !self.is_active() {
            return false;
        }
        let now = self.now();
        self.sweep(unit_id, &mut slots, now);
        self.try_start_subset(unit_id, &mut slots, activity, subset.spec(), duration_ms, now)
    }

    /// Check-then-set for one subset lease; caller holds the unit lock
    pub(super) fn try_start_subset(
        &self,
        unit_id: &str,
        slots: &mut UnitSlots,
        activity: Activity,
        spec: &AddressSpec,
        duration_ms: u64,
        now: u64,
    ) -> bool {
        let key = SubsetKey::new(unit_id, spec.clone()).to_string();
        if !activity.is_requestable() || !activity.is_subset_activity() {
            log::warn!("{activity} is not a subset activity, refusing it on '{key}'");
            return false;
        }

        let unit_current = slots.unit_activity();
        if !rules::is_allowed_on_unit(activity, unit_current) {
            log::debug!(
                "Unit '{unit_id}' busy with {unit_current}. Couldn't start {activity} on '{key}'"
            );
            self.publish(ActivityEvent::Denied {
                slot: SlotScope::Subset { key },
                activity,
                blocking: unit_current,
                relation: None,
            });
            return false;
        }

        for (existing, lease) in &slots.subsets {
            let relation = relation_of(existing, spec);
            if relation == Relation::None {
                continue;
            }
            if !rules::is_allowed_on_subset(activity, lease.activity, relation) {
                log::debug!(
                    "{relation} subset '{existing}' busy with {}, refusing {activity} on '{key}'",
                    lease.activity
                );
                self.publish(ActivityEvent::Denied {
                    slot: SlotScope::Subset { key },
                    activity,
                    blocking: lease.activity,
                    relation: Some(relation),
                });
                return false;
            }
        }

        let expires_at_ms = now.saturating_add(duration_ms);
        slots
            .subsets
            .insert(spec.clone(), Lease::new(activity, expires_at_ms));
        slots.cover_with_placeholder(expires_at_ms);
        log::debug!("Started {activity} on '{key}'");
        self.publish(ActivityEvent::Started {
            slot: SlotScope::Subset { key },
            activity,
            expires_at_ms,
        });
        true
    }

    /// Release a subset slot if `activity` holds it
    ///
    /// A mismatched call is ignored. Releasing the last busy subset of a unit
    /// also clears the unit's placeholder.
    pub fn subset_activity_finished<S>(&self, activity: Activity, subset: &S)
    where
        S: AddressedSubset + ?Sized,
    {
        let unit_id = subset.unit_id();
        let key = SubsetKey::of(subset).to_string();
        let Some(slots) = self.existing_slots(unit_id) else {
            log::debug!("No activity on '{key}', ignoring finish of {activity}");
            return;
        };
        let mut slots = slots.lock();
        let now = self.now();
        self.sweep(unit_id, &mut slots, now);

        let current = slots
            .subsets
            .get(subset.spec())
            .map_or(Activity::NoActivity, |l| l.activity);
        if current != activity {
            log::debug!("'{key}' holds {current}, ignoring finish of {activity}");
            return;
        }
        slots.subsets.remove(subset.spec());
        log::debug!("Finished {activity} on '{key}'");
        self.publish(ActivityEvent::Finished {
            slot: SlotScope::Subset { key },
            activity,
        });

        if slots.release_placeholder_if_idle() {
            log::debug!("Finished {} on unit '{unit_id}'", Activity::SubsetPlaceholder);
            self.publish(ActivityEvent::Finished {
                slot: unit_scope(unit_id),
                activity: Activity::SubsetPlaceholder,
            });
        }
    }

    /// Extend a live subset lease held by `activity`
    ///
    /// The unit placeholder is raised to cover the new expiration.
    pub fn renew_subset_activity<S>(&self, activity: Activity, subset: &S) -> bool
    where
        S: AddressedSubset + ?Sized,
    {
        let unit_id = subset.unit_id();
        let key = SubsetKey::of(subset).to_string();
        if self.refuse_if_stopped(format_args!("renew {activity} on '{key}'")) {
            return false;
        }
        let Some(slots) = self.existing_slots(unit_id) else {
            return false;
        };
        let mut slots = slots.lock();
        if !self.is_active() {
            return false;
        }
        let now = self.now();
        self.sweep(unit_id, &mut slots, now);

        let extension = self.config().lease_extension_ms();
        let expires_at_ms = match slots.subsets.get_mut(subset.spec()) {
            Some(lease) if lease.activity == activity => {
                lease.extend(extension);
                lease.expires_at_ms
            }
            _ => {
                log::debug!("'{key}' not held by {activity}, couldn't renew");
                return false;
            }
        };
        slots.cover_with_placeholder(expires_at_ms);
        log::debug!("Extending {activity} on '{key}' by {extension}ms");
        self.publish(ActivityEvent::Renewed {
            slot: SlotScope::Subset { key },
            activity,
            expires_at_ms,
        });
        true
    }

    /// Current activity on exactly this subset, after lazy expiry
    pub fn subset_activity<S>(&self, subset: &S) -> Activity
    where
        S: AddressedSubset + ?Sized,
    {
        let unit_id = subset.unit_id();
        let Some(slots) = self.existing_slots(unit_id) else {
            return Activity::NoActivity;
        };
        let mut slots = slots.lock();
        let now = self.now();
        self.sweep(unit_id, &mut slots, now);
        slots
            .subsets
            .get(subset.spec())
            .map_or(Activity::NoActivity, |l| l.activity)
    }
}
