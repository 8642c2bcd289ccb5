//! Unit-level leases and the unit-to-subset hand-off

use crate::address_spec::AddressSpec;
use crate::unit::PreservationUnit;

use super::activity::Activity;
use super::core::{ActivityRegulator, unit_scope};
use super::events::ActivityEvent;
use super::rules;

/// One subset lease requested during a hand-off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetRequest {
    pub activity: Activity,
    pub spec: AddressSpec,
    pub duration_ms: u64,
}

impl SubsetRequest {
    #[must_use]
    pub fn new(activity: Activity, spec: AddressSpec, duration_ms: u64) -> Self {
        Self {
            activity,
            spec,
            duration_ms,
        }
    }
}

impl ActivityRegulator {
    /// Try to claim the unit slot for `duration_ms`
    ///
    /// Returns `false`, changing nothing, when the current unit activity does
    /// not admit `activity` or the service is stopped.
    pub fn start_unit_activity<U>(&self, activity: Activity, unit: &U, duration_ms: u64) -> bool
    where
        U: PreservationUnit + ?Sized,
    {
        let unit_id = unit.unit_id();
        if self.refuse_if_stopped(format_args!("start {activity} on unit '{unit_id}'")) {
            return false;
        }
        if !activity.is_requestable() || !activity.is_unit_activity() {
            log::warn!("{activity} is not a unit activity, refusing it on unit '{unit_id}'");
            return false;
        }

        let slots = self.slots_for(unit_id);
        let mut slots = slots.lock();
        if !self.is_active() {
            return false;
        }
        let now = self.now();
        self.sweep(unit_id, &mut slots, now);

        let current = slots.unit_activity();
        if !rules::is_allowed_on_unit(activity, current) {
            log::debug!("Unit '{unit_id}' busy with {current}. Couldn't start {activity}");
            self.publish(ActivityEvent::Denied {
                slot: unit_scope(unit_id),
                activity,
                blocking: current,
                relation: None,
            });
            return false;
        }

        let expires_at_ms = now.saturating_add(duration_ms);
        slots.unit = Some(super::slots::Lease::new(activity, expires_at_ms));
        log::debug!("Started {activity} on unit '{unit_id}'");
        self.publish(ActivityEvent::Started {
            slot: unit_scope(unit_id),
            activity,
            expires_at_ms,
        });
        true
    }

    /// Release the unit slot if `activity` holds it
    ///
    /// A mismatched call is ignored. Subsets still running under the unit keep
    /// it covered by the subset placeholder.
    pub fn unit_activity_finished<U>(&self, activity: Activity, unit: &U)
    where
        U: PreservationUnit + ?Sized,
    {
        let unit_id = unit.unit_id();
        let Some(slots) = self.existing_slots(unit_id) else {
            log::debug!("No activity on unit '{unit_id}', ignoring finish of {activity}");
            return;
        };
        let mut slots = slots.lock();
        let now = self.now();
        self.sweep(unit_id, &mut slots, now);

        let current = slots.unit_activity();
        if current != activity {
            log::debug!("Unit '{unit_id}' holds {current}, ignoring finish of {activity}");
            return;
        }
        slots.unit = None;
        slots.cover_live_subsets();
        log::debug!("Finished {activity} on unit '{unit_id}'");
        self.publish(ActivityEvent::Finished {
            slot: unit_scope(unit_id),
            activity,
        });
    }

    /// Extend a live unit lease held by `activity` by the configured extension
    pub fn renew_unit_activity<U>(&self, activity: Activity, unit: &U) -> bool
    where
        U: PreservationUnit + ?Sized,
    {
        let unit_id = unit.unit_id();
        if self.refuse_if_stopped(format_args!("renew {activity} on unit '{unit_id}'")) {
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
        match slots.unit.as_mut() {
            Some(lease) if lease.activity == activity => {
                lease.extend(extension);
                let expires_at_ms = lease.expires_at_ms;
                log::debug!("Extending {activity} on unit '{unit_id}' by {extension}ms");
                self.publish(ActivityEvent::Renewed {
                    slot: unit_scope(unit_id),
                    activity,
                    expires_at_ms,
                });
                true
            }
            _ => {
                log::debug!("Unit '{unit_id}' not held by {activity}, couldn't renew");
                false
            }
        }
    }

    /// Current unit activity, after lazy expiry
    pub fn unit_activity<U>(&self, unit: &U) -> Activity
    where
        U: PreservationUnit + ?Sized,
    {
        let unit_id = unit.unit_id();
        let Some(slots) = self.existing_slots(unit_id) else {
            return Activity::NoActivity;
        };
        let mut slots = slots.lock();
        let now = self.now();
        self.sweep(unit_id, &mut slots, now);
        slots.unit_activity()
    }

    /// Convert a unit lease held by `activity` into subset leases
    ///
    /// Requests are tried in order under the unit's lock and each is judged
    /// against the grants before it. Returns one flag per request, or an empty
    /// list if `activity` does not hold the unit. The unit slot ends up as the
    /// subset placeholder, or empty when nothing was granted.
    pub fn hand_off_to_subsets<U>(
        &self,
        activity: Activity,
        unit: &U,
        requests: &[SubsetRequest],
    ) -> Vec<bool>
    where
        U: PreservationUnit + ?Sized,
    {
        let unit_id = unit.unit_id();
        if self.refuse_if_stopped(format_args!("hand off {activity} on unit '{unit_id}'")) {
            return Vec::new();
        }
        let Some(slots) = self.existing_slots(unit_id) else {
            return Vec::new();
        };
        let mut slots = slots.lock();
        if !self.is_active() {
            return Vec::new();
        }
        let now = self.now();
        self.sweep(unit_id, &mut slots, now);

        if slots.unit_activity() != activity {
            log::debug!(
                "Unit '{unit_id}' holds {}, couldn't hand off {activity}",
                slots.unit_activity()
            );
            return Vec::new();
        }

        if requests.is_empty() {
            log::debug!("No subset leases requested. Ending {activity} on unit '{unit_id}'");
        } else {
            log::debug!("Changing lease on unit '{unit_id}' from {activity} to subset activity");
        }
        slots.unit = None;
        self.publish(ActivityEvent::Finished {
            slot: unit_scope(unit_id),
            activity,
        });

        let grants: Vec<bool> = requests
            .iter()
            .map(|req| {
                self.try_start_subset(
                    unit_id,
                    &mut slots,
                    req.activity,
                    &req.spec,
                    req.duration_ms,
                    now,
                )
            })
            .collect();
        slots.cover_live_subsets();
        grants
    }
}
