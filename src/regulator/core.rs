//! The `ActivityRegulator` service object and its shared helpers

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::clock::{SystemClock, TimeSource};
use crate::config::RegulatorConfig;

use super::events::{ActivityEvent, ActivityEventBus, SlotScope};
use super::relation::SubsetKey;
use super::slots::UnitSlots;

/// In-memory registry of which activity holds which slot, and until when
///
/// Every check-then-set runs under the owning unit's mutex, so two callers
/// racing for incompatible slots of one unit can never both succeed. Units
/// never contend with each other. No operation blocks on anything other than
/// that mutex, and none waits for a slot to become free.
pub struct ActivityRegulator {
    units: DashMap<String, Arc<Mutex<UnitSlots>>>,
    clock: Arc<dyn TimeSource>,
    config: RegulatorConfig,
    events: ActivityEventBus,
    active: AtomicBool,
}

impl std::fmt::Debug for ActivityRegulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityRegulator")
            .field("units", &self.units.len())
            .field("config", &self.config)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl Default for ActivityRegulator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl ActivityRegulator {
    /// Create a running regulator with default configuration
    #[must_use]
    pub fn new(clock: Arc<dyn TimeSource>) -> Self {
        Self::with_config(clock, RegulatorConfig::default())
    }

    #[must_use]
    pub fn with_config(clock: Arc<dyn TimeSource>, config: RegulatorConfig) -> Self {
        let events = ActivityEventBus::new(config.event_capacity());
        Self {
            units: DashMap::new(),
            clock,
            config,
            events,
            active: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn config(&self) -> &RegulatorConfig {
        &self.config
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Resume granting leases after [`stop_service`](Self::stop_service)
    pub fn start_service(&self) {
        if !self.active.swap(true, Ordering::SeqCst) {
            log::info!("Activity regulator started");
            self.publish(ActivityEvent::ServiceStarted);
        }
    }

    /// Drop every lease and refuse new ones until restarted
    ///
    /// Unit entries stay in the map and are reset under their own lock, so a
    /// caller still holding a unit's mutex keeps sharing it with later callers.
    pub fn stop_service(&self) {
        self.active.store(false, Ordering::SeqCst);
        let units: Vec<Arc<Mutex<UnitSlots>>> =
            self.units.iter().map(|entry| Arc::clone(entry.value())).collect();
        let mut dropped = 0;
        for slots in units {
            let mut slots = slots.lock();
            if !slots.is_empty() {
                dropped += 1;
            }
            *slots = UnitSlots::default();
        }
        log::info!("Activity regulator stopped, cleared {dropped} unit(s)");
        self.publish(ActivityEvent::ServiceStopped);
    }

    /// Receiver for activity events published from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ActivityEvent> {
        self.events.subscribe()
    }

    pub(super) fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    pub(super) fn publish(&self, event: ActivityEvent) {
        self.events.publish(event);
    }

    /// Slot state for `unit_id`, created on first use
    pub(super) fn slots_for(&self, unit_id: &str) -> Arc<Mutex<UnitSlots>> {
        self.units
            .entry(unit_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(UnitSlots::default())))
            .clone()
    }

    /// Slot state for `unit_id` if any lease was ever taken on it
    pub(super) fn existing_slots(&self, unit_id: &str) -> Option<Arc<Mutex<UnitSlots>>> {
        self.units.get(unit_id).map(|entry| Arc::clone(entry.value()))
    }

    pub(super) fn unit_ids(&self) -> Vec<String> {
        self.units.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Apply lazy expiry to one unit's slots
    pub(super) fn sweep(&self, unit_id: &str, slots: &mut UnitSlots, now: u64) {
        if let Some(lease) = slots.expire_unit(now) {
            log::debug!("Removing expired {} on unit '{unit_id}'", lease.activity);
            self.publish(ActivityEvent::Expired {
                slot: unit_scope(unit_id),
                activity: lease.activity,
            });
        }
        for (spec, lease) in slots.expire_subsets(now) {
            let key = SubsetKey::new(unit_id, spec).to_string();
            log::debug!("Removing expired {} on subset '{key}'", lease.activity);
            self.publish(ActivityEvent::Expired {
                slot: SlotScope::Subset { key },
                activity: lease.activity,
            });
        }
        slots.cover_live_subsets();
    }

    /// Refuse `what` when the service is stopped
    ///
    /// Checked again after taking a unit lock, since a stop may land between
    /// the first check and the lock.
    pub(super) fn refuse_if_stopped(&self, what: impl std::fmt::Display) -> bool {
        if self.is_active() {
            return false;
        }
        log::debug!("Regulator stopped. Couldn't {what}");
        true
    }
}

pub(super) fn unit_scope(unit_id: &str) -> SlotScope {
    SlotScope::Unit {
        unit_id: unit_id.to_string(),
    }
}
