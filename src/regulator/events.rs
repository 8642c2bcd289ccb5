//! Activity events published by the regulator
//!
//! Publishing is best-effort: the regulator never waits on subscribers, and a
//! send with no receivers is dropped silently. Lagging receivers see
//! `RecvError::Lagged` and lose the oldest events.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::activity::Activity;
use super::relation::Relation;

/// Which slot an event concerns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum SlotScope {
    Unit { unit_id: String },
    /// Subset slot, identified by its slot key
    Subset { key: String },
}

/// Regulator state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ActivityEvent {
    Started {
        slot: SlotScope,
        activity: Activity,
        expires_at_ms: u64,
    },
    /// A start request lost to an incompatible activity
    Denied {
        slot: SlotScope,
        activity: Activity,
        blocking: Activity,
        /// Relation of the blocking slot, `None` when the unit slot blocked
        relation: Option<Relation>,
    },
    Finished {
        slot: SlotScope,
        activity: Activity,
    },
    /// A lease lapsed and was removed on read
    Expired {
        slot: SlotScope,
        activity: Activity,
    },
    Renewed {
        slot: SlotScope,
        activity: Activity,
        expires_at_ms: u64,
    },
    ServiceStarted,
    ServiceStopped,
}

/// Broadcast channel for [`ActivityEvent`]s
#[derive(Debug)]
pub struct ActivityEventBus {
    sender: broadcast::Sender<ActivityEvent>,
}

impl ActivityEventBus {
    /// Create a bus buffering up to `capacity` events per receiver
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish to current subscribers, returning how many received it
    pub fn publish(&self, event: ActivityEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ActivityEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
