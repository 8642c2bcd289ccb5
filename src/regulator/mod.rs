//! Activity regulator: non-blocking arbitration of crawls and polls
//!
//! Each preservation unit has one unit-level slot and any number of
//! subset-level slots keyed by address spec. A start request either wins its
//! slot atomically or returns `false`; nothing ever queues. Leases carry an
//! expiration and lapse silently when it passes, checked lazily on every
//! access against the injected [`TimeSource`](crate::clock::TimeSource).
//!
//! ```
//! use std::sync::Arc;
//! use citepreserve::clock::SimulatedClock;
//! use citepreserve::regulator::{Activity, ActivityRegulator};
//!
//! let clock = SimulatedClock::new(0);
//! let regulator = ActivityRegulator::new(Arc::new(clock.clone()));
//! assert!(regulator.start_unit_activity(Activity::NewContentCrawl, "au1", 10));
//! assert!(!regulator.start_unit_activity(Activity::TopLevelPoll, "au1", 10));
//! clock.step(11);
//! assert_eq!(regulator.unit_activity("au1"), Activity::NoActivity);
//! ```

mod activity;
mod core;
mod events;
mod relation;
pub mod rules;
mod slots;
mod status;
mod subset_ops;
mod unit_ops;

pub use activity::Activity;
pub use self::core::ActivityRegulator;
pub use events::{ActivityEvent, ActivityEventBus, SlotScope};
pub use relation::{Relation, SubsetKey, get_relation, relation_of};
pub use status::SlotStatus;
pub use unit_ops::SubsetRequest;
