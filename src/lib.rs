//! Preservation core: address-spec algebra, activity regulation and crawl windows
//!
//! A scheduler first asks a [`crawl_window::CrawlWindow`] whether now is an
//! allowed time, then asks the [`ActivityRegulator`] whether an activity may
//! start on a unit or on a subset named by an [`AddressSpec`].

pub mod address_spec;
pub mod clock;
pub mod config;
pub mod crawl_window;
pub mod regulator;
pub mod unit;
pub mod utils;

pub use address_spec::{AddressSpec, AddressSpecError, PruneMode, UnsupportedOperation};
pub use clock::{SimulatedClock, SystemClock, TimeSource};
pub use config::{RegulatorConfig, RegulatorConfigBuilder};
pub use crawl_window::{CrawlWindow, CrawlWindowError, DailyWindow, WindowRule, get_crawl_intervals};
pub use regulator::{Activity, ActivityEvent, ActivityRegulator, Relation, SubsetKey};
pub use unit::{AddressedSubset, PreservationUnit, UnitSubset};
