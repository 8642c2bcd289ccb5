//! Crawl windows: calendar predicates deciding when crawling may run
//!
//! Windows compose through [`WindowRule`]; [`PolicyWindow`] and
//! [`FirstMatch`] layer include/exclude policies on top, and
//! [`get_crawl_intervals`] turns any window into concrete permitted spans.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use citepreserve::crawl_window::{CrawlWindow, DailyWindow};
//!
//! let window = DailyWindow::new("2:00", "7:00", None, "GMT").expect("window");
//! let at = Utc.with_ymd_and_hms(2014, 1, 1, 3, 0, 0).single().expect("time");
//! assert!(window.can_crawl(at));
//! ```

mod calendar;
mod daily;
mod errors;
mod intervals;
mod policy;
mod rules;
mod zone;

use std::fmt::Debug;
use std::sync::Arc;

use chrono::{DateTime, Utc};

pub use calendar::{CalendarField, CalendarPoint, FieldMask};
pub use daily::DailyWindow;
pub use errors::CrawlWindowError;
pub use intervals::{
    CrawlIntervals, TimeInterval, crawl_intervals_with_step, get_crawl_intervals, total_duration,
};
pub use policy::{FirstMatch, MatchPolicy, PolicyWindow, WindowVerdict};
pub use rules::{CalendarInterval, FieldSet, WindowRule};
pub use zone::WindowZone;

/// Time-based permission check consulted before and during a crawl
pub trait CrawlWindow: Send + Sync + Debug {
    /// Whether crawling is permitted at `at`
    fn can_crawl(&self, at: DateTime<Utc>) -> bool;
}

impl<W: CrawlWindow + ?Sized> CrawlWindow for Arc<W> {
    fn can_crawl(&self, at: DateTime<Utc>) -> bool {
        (**self).can_crawl(at)
    }
}

impl<W: CrawlWindow + ?Sized> CrawlWindow for &W {
    fn can_crawl(&self, at: DateTime<Utc>) -> bool {
        (**self).can_crawl(at)
    }
}
