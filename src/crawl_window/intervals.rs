//! Enumeration of concrete permitted intervals

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::CrawlWindow;
use crate::utils::constants::CRAWL_INTERVAL_STEP_MS;

/// Half-open wall-clock interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Sum of the lengths of `intervals`
pub fn total_duration<'a, I>(intervals: I) -> Duration
where
    I: IntoIterator<Item = &'a TimeInterval>,
{
    intervals
        .into_iter()
        .fold(Duration::zero(), |acc, i| acc + i.duration())
}

/// Lazy sequence of maximal permitted runs
///
/// The window is sampled once per step; each run starts at the first
/// permitted sample and ends at the first refused one, or at the end of the
/// range.
#[derive(Clone)]
pub struct CrawlIntervals<'a> {
    window: &'a dyn CrawlWindow,
    cursor: DateTime<Utc>,
    to: DateTime<Utc>,
    step: Duration,
}

impl Iterator for CrawlIntervals<'_> {
    type Item = TimeInterval;

    fn next(&mut self) -> Option<TimeInterval> {
        while self.cursor < self.to && !self.window.can_crawl(self.cursor) {
            self.cursor += self.step;
        }
        if self.cursor >= self.to {
            return None;
        }
        let start = self.cursor;
        while self.cursor < self.to && self.window.can_crawl(self.cursor) {
            self.cursor += self.step;
        }
        let end = self.cursor.min(self.to);
        Some(TimeInterval::new(start, end))
    }
}

/// Permitted intervals of `window` within `[from, to]` at one-minute granularity
///
/// Each call starts a fresh enumeration.
pub fn get_crawl_intervals<'a, W>(
    window: &'a W,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> CrawlIntervals<'a>
where
    W: CrawlWindow + 'a,
{
    crawl_intervals_with_step(window, from, to, Duration::milliseconds(CRAWL_INTERVAL_STEP_MS))
}

/// As [`get_crawl_intervals`] with a caller-chosen sampling step
///
/// A non-positive step falls back to one minute.
pub fn crawl_intervals_with_step<'a, W>(
    window: &'a W,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    step: Duration,
) -> CrawlIntervals<'a>
where
    W: CrawlWindow + 'a,
{
    let step = if step > Duration::zero() {
        step
    } else {
        Duration::milliseconds(CRAWL_INTERVAL_STEP_MS)
    };
    CrawlIntervals {
        window,
        cursor: from,
        to,
        step,
    }
}
