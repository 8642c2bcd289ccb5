//! Calendar rules and their boolean composition

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::CrawlWindow;
use super::calendar::{CalendarField, CalendarPoint, FieldMask};
use super::daily::DailyWindow;
use super::errors::CrawlWindowError;
use super::zone::WindowZone;

/// Circular interval over a composite of calendar fields
///
/// A start after the end wraps across the natural boundary of the most
/// significant field (Friday to Tuesday covers the weekend). When the least
/// significant field is the minute the end is exclusive, otherwise inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarInterval {
    start: CalendarPoint,
    end: CalendarPoint,
    mask: FieldMask,
    zone: WindowZone,
}

impl CalendarInterval {
    pub fn new(
        start: CalendarPoint,
        end: CalendarPoint,
        mask: FieldMask,
        zone: WindowZone,
    ) -> Result<Self, CrawlWindowError> {
        if mask.is_empty() {
            return Err(CrawlWindowError::EmptyFieldMask);
        }
        Ok(Self {
            start,
            end,
            mask,
            zone,
        })
    }

    /// Interval over one field
    pub fn on_field(field: CalendarField, start: u32, end: u32, zone: WindowZone) -> Self {
        Self {
            start: CalendarPoint::new().with(field, start),
            end: CalendarPoint::new().with(field, end),
            mask: field.into(),
            zone,
        }
    }

    /// `[start, end)` on the time of day
    #[must_use]
    pub fn time_of_day(start: (u32, u32), end: (u32, u32), zone: WindowZone) -> Self {
        Self {
            start: CalendarPoint::time(start.0, start.1),
            end: CalendarPoint::time(end.0, end.1),
            mask: FieldMask::TIME,
            zone,
        }
    }

    #[must_use]
    pub fn zone(&self) -> WindowZone {
        self.zone
    }

    /// Whether the masked fields of `point` fall in the interval
    #[must_use]
    pub fn is_match(&self, point: &CalendarPoint) -> bool {
        let value = point.project(self.mask);
        let start = self.start.project(self.mask);
        let end = self.end.project(self.mask);
        let before_end = if self.mask.least_significant() == Some(CalendarField::Minute) {
            value < end
        } else {
            value <= end
        };
        if start <= end {
            start <= value && before_end
        } else {
            start <= value || before_end
        }
    }
}

impl CrawlWindow for CalendarInterval {
    fn can_crawl(&self, at: DateTime<Utc>) -> bool {
        self.is_match(&self.zone.point_at(at))
    }
}

/// Discrete set of composite field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    values: Vec<[u32; 6]>,
    mask: FieldMask,
    zone: WindowZone,
}

impl FieldSet {
    pub fn new<I>(values: I, mask: FieldMask, zone: WindowZone) -> Result<Self, CrawlWindowError>
    where
        I: IntoIterator<Item = CalendarPoint>,
    {
        if mask.is_empty() {
            return Err(CrawlWindowError::EmptyFieldMask);
        }
        let mut values: Vec<[u32; 6]> = values.into_iter().map(|p| p.project(mask)).collect();
        if values.is_empty() {
            return Err(CrawlWindowError::EmptyFieldSet);
        }
        values.sort_unstable();
        values.dedup();
        Ok(Self { values, mask, zone })
    }

    /// Set of values of one field
    pub fn of_field<I>(
        field: CalendarField,
        values: I,
        zone: WindowZone,
    ) -> Result<Self, CrawlWindowError>
    where
        I: IntoIterator<Item = u32>,
    {
        Self::new(
            values.into_iter().map(|v| CalendarPoint::new().with(field, v)),
            field.into(),
            zone,
        )
    }

    #[must_use]
    pub fn is_match(&self, point: &CalendarPoint) -> bool {
        self.values.binary_search(&point.project(self.mask)).is_ok()
    }
}

impl CrawlWindow for FieldSet {
    fn can_crawl(&self, at: DateTime<Utc>) -> bool {
        self.is_match(&self.zone.point_at(at))
    }
}

/// Boolean tree of crawl windows
#[derive(Debug, Clone)]
pub enum WindowRule {
    Always,
    Never,
    Interval(CalendarInterval),
    FieldSet(FieldSet),
    Daily(DailyWindow),
    /// Permits when every member permits; empty permits
    And(Vec<WindowRule>),
    /// Permits when any member permits; empty denies
    Or(Vec<WindowRule>),
    Not(Box<WindowRule>),
    /// Any other window, e.g. a policy window or a caller's own rule
    Window(Arc<dyn CrawlWindow>),
}

impl WindowRule {
    #[must_use]
    pub fn and(rules: impl IntoIterator<Item = WindowRule>) -> Self {
        Self::And(rules.into_iter().collect())
    }

    #[must_use]
    pub fn or(rules: impl IntoIterator<Item = WindowRule>) -> Self {
        Self::Or(rules.into_iter().collect())
    }

    #[must_use]
    pub fn not(rule: WindowRule) -> Self {
        Self::Not(Box::new(rule))
    }

    pub fn window<W: CrawlWindow + 'static>(window: W) -> Self {
        Self::Window(Arc::new(window))
    }
}

impl CrawlWindow for WindowRule {
    fn can_crawl(&self, at: DateTime<Utc>) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Interval(i) => i.can_crawl(at),
            Self::FieldSet(s) => s.can_crawl(at),
            Self::Daily(d) => d.can_crawl(at),
            Self::And(rules) => rules.iter().all(|r| r.can_crawl(at)),
            Self::Or(rules) => rules.iter().any(|r| r.can_crawl(at)),
            Self::Not(rule) => !rule.can_crawl(at),
            Self::Window(w) => w.can_crawl(at),
        }
    }
}

impl From<CalendarInterval> for WindowRule {
    fn from(interval: CalendarInterval) -> Self {
        Self::Interval(interval)
    }
}

impl From<FieldSet> for WindowRule {
    fn from(set: FieldSet) -> Self {
        Self::FieldSet(set)
    }
}

impl From<DailyWindow> for WindowRule {
    fn from(daily: DailyWindow) -> Self {
        Self::Daily(daily)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dow(day: u32) -> CalendarPoint {
        CalendarPoint::new().with(CalendarField::DayOfWeek, day)
    }

    #[test]
    fn test_day_interval_standard() {
        // Tuesday to Friday
        let interval =
            CalendarInterval::on_field(CalendarField::DayOfWeek, 3, 6, WindowZone::Local);
        assert!(!interval.is_match(&dow(2)));
        assert!(interval.is_match(&dow(3)));
        assert!(interval.is_match(&dow(5)));
        assert!(interval.is_match(&dow(6)));
        assert!(!interval.is_match(&dow(7)));
    }

    #[test]
    fn test_time_interval_standard() {
        let interval = CalendarInterval::time_of_day((7, 30), (15, 45), WindowZone::Local);
        let t = |h, m| interval.is_match(&CalendarPoint::time(h, m));
        assert!(!t(6, 0));
        assert!(!t(7, 25));
        assert!(t(7, 30));
        assert!(t(12, 47));
        assert!(t(15, 44));
        assert!(!t(15, 45));
        assert!(!t(17, 0));
    }

    #[test]
    fn test_time_interval_wraps() {
        let interval = CalendarInterval::time_of_day((15, 30), (7, 45), WindowZone::Local);
        let t = |h, m| interval.is_match(&CalendarPoint::time(h, m));
        assert!(!t(14, 0));
        assert!(!t(15, 25));
        assert!(t(15, 30));
        assert!(t(17, 47));
        assert!(t(1, 47));
        assert!(t(7, 44));
        assert!(!t(7, 45));
        assert!(!t(8, 0));
    }

    #[test]
    fn test_multiple_fields() {
        // Tuesday to Friday of the first week
        let mask = FieldMask::WEEK_OF_MONTH | FieldMask::DAY_OF_WEEK;
        let start = dow(3).with(CalendarField::WeekOfMonth, 1);
        let end = dow(6).with(CalendarField::WeekOfMonth, 1);
        let interval =
            CalendarInterval::new(start, end, mask, WindowZone::Local).expect("interval");
        let at = |week, day| interval.is_match(&dow(day).with(CalendarField::WeekOfMonth, week));
        assert!(!at(1, 2));
        assert!(at(1, 3));
        assert!(at(1, 6));
        assert!(!at(1, 7));
        assert!(!at(2, 2));
        assert!(!at(2, 3));
        assert!(!at(2, 6));
    }

    #[test]
    fn test_field_sets() {
        let set = FieldSet::of_field(CalendarField::DayOfWeek, [2, 4, 6], WindowZone::Local)
            .expect("set");
        assert!(set.is_match(&dow(2)));
        assert!(!set.is_match(&dow(3)));
        assert!(set.is_match(&dow(4)));
        assert!(!set.is_match(&dow(5)));
        assert!(set.is_match(&dow(6)));

        let mask = FieldMask::DAY_OF_WEEK | FieldMask::WEEK_OF_MONTH;
        let set = FieldSet::new(
            [
                dow(2).with(CalendarField::WeekOfMonth, 1),
                dow(4).with(CalendarField::WeekOfMonth, 2),
            ],
            mask,
            WindowZone::Local,
        )
        .expect("set");
        assert!(set.is_match(&dow(2).with(CalendarField::WeekOfMonth, 1)));
        assert!(!set.is_match(&dow(4).with(CalendarField::WeekOfMonth, 1)));
        assert!(!set.is_match(&dow(2).with(CalendarField::WeekOfMonth, 2)));
        assert!(set.is_match(&dow(4).with(CalendarField::WeekOfMonth, 2)));
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            CalendarInterval::new(dow(1), dow(2), FieldMask::empty(), WindowZone::Local),
            Err(CrawlWindowError::EmptyFieldMask)
        );
        assert_eq!(
            FieldSet::of_field(CalendarField::Month, Vec::new(), WindowZone::Local),
            Err(CrawlWindowError::EmptyFieldSet)
        );
    }
}
