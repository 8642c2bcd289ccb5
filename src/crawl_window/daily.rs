//! Daily time-of-day windows with an optional day-of-week filter

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};

use super::CrawlWindow;
use super::calendar::{CalendarField, CalendarPoint};
use super::errors::CrawlWindowError;
use super::rules::CalendarInterval;
use super::zone::WindowZone;

/// Permits from `from` up to `to` each day, optionally only on listed days
///
/// A `to` earlier than `from` runs past midnight. Days are 1 (Sunday) to
/// 7 (Saturday) and test the local day of the instant being checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyWindow {
    from: (u32, u32),
    to: (u32, u32),
    days: Option<BTreeSet<u32>>,
    zone: WindowZone,
    interval: CalendarInterval,
}

impl DailyWindow {
    /// Build from `H:MM` times, an optional `;`-separated day list and a zone id
    pub fn new(
        from: &str,
        to: &str,
        days: Option<&str>,
        zone_id: &str,
    ) -> Result<Self, CrawlWindowError> {
        let zone: WindowZone = zone_id.parse()?;
        let from = parse_time(from)?;
        let to = parse_time(to)?;
        let days = days.map(parse_days).transpose()?;
        Ok(Self {
            from,
            to,
            days,
            zone,
            interval: CalendarInterval::time_of_day(from, to, zone),
        })
    }

    #[must_use]
    pub fn zone(&self) -> WindowZone {
        self.zone
    }

    /// Listed days in ascending order, if any
    pub fn days(&self) -> Option<impl Iterator<Item = u32> + '_> {
        self.days.as_ref().map(|d| d.iter().copied())
    }

    fn permits_point(&self, point: &CalendarPoint) -> bool {
        let day_ok = self
            .days
            .as_ref()
            .is_none_or(|days| days.contains(&point.get(CalendarField::DayOfWeek)));
        day_ok && self.interval.is_match(point)
    }
}

impl CrawlWindow for DailyWindow {
    fn can_crawl(&self, at: DateTime<Utc>) -> bool {
        self.permits_point(&self.zone.point_at(at))
    }
}

fn parse_time(text: &str) -> Result<(u32, u32), CrawlWindowError> {
    let invalid = || CrawlWindowError::InvalidTime(text.to_string());
    let (h, m) = text.trim().split_once(':').ok_or_else(invalid)?;
    let hour: u32 = h.parse().map_err(|_| invalid())?;
    let minute: u32 = m.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 || m.len() != 2 {
        return Err(invalid());
    }
    Ok((hour, minute))
}

fn parse_days(text: &str) -> Result<BTreeSet<u32>, CrawlWindowError> {
    let invalid = || CrawlWindowError::InvalidDays(text.to_string());
    let mut days = BTreeSet::new();
    for part in text.split(';') {
        let day: u32 = part.trim().parse().map_err(|_| invalid())?;
        if !(1..=7).contains(&day) {
            return Err(invalid());
        }
        days.insert(day);
    }
    Ok(days)
}

impl fmt::Display for DailyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.days {
            Some(days) => {
                f.write_str("Days ")?;
                for (i, day) in days.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    write!(f, "{day}")?;
                }
            }
            None => f.write_str("Daily")?,
        }
        write!(
            f,
            " from {}:{:02} to {}:{:02}, {}",
            self.from.0, self.from.1, self.to.0, self.to.1, self.zone
        )
    }
}
