//! Time zones for crawl windows
//!
//! A window evaluates in its own zone, independent of the host's zone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use chrono_tz::Tz;

use super::calendar::CalendarPoint;
use super::errors::CrawlWindowError;

/// Zone a calendar rule is evaluated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowZone {
    /// The evaluating host's zone
    #[default]
    Local,
    /// Constant offset from UTC, written `GMT` or `GMT+01:00`
    Fixed(FixedOffset),
    /// IANA zone with daylight-saving rules, e.g. `US/Eastern`
    Named(Tz),
}

impl WindowZone {
    #[must_use]
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Calendar fields of `at` as seen in this zone
    #[must_use]
    pub fn point_at(&self, at: DateTime<Utc>) -> CalendarPoint {
        match self {
            Self::Local => CalendarPoint::from_datetime(&at.with_timezone(&Local)),
            Self::Fixed(offset) => CalendarPoint::from_datetime(&at.with_timezone(offset)),
            Self::Named(tz) => CalendarPoint::from_datetime(&at.with_timezone(tz)),
        }
    }
}

/// Parse `GMT`, `UTC`, `GMT+1:00`, `GMT-05:30` into seconds east of UTC
fn parse_gmt_offset(id: &str) -> Option<i32> {
    let rest = id.strip_prefix("GMT").or_else(|| id.strip_prefix("UTC"))?;
    if rest.is_empty() {
        return Some(0);
    }
    let (sign, rest) = match rest.as_bytes().first()? {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None => (rest.parse::<i32>().ok()?, 0),
    };
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}

impl FromStr for WindowZone {
    type Err = CrawlWindowError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let id = id.trim();
        if id.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }
        if let Some(secs) = parse_gmt_offset(id) {
            return FixedOffset::east_opt(secs)
                .map(Self::Fixed)
                .ok_or_else(|| CrawlWindowError::UnknownTimeZone(id.to_string()));
        }
        id.parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| CrawlWindowError::UnknownTimeZone(id.to_string()))
    }
}

impl fmt::Display for WindowZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("Local"),
            Self::Fixed(offset) => {
                let secs = offset.local_minus_utc();
                if secs == 0 {
                    return f.write_str("GMT");
                }
                let sign = if secs < 0 { '-' } else { '+' };
                let secs = secs.abs();
                write!(f, "GMT{sign}{:02}:{:02}", secs / 3600, (secs % 3600) / 60)
            }
            Self::Named(tz) => f.write_str(tz.name()),
        }
    }
}
