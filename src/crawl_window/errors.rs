//! Error types for crawl-window construction

/// Invalid crawl-window definitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CrawlWindowError {
    /// Time of day not in `H:MM` form or out of range
    #[error("Invalid time of day '{0}', expected H:MM")]
    InvalidTime(String),

    /// Day list empty or containing something other than 1 (Sunday) to 7 (Saturday)
    #[error("Invalid day list '{0}', expected ';'-separated days 1-7")]
    InvalidDays(String),

    #[error("Unknown time zone '{0}'")]
    UnknownTimeZone(String),

    /// Calendar rule over no fields
    #[error("Calendar rule needs at least one field")]
    EmptyFieldMask,

    /// Field set with no values
    #[error("Field set needs at least one value")]
    EmptyFieldSet,
}
