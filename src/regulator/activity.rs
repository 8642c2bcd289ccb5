//! Activity codes arbitrated by the regulator

use std::fmt;

use serde::{Deserialize, Serialize};

/// A long-running operation that claims a unit or subset slot
///
/// Numeric codes are stable and appear in status output. Unit-level codes are
/// below 10, subset-level codes above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Activity {
    NoActivity,
    NewContentCrawl,
    TopLevelPoll,
    TreeWalk,
    /// Marker held on a unit slot while any of its subsets is busy
    SubsetPlaceholder,
    RepairCrawl,
    BackgroundCrawl,
    StandardContentPoll,
    SingleNodeContentPoll,
    StandardNamePoll,
}

impl Activity {
    pub const ALL: [Activity; 10] = [
        Activity::NoActivity,
        Activity::NewContentCrawl,
        Activity::TopLevelPoll,
        Activity::TreeWalk,
        Activity::SubsetPlaceholder,
        Activity::RepairCrawl,
        Activity::BackgroundCrawl,
        Activity::StandardContentPoll,
        Activity::SingleNodeContentPoll,
        Activity::StandardNamePoll,
    ];

    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::NoActivity => -1,
            Self::NewContentCrawl => 1,
            Self::TopLevelPoll => 2,
            Self::TreeWalk => 3,
            Self::SubsetPlaceholder => 9,
            Self::RepairCrawl => 11,
            Self::BackgroundCrawl => 12,
            Self::StandardContentPoll => 13,
            Self::SingleNodeContentPoll => 14,
            Self::StandardNamePoll => 15,
        }
    }

    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.code() == code)
    }

    /// Human-readable name used in logs and status output
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoActivity => "No Activity",
            Self::NewContentCrawl => "New Content Crawl",
            Self::TopLevelPoll => "Top Level Poll",
            Self::TreeWalk => "Treewalk",
            Self::SubsetPlaceholder => "Subset Activity",
            Self::RepairCrawl => "Repair Crawl",
            Self::BackgroundCrawl => "Background Crawl",
            Self::StandardContentPoll => "Content Poll",
            Self::SingleNodeContentPoll => "Single Node Content Poll",
            Self::StandardNamePoll => "Name Poll",
        }
    }

    /// Runs against a whole unit
    #[must_use]
    pub const fn is_unit_activity(self) -> bool {
        matches!(
            self,
            Self::NoActivity
                | Self::NewContentCrawl
                | Self::TopLevelPoll
                | Self::TreeWalk
                | Self::SubsetPlaceholder
        )
    }

    /// Runs against an addressed subset
    #[must_use]
    pub const fn is_subset_activity(self) -> bool {
        matches!(
            self,
            Self::NoActivity
                | Self::RepairCrawl
                | Self::BackgroundCrawl
                | Self::StandardContentPoll
                | Self::SingleNodeContentPoll
                | Self::StandardNamePoll
        )
    }

    #[must_use]
    pub const fn is_crawl(self) -> bool {
        matches!(self, Self::RepairCrawl | Self::BackgroundCrawl)
    }

    /// May be requested by callers; the other two codes are regulator-internal
    #[must_use]
    pub const fn is_requestable(self) -> bool {
        !matches!(self, Self::NoActivity | Self::SubsetPlaceholder)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
