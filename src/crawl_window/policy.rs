//! Match policies layered over a raw calendar match

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CrawlWindow;
use super::rules::WindowRule;

/// How a raw match is turned into a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Include on match, otherwise ignore
    MatchInclude,
    /// Exclude on match, otherwise ignore
    MatchExclude,
    /// Include when not matched, otherwise ignore
    NoMatchInclude,
    /// Exclude when not matched, otherwise ignore
    NoMatchExclude,
    MatchIncludeElseExclude,
    MatchExcludeElseInclude,
}

/// Three-valued outcome of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowVerdict {
    Include,
    Exclude,
    Ignore,
}

impl MatchPolicy {
    #[must_use]
    pub fn verdict(self, matched: bool) -> WindowVerdict {
        use WindowVerdict::{Exclude, Ignore, Include};
        match (self, matched) {
            (Self::MatchInclude, true) => Include,
            (Self::MatchInclude, false) => Ignore,
            (Self::MatchExclude, true) => Exclude,
            (Self::MatchExclude, false) => Ignore,
            (Self::NoMatchInclude, true) => Ignore,
            (Self::NoMatchInclude, false) => Include,
            (Self::NoMatchExclude, true) => Ignore,
            (Self::NoMatchExclude, false) => Exclude,
            (Self::MatchIncludeElseExclude, true) => Include,
            (Self::MatchIncludeElseExclude, false) => Exclude,
            (Self::MatchExcludeElseInclude, true) => Exclude,
            (Self::MatchExcludeElseInclude, false) => Include,
        }
    }
}

/// A rule plus the policy applied to its match
#[derive(Debug, Clone)]
pub struct PolicyWindow {
    rule: WindowRule,
    policy: MatchPolicy,
}

impl PolicyWindow {
    #[must_use]
    pub fn new(rule: WindowRule, policy: MatchPolicy) -> Self {
        Self { rule, policy }
    }

    #[must_use]
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    #[must_use]
    pub fn verdict(&self, at: DateTime<Utc>) -> WindowVerdict {
        self.policy.verdict(self.rule.can_crawl(at))
    }
}

impl CrawlWindow for PolicyWindow {
    /// Only an include verdict permits crawling
    fn can_crawl(&self, at: DateTime<Utc>) -> bool {
        self.verdict(at) == WindowVerdict::Include
    }
}

/// Ordered policy windows where the first non-ignore verdict decides
#[derive(Debug, Clone)]
pub struct FirstMatch {
    windows: Vec<PolicyWindow>,
    default_permit: bool,
}

impl FirstMatch {
    pub fn new(windows: impl IntoIterator<Item = PolicyWindow>, default_permit: bool) -> Self {
        Self {
            windows: windows.into_iter().collect(),
            default_permit,
        }
    }

    #[must_use]
    pub fn verdict(&self, at: DateTime<Utc>) -> WindowVerdict {
        self.windows
            .iter()
            .map(|w| w.verdict(at))
            .find(|v| *v != WindowVerdict::Ignore)
            .unwrap_or(WindowVerdict::Ignore)
    }
}

impl CrawlWindow for FirstMatch {
    fn can_crawl(&self, at: DateTime<Utc>) -> bool {
        match self.verdict(at) {
            WindowVerdict::Include => true,
            WindowVerdict::Exclude => false,
            WindowVerdict::Ignore => self.default_permit,
        }
    }
}
