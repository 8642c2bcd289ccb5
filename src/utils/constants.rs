//! Shared constants for the preservation core
//!
//! Default values and fixed strings used across the address-spec algebra,
//! the activity regulator and the crawl-window engine.

/// Anchor reported by whole-tree address specs
///
/// Not a fetchable URL; distinct from every real anchor.
pub const WHOLE_TREE_URL: &str = "unit:";

/// Separator between the parts of a subset slot key
///
/// Keys look like `<unit-id>::<anchor>` or `<unit-id>::<anchor>::<lower>-<upper>`.
pub const KEY_SEPARATOR: &str = "::";

/// Separator between the lower and upper bound in a subset slot key
pub const BOUND_SEPARATOR: char = '-';

/// Default capacity of the activity event broadcast channel
///
/// Slow subscribers that fall further behind than this lose the oldest
/// events (`RecvError::Lagged`); the regulator itself never waits.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Default lease extension applied by a renewal: 1 hour
pub const DEFAULT_LEASE_EXTENSION_MS: u64 = 60 * 60 * 1000;

/// Sampling step used when enumerating crawl intervals: 1 minute
pub const CRAWL_INTERVAL_STEP_MS: i64 = 60 * 1000;
