//! Compatibility tables for concurrent activities
//!
//! Both tables answer "may `new` start while `current` holds a slot?". The
//! subset table also takes the relation of the existing slot to the new one.

use super::activity::Activity;
use super::relation::Relation;

/// Unit-slot table
#[must_use]
pub fn is_allowed_on_unit(new: Activity, current: Activity) -> bool {
    match current {
        Activity::NewContentCrawl | Activity::TreeWalk => false,
        Activity::TopLevelPoll => {
            matches!(new, Activity::TopLevelPoll | Activity::StandardContentPoll)
        }
        Activity::SubsetPlaceholder => new.is_subset_activity(),
        Activity::NoActivity => true,
        other => {
            log::warn!("Unexpected unit activity: {other}, allowing {new}");
            true
        }
    }
}

/// Subset-slot table
///
/// `relation` is how the existing slot (holding `current`) relates to the
/// slot being requested: [`Relation::Parent`] means the existing slot is the
/// ancestor.
#[must_use]
pub fn is_allowed_on_subset(new: Activity, current: Activity, relation: Relation) -> bool {
    use Activity::{
        BackgroundCrawl, RepairCrawl, SingleNodeContentPoll, StandardContentPoll, StandardNamePoll,
    };

    if relation == Relation::None {
        return true;
    }
    match current {
        RepairCrawl | BackgroundCrawl => match relation {
            Relation::Same => false,
            Relation::Child => new.is_crawl(),
            Relation::Parent | Relation::None => true,
        },
        StandardContentPoll | StandardNamePoll => match relation {
            Relation::Same => matches!(
                new,
                StandardNamePoll | StandardContentPoll | SingleNodeContentPoll
            ),
            Relation::Parent => matches!(new, StandardContentPoll | RepairCrawl),
            Relation::Child => new.is_crawl() || new == SingleNodeContentPoll,
            Relation::None => true,
        },
        SingleNodeContentPoll => match relation {
            Relation::Same => false,
            Relation::Child => new.is_crawl(),
            Relation::Parent | Relation::None => true,
        },
        Activity::NoActivity => true,
        other => {
            log::debug!("Unexpected subset activity: {other}, allowing {new}");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Activity::*;

    #[test]
    fn test_unit_table() {
        for new in Activity::ALL {
            assert!(!is_allowed_on_unit(new, NewContentCrawl));
            assert!(!is_allowed_on_unit(new, TreeWalk));
            assert!(is_allowed_on_unit(new, NoActivity));
        }
        assert!(is_allowed_on_unit(TopLevelPoll, TopLevelPoll));
        assert!(is_allowed_on_unit(StandardContentPoll, TopLevelPoll));
        assert!(!is_allowed_on_unit(RepairCrawl, TopLevelPoll));
        assert!(!is_allowed_on_unit(NewContentCrawl, TopLevelPoll));

        assert!(is_allowed_on_unit(RepairCrawl, SubsetPlaceholder));
        assert!(is_allowed_on_unit(StandardNamePoll, SubsetPlaceholder));
        assert!(!is_allowed_on_unit(TopLevelPoll, SubsetPlaceholder));
        assert!(!is_allowed_on_unit(NewContentCrawl, SubsetPlaceholder));
    }

    #[test]
    fn test_crawl_rows() {
        for current in [RepairCrawl, BackgroundCrawl] {
            for new in [RepairCrawl, BackgroundCrawl, StandardContentPoll, StandardNamePoll] {
                assert!(!is_allowed_on_subset(new, current, Relation::Same));
                assert!(is_allowed_on_subset(new, current, Relation::Parent));
                assert!(is_allowed_on_subset(new, current, Relation::None));
            }
            assert!(is_allowed_on_subset(BackgroundCrawl, current, Relation::Child));
            assert!(is_allowed_on_subset(RepairCrawl, current, Relation::Child));
            assert!(!is_allowed_on_subset(StandardContentPoll, current, Relation::Child));
        }
    }

    #[test]
    fn test_poll_rows() {
        for current in [StandardContentPoll, StandardNamePoll] {
            assert!(is_allowed_on_subset(StandardNamePoll, current, Relation::Same));
            assert!(is_allowed_on_subset(StandardContentPoll, current, Relation::Same));
            assert!(is_allowed_on_subset(SingleNodeContentPoll, current, Relation::Same));
            assert!(!is_allowed_on_subset(RepairCrawl, current, Relation::Same));

            assert!(is_allowed_on_subset(StandardContentPoll, current, Relation::Parent));
            assert!(is_allowed_on_subset(RepairCrawl, current, Relation::Parent));
            assert!(!is_allowed_on_subset(BackgroundCrawl, current, Relation::Parent));
            assert!(!is_allowed_on_subset(StandardNamePoll, current, Relation::Parent));

            assert!(is_allowed_on_subset(BackgroundCrawl, current, Relation::Child));
            assert!(is_allowed_on_subset(SingleNodeContentPoll, current, Relation::Child));
            assert!(!is_allowed_on_subset(StandardContentPoll, current, Relation::Child));
        }
    }

    #[test]
    fn test_single_node_poll_row() {
        assert!(!is_allowed_on_subset(StandardNamePoll, SingleNodeContentPoll, Relation::Same));
        assert!(is_allowed_on_subset(StandardNamePoll, SingleNodeContentPoll, Relation::Parent));
        assert!(is_allowed_on_subset(RepairCrawl, SingleNodeContentPoll, Relation::Child));
        assert!(!is_allowed_on_subset(StandardContentPoll, SingleNodeContentPoll, Relation::Child));
    }
}
