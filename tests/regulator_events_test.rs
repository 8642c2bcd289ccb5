use std::sync::Arc;
use std::time::Duration;

use citepreserve::address_spec::AddressSpec;
use citepreserve::clock::SimulatedClock;
use citepreserve::regulator::{Activity, ActivityEvent, ActivityRegulator, Relation, SlotScope};
use citepreserve::unit::UnitSubset;
use tokio::sync::broadcast::Receiver;
use tokio::time::timeout;

async fn next(rx: &mut Receiver<ActivityEvent>) -> ActivityEvent {
    match timeout(Duration::from_millis(100), rx.recv()).await {
        Ok(Ok(event)) => event,
        Ok(Err(e)) => panic!("Failed to receive event: {e}"),
        Err(_) => panic!("Timed out waiting for event"),
    }
}

fn unit(id: &str) -> SlotScope {
    SlotScope::Unit {
        unit_id: id.to_string(),
    }
}

#[tokio::test]
async fn test_unit_lifecycle_events() {
    let clock = SimulatedClock::new(0);
    let reg = ActivityRegulator::new(Arc::new(clock.clone()));
    let mut rx = reg.subscribe();

    assert!(reg.start_unit_activity(Activity::NewContentCrawl, "au1", 10));
    assert!(!reg.start_unit_activity(Activity::TopLevelPoll, "au1", 10));
    reg.unit_activity_finished(Activity::NewContentCrawl, "au1");

    assert_eq!(
        next(&mut rx).await,
        ActivityEvent::Started {
            slot: unit("au1"),
            activity: Activity::NewContentCrawl,
            expires_at_ms: 10,
        }
    );
    assert_eq!(
        next(&mut rx).await,
        ActivityEvent::Denied {
            slot: unit("au1"),
            activity: Activity::TopLevelPoll,
            blocking: Activity::NewContentCrawl,
            relation: None,
        }
    );
    assert_eq!(
        next(&mut rx).await,
        ActivityEvent::Finished {
            slot: unit("au1"),
            activity: Activity::NewContentCrawl,
        }
    );
}

#[tokio::test]
async fn test_expiry_is_reported_on_read() {
    let clock = SimulatedClock::new(0);
    let reg = ActivityRegulator::new(Arc::new(clock.clone()));
    assert!(reg.start_unit_activity(Activity::TopLevelPoll, "au1", 10));

    let mut rx = reg.subscribe();
    clock.step(20);
    assert_eq!(reg.unit_activity("au1"), Activity::NoActivity);
    assert_eq!(
        next(&mut rx).await,
        ActivityEvent::Expired {
            slot: unit("au1"),
            activity: Activity::TopLevelPoll,
        }
    );
}

#[tokio::test]
async fn test_subset_denial_names_relation() {
    let reg = ActivityRegulator::new(Arc::new(SimulatedClock::new(0)));
    let parent = UnitSubset::new("au1", AddressSpec::range("http://x/a"));
    let child = UnitSubset::new("au1", AddressSpec::range("http://x/a/b"));
    assert!(reg.start_subset_activity(Activity::StandardContentPoll, &parent, 10));

    let mut rx = reg.subscribe();
    assert!(!reg.start_subset_activity(Activity::BackgroundCrawl, &child, 10));
    match next(&mut rx).await {
        ActivityEvent::Denied {
            slot: SlotScope::Subset { key },
            blocking,
            relation,
            ..
        } => {
            assert_eq!(key, "au1::http://x/a/b");
            assert_eq!(blocking, Activity::StandardContentPoll);
            assert_eq!(relation, Some(Relation::Parent));
        }
        other => panic!("Expected a subset denial, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_service_events_serialize() {
    let reg = ActivityRegulator::new(Arc::new(SimulatedClock::new(0)));
    let mut rx = reg.subscribe();
    reg.stop_service();
    reg.start_service();

    let stopped = next(&mut rx).await;
    assert_eq!(stopped, ActivityEvent::ServiceStopped);
    assert_eq!(next(&mut rx).await, ActivityEvent::ServiceStarted);
    let json = serde_json::to_value(&stopped).expect("serialize");
    assert_eq!(json["event"], "service_stopped");
}
