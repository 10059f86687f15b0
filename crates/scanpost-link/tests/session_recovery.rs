//! Integration tests for the connectivity manager.
//!
//! These tests exercise complete connect / maintain / drop / recover cycles
//! against the scripted mock transport, verifying the resilience guarantees
//! end to end: bounded connect budgets, silent session reopen, fresh client
//! identifiers, idempotent announcements, and at-most-once publication.

use std::time::Duration;

use scanpost_link::mock::MockTransport;
use scanpost_link::{ConnectivityManager, LinkConfig, LinkState, PublishOutcome, SessionState};

fn fast_config() -> LinkConfig {
    LinkConfig {
        attempt_budget: 4,
        attempt_delay: Duration::from_millis(0),
        ..LinkConfig::default()
    }
}

/// A full healthy lifecycle: connect, open, announce, publish.
#[tokio::test]
async fn test_full_lifecycle() {
    let (transport, handle) = MockTransport::new();
    let mut manager = ConnectivityManager::new(transport, fast_config());

    assert_eq!(manager.connect_link().await, LinkState::Connected);
    manager.maintain().await;
    assert!(manager.state().can_publish());

    let outcome = manager
        .publish(
            "homeassistant/sensor/scanpost/state",
            r#"{"name":"Donovan","authorized":true}"#,
        )
        .await;
    assert_eq!(outcome, PublishOutcome::Published);

    let published = handle.published();
    assert_eq!(published.len(), 2);
    // The retained announcement always precedes the first event.
    assert!(published[0].retain);
    assert!(published[0].payload.contains("unique_id"));
    assert!(!published[1].retain);
    assert!(published[1].payload.contains("Donovan"));
}

/// A flapping remote endpoint: every drop-recover cycle re-announces under a
/// fresh client identifier, and no two identifiers collide.
#[tokio::test]
async fn test_repeated_drop_recover_cycles() {
    let (transport, handle) = MockTransport::new();
    let mut manager = ConnectivityManager::new(transport, fast_config());

    manager.connect_link().await;
    manager.maintain().await;

    for _ in 0..3 {
        handle.drop_session();
        manager.maintain().await;
        assert_eq!(manager.state().session, SessionState::Open);
    }

    let ids = handle.session_client_ids();
    assert_eq!(ids.len(), 4);
    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), 4, "client identifiers must never repeat");

    let announcements = handle.published_to("homeassistant/sensor/scanpost/config");
    assert_eq!(announcements.len(), 4, "one announcement per session open");
}

/// Events that arrive while the session is down are dropped, not queued:
/// recovery does not replay them.
#[tokio::test]
async fn test_events_during_outage_are_not_replayed() {
    let (transport, handle) = MockTransport::new();
    let mut manager = ConnectivityManager::new(transport, fast_config());

    manager.connect_link().await;
    manager.maintain().await;
    manager.publish("t/state", "before-outage").await;

    handle.drop_session();

    // Session is down from the manager's point of view only after the next
    // maintenance cycle; the transport rejects the publish either way.
    let outcome = manager.publish("t/state", "during-outage").await;
    assert_eq!(outcome, PublishOutcome::Failed);

    manager.maintain().await;
    let outcome = manager.publish("t/state", "after-recovery").await;
    assert_eq!(outcome, PublishOutcome::Published);

    let payloads: Vec<String> = handle
        .published_to("t/state")
        .into_iter()
        .map(|record| record.payload)
        .collect();
    assert_eq!(payloads, vec!["before-outage", "after-recovery"]);
}

/// Degraded mode end to end: the link never comes up, and every maintenance
/// and publish call stays a harmless no-op.
#[tokio::test]
async fn test_degraded_mode_is_stable() {
    let (transport, handle) = MockTransport::new();
    handle.fail_connects(u32::MAX);
    let mut manager = ConnectivityManager::new(transport, fast_config());

    assert_eq!(manager.connect_link().await, LinkState::Failed);

    for _ in 0..10 {
        manager.maintain().await;
        let outcome = manager.publish("t/state", "{}").await;
        assert_eq!(outcome, PublishOutcome::SkippedSessionClosed);
    }

    assert_eq!(manager.state().session, SessionState::Closed);
    assert!(handle.published().is_empty());
    assert!(handle.session_client_ids().is_empty());
    // Keepalive is still serviced every iteration even in degraded mode.
    assert_eq!(handle.keepalive_calls(), 10);
}

/// A link that drops after startup leaves the session closed on the next
/// maintenance cycle; the manager never retries the link itself.
#[tokio::test]
async fn test_link_drop_after_startup() {
    let (transport, handle) = MockTransport::new();
    let mut manager = ConnectivityManager::new(transport, fast_config());

    manager.connect_link().await;
    manager.maintain().await;
    assert!(manager.state().can_publish());

    handle.take_link_down();
    manager.maintain().await;

    assert_eq!(manager.state().link, LinkState::Disconnected);
    assert_eq!(manager.state().session, SessionState::Closed);
    assert_eq!(handle.connect_attempts(), 1, "maintain never retries the link");

    // Once the link view is Disconnected, no further session opens happen.
    manager.maintain().await;
    assert_eq!(handle.session_client_ids().len(), 1);
}
