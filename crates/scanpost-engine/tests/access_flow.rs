//! End-to-end pipeline tests: card scan to display transition to telemetry.
//!
//! These tests run complete pipeline iterations over mock peripherals and a
//! scripted transport, covering the grant flow, the deny flow, degraded-link
//! operation, and session recovery in the middle of scanning.

mod common;

use common::Harness;
use scanpost_core::constants::{DEFAULT_CONFIG_TOPIC, DEFAULT_STATE_TOPIC};
use scanpost_engine::TickOutcome;
use scanpost_link::{LinkState, SessionState};

/// The reference grant scenario: a known card is scanned, the holder's name
/// is resolved, the granted screen is shown, and the event is published with
/// `"authorized":true`.
#[tokio::test]
async fn test_known_card_grant_flow() {
    let mut harness = Harness::connected().await;

    harness.reader.present_card(vec![0xE3, 0x3C, 0x5C, 0x1C]);
    let outcome = harness.pipeline.tick().await;

    let event = match outcome {
        TickOutcome::Scanned(event) => event,
        other => panic!("Expected a completed scan, got {:?}", other),
    };
    assert!(event.authorized);
    assert_eq!(event.name, "Donovan");
    assert_eq!(event.uid.canonical(), "E3 3C 5C 1C");

    // The granted frame carries the centered name; the pipeline then dwells
    // and reverts to idle, so the last committed frame is the idle prompt.
    let frames = harness.panel.frames();
    let granted_texts: Vec<_> = frames[frames.len() - 2]
        .iter()
        .filter_map(|op| op.as_text())
        .collect();
    assert_eq!(granted_texts, vec!["Donovan"]);
    assert_eq!(harness.last_frame_texts(), vec!["SCAN", "CARD"]);

    // Telemetry: one event on the state topic with the full wire shape.
    let events = harness.transport.published_to(DEFAULT_STATE_TOPIC);
    assert_eq!(events.len(), 1);
    let value: serde_json::Value = serde_json::from_str(&events[0].payload).unwrap();
    assert_eq!(value["name"], "Donovan");
    assert_eq!(value["uid"], "E3 3C 5C 1C");
    assert_eq!(value["authorized"], true);
    assert!(value["timestamp"].as_i64().unwrap() > 1_600_000_000_000);

    assert_eq!(harness.reader.release_count(), 1);
}

/// The reference deny scenario: an unknown card produces a denied event with
/// name "unknown", the locked screen, and `"authorized":false` on the wire.
#[tokio::test]
async fn test_unknown_card_deny_flow() {
    let mut harness = Harness::connected().await;

    harness.reader.present_card(vec![0x00, 0x11, 0x22, 0x33]);
    let outcome = harness.pipeline.tick().await;

    let event = match outcome {
        TickOutcome::Scanned(event) => event,
        other => panic!("Expected a completed scan, got {:?}", other),
    };
    assert!(!event.authorized);
    assert_eq!(event.name, "unknown");

    let frames = harness.panel.frames();
    let denied_texts: Vec<_> = frames[frames.len() - 2]
        .iter()
        .filter_map(|op| op.as_text())
        .collect();
    assert_eq!(denied_texts, vec!["LOCKED"]);

    let events = harness.transport.published_to(DEFAULT_STATE_TOPIC);
    assert_eq!(events.len(), 1);
    assert!(events[0].payload.contains("\"authorized\":false"));
    assert!(events[0].payload.contains("\"uid\":\"00 11 22 33\""));
}

/// Access control must survive a dead network: with the connect budget
/// exhausted, scans still drive the display while every publish stays a
/// silent no-op.
#[tokio::test]
async fn test_degraded_link_keeps_local_decisions_working() {
    let mut harness = Harness::build(|t| t.fail_connects(u32::MAX), true).await;
    assert_eq!(harness.pipeline.connection_state().link, LinkState::Failed);

    harness.reader.present_card(vec![0xE3, 0x3C, 0x5C, 0x1C]);
    let outcome = harness.pipeline.tick().await;
    match outcome {
        TickOutcome::Scanned(event) => assert!(event.authorized),
        other => panic!("Expected a completed scan, got {:?}", other),
    }

    harness.reader.present_card(vec![0x00, 0x11, 0x22, 0x33]);
    match harness.pipeline.tick().await {
        TickOutcome::Scanned(event) => assert!(!event.authorized),
        other => panic!("Expected a completed scan, got {:?}", other),
    }

    // Display worked the whole time...
    assert!(harness.panel.commit_count() >= 4);
    // ...and nothing ever reached the wire.
    assert!(harness.transport.published().is_empty());
    assert_eq!(
        harness.pipeline.connection_state().session,
        SessionState::Closed
    );
}

/// Maintenance precedes polling within an iteration: a session that opens
/// during the same tick as a scan still carries that scan's event.
#[tokio::test]
async fn test_session_opened_in_same_tick_carries_event() {
    let mut harness = Harness::connected().await;
    // No tick yet: the session has never been opened.
    assert_eq!(
        harness.pipeline.connection_state().session,
        SessionState::Closed
    );

    harness.reader.present_card(vec![0xF3, 0xFB, 0x53, 0x94]);
    harness.pipeline.tick().await;

    let events = harness.transport.published_to(DEFAULT_STATE_TOPIC);
    assert_eq!(events.len(), 1);
    assert!(events[0].payload.contains("Lily"));
}

/// After a remote session drop, the next iteration re-opens the session,
/// re-sends the retained registration, and publishes the new scan.
#[tokio::test]
async fn test_session_recovery_mid_scanning() {
    let mut harness = Harness::connected().await;

    // Healthy first scan.
    harness.reader.present_card(vec![0xE3, 0x3C, 0x5C, 0x1C]);
    harness.pipeline.tick().await;

    // Remote endpoint restarts, losing all session state.
    harness.transport.drop_session();

    harness.reader.present_card(vec![0xF3, 0xFB, 0x53, 0x94]);
    harness.pipeline.tick().await;

    // The registration was announced once per session open, not once per
    // process lifetime.
    let announcements = harness.transport.published_to(DEFAULT_CONFIG_TOPIC);
    assert_eq!(announcements.len(), 2);
    assert!(announcements.iter().all(|record| record.retain));

    // Both scans made it onto the state topic, each under its own session.
    let events = harness.transport.published_to(DEFAULT_STATE_TOPIC);
    assert_eq!(events.len(), 2);

    // And each session used a distinct client identifier.
    let ids = harness.transport.session_client_ids();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

/// Consecutive scans of the same card each produce their own event; nothing
/// about an event persists into the next iteration.
#[tokio::test]
async fn test_events_are_transient() {
    let mut harness = Harness::connected().await;

    harness.reader.present_card(vec![0xE3, 0x3C, 0x5C, 0x1C]);
    harness.pipeline.tick().await;
    harness.reader.present_card(vec![0xE3, 0x3C, 0x5C, 0x1C]);
    harness.pipeline.tick().await;

    let events = harness.transport.published_to(DEFAULT_STATE_TOPIC);
    assert_eq!(events.len(), 2);
    assert_eq!(harness.reader.release_count(), 2);
}
