//! Connectivity manager: the endpoint's resilience state machine.
//!
//! The manager keeps the network usable across an unreliable link without
//! ever blocking the access-control function. It owns both axes of
//! [`ConnectionState`] and exposes three operations:
//!
//! - [`connect_link`](ConnectivityManager::connect_link): a bounded,
//!   fixed-delay association loop, invoked once at bootstrap. Exhausting the
//!   budget leaves the endpoint in degraded mode: local decisions keep
//!   working, publication is skipped.
//! - [`maintain`](ConnectivityManager::maintain): invoked every pipeline
//!   iteration. Services transport keepalive, notices remote session drops,
//!   and (re)opens the session when the link allows it. Every successful
//!   `Closed` → `Open` transition re-sends the retained registration
//!   announcement under a freshly generated client identifier.
//! - [`publish`](ConnectivityManager::publish): at-most-once delivery. With
//!   the session closed the event is dropped, not queued; a failed delivery
//!   is logged and never retried for that event.
//!
//! # Example
//!
//! ```
//! use scanpost_link::{ConnectivityManager, LinkConfig, PublishOutcome};
//! use scanpost_link::mock::MockTransport;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (transport, handle) = MockTransport::new();
//!     let mut manager = ConnectivityManager::new(transport, LinkConfig::default());
//!
//!     manager.connect_link().await;
//!     manager.maintain().await; // opens the session, sends the announcement
//!
//!     let outcome = manager.publish("topic/state", "{}").await;
//!     assert_eq!(outcome, PublishOutcome::Published);
//!     assert_eq!(handle.published().len(), 2); // announcement + event
//! }
//! ```

use crate::announce::{DeviceIdentity, RegistrationPayload};
use crate::state::{ConnectionState, LinkState, SessionState};
use crate::transport::{LinkCredentials, LinkStatus, SessionAuth, Transport};
use scanpost_core::constants::{
    CLIENT_ID_PREFIX, DEFAULT_CONFIG_TOPIC, DEFAULT_LINK_ATTEMPT_BUDGET,
    DEFAULT_LINK_ATTEMPT_DELAY_MS, DEFAULT_STATE_TOPIC,
};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Configuration for the connectivity manager.
///
/// Credentials and identity are compiled-in constants on the deployed
/// endpoint; there is no runtime configuration surface.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Link-layer credentials.
    pub credentials: LinkCredentials,

    /// Session authentication.
    pub auth: SessionAuth,

    /// Topic for per-scan telemetry events.
    pub state_topic: String,

    /// Topic for the retained registration payload.
    pub config_topic: String,

    /// Prefix of the per-connect client identifier.
    pub client_id_prefix: String,

    /// Maximum link-association attempts before degrading.
    pub attempt_budget: u32,

    /// Fixed delay between association attempts.
    pub attempt_delay: Duration,

    /// Stable unique id advertised in the registration payload.
    pub unique_id: String,

    /// Display name advertised in the registration payload.
    pub display_name: String,

    /// Device identity block advertised in the registration payload.
    pub device: DeviceIdentity,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            credentials: LinkCredentials::new("scanpost-net", "changeme"),
            auth: SessionAuth::new("scanpost", "changeme"),
            state_topic: DEFAULT_STATE_TOPIC.to_string(),
            config_topic: DEFAULT_CONFIG_TOPIC.to_string(),
            client_id_prefix: CLIENT_ID_PREFIX.to_string(),
            attempt_budget: DEFAULT_LINK_ATTEMPT_BUDGET,
            attempt_delay: Duration::from_millis(DEFAULT_LINK_ATTEMPT_DELAY_MS),
            unique_id: "scanpost_reader".to_string(),
            display_name: "Card Reader".to_string(),
            device: DeviceIdentity {
                identifiers: vec!["scanpost".to_string()],
                name: "Scanpost Reader".to_string(),
                manufacturer: "Scanpost".to_string(),
                model: "RC522".to_string(),
            },
        }
    }
}

/// What happened to a single publish call.
///
/// Telemetry is at-most-once: none of these outcomes triggers a retry of the
/// event. The next maintenance cycle's reconnect logic is the only recovery
/// mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The transport accepted the payload.
    Published,

    /// Dropped without touching the wire: the session was not open.
    SkippedSessionClosed,

    /// The transport rejected the delivery; the event is gone.
    Failed,
}

impl PublishOutcome {
    /// Returns `true` if the transport accepted the payload.
    #[must_use]
    pub fn is_published(self) -> bool {
        matches!(self, PublishOutcome::Published)
    }
}

/// Maintains the link and session against an unreliable remote endpoint.
///
/// Owns [`ConnectionState`] exclusively: no other component inspects or
/// mutates connectivity except through this type. Not thread-safe: the
/// endpoint runs a single cooperative task, so there is exactly one caller.
#[derive(Debug)]
pub struct ConnectivityManager<T: Transport> {
    transport: T,
    config: LinkConfig,
    link: LinkState,
    session: SessionState,
}

impl<T: Transport> ConnectivityManager<T> {
    /// Create a manager over `transport`. Nothing is connected yet.
    pub fn new(transport: T, config: LinkConfig) -> Self {
        Self {
            transport,
            config,
            link: LinkState::Disconnected,
            session: SessionState::Closed,
        }
    }

    /// Snapshot of the current connectivity state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        ConnectionState {
            link: self.link,
            session: self.session,
        }
    }

    /// Topic for per-scan telemetry events, from the configuration.
    #[must_use]
    pub fn state_topic(&self) -> &str {
        &self.config.state_topic
    }

    /// Bounded link-association loop, invoked once at bootstrap.
    ///
    /// Makes up to `attempt_budget` association attempts, sleeping
    /// `attempt_delay` between them. The sleep is a plain awaited suspension
    /// point, so the wait is interruptible by the runtime rather than a busy
    /// loop.
    ///
    /// Returns the resulting link state: `Connected`, or `Failed` after
    /// budget exhaustion. Failure is not an error; the endpoint continues
    /// in degraded mode and keeps serving local access decisions.
    pub async fn connect_link(&mut self) -> LinkState {
        self.link = LinkState::Connecting;
        info!(
            network = %self.config.credentials.network,
            budget = self.config.attempt_budget,
            "Connecting link"
        );

        for attempt in 1..=self.config.attempt_budget {
            if let Err(e) = self.transport.connect(&self.config.credentials).await {
                debug!(attempt, error = %e, "Link attempt failed");
            }

            if self.transport.link_status() == LinkStatus::Up {
                self.link = LinkState::Connected;
                info!(attempt, "Link connected");
                return self.link;
            }

            tokio::time::sleep(self.config.attempt_delay).await;
        }

        self.link = LinkState::Failed;
        warn!(
            budget = self.config.attempt_budget,
            "Link connect budget exhausted; continuing without publication"
        );
        self.link
    }

    /// One maintenance step, invoked every pipeline iteration.
    ///
    /// Services transport keepalive, folds remote session drops back into
    /// the state machine, and attempts one session (re)open when the session
    /// is closed and the link is connected. The link itself is never retried
    /// here; a down link makes this call a no-op, so maintenance can never
    /// stall the pipeline on association attempts.
    ///
    /// On a successful open the retained registration announcement is
    /// published before the session is considered open, so every remote
    /// endpoint that accepts a session also receives the device description.
    pub async fn maintain(&mut self) {
        self.transport.maintain_session().await;

        // Fold remote state into our view before deciding anything else.
        if self.session.is_open() && !self.transport.session_open() {
            warn!("Session dropped by remote endpoint");
            self.session = SessionState::Closed;
        }
        if self.link.is_connected() && self.transport.link_status() != LinkStatus::Up {
            warn!("Link lost");
            self.link = LinkState::Disconnected;
            self.session = SessionState::Closed;
        }

        if self.session.is_open() {
            return;
        }

        if !self.link.is_connected() {
            return;
        }

        // A stale session on the remote side may outlive us; a fresh client
        // identifier per attempt avoids colliding with it.
        let client_id = self.fresh_client_id();
        match self
            .transport
            .open_session(&client_id, &self.config.auth)
            .await
        {
            Ok(()) => {
                info!(client_id = %client_id, "Session opened");
                self.announce().await;
                self.session = SessionState::Open;
            }
            Err(e) => {
                debug!(error = %e, "Session open failed; retrying next maintenance cycle");
            }
        }
    }

    /// Publish a telemetry payload, best-effort.
    ///
    /// With the session closed the event is dropped (deliberately not
    /// queued) and `SkippedSessionClosed` is returned. A transport-level
    /// failure is logged and returned as `Failed`; the event is not retried.
    pub async fn publish(&mut self, topic: &str, payload: &str) -> PublishOutcome {
        if !self.session.is_open() {
            debug!(topic, "Publish skipped: session closed");
            return PublishOutcome::SkippedSessionClosed;
        }

        match self.transport.publish(topic, payload, false).await {
            Ok(()) => {
                debug!(topic, "Published");
                PublishOutcome::Published
            }
            Err(e) => {
                warn!(topic, error = %e, "Publish failed; event dropped");
                PublishOutcome::Failed
            }
        }
    }

    /// Publish the retained registration payload to the config topic.
    ///
    /// A failure here is logged but does not veto the session: the original
    /// device behaves the same way, and the next session cycle re-sends the
    /// announcement anyway.
    async fn announce(&mut self) {
        let payload = RegistrationPayload::new(
            self.config.unique_id.clone(),
            self.config.display_name.clone(),
            self.config.state_topic.clone(),
            self.config.device.clone(),
        );

        let json = match payload.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Registration payload encoding failed");
                return;
            }
        };

        match self
            .transport
            .publish(&self.config.config_topic, &json, true)
            .await
        {
            Ok(()) => info!(topic = %self.config.config_topic, "Registration announced"),
            Err(e) => warn!(error = %e, "Registration publish failed"),
        }
    }

    fn fresh_client_id(&self) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}-{}", self.config.client_id_prefix, &suffix[..8])
    }
}
