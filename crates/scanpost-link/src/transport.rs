//! Raw network transport boundary.
//!
//! The transport is an external collaborator: it owns the physical link
//! association and the application-level publish/subscribe session, and is
//! specified here only at its interface. The [`ConnectivityManager`] layers
//! the endpoint's resilience state machine on top of this trait; it never
//! assumes anything about what is underneath (a WiFi radio plus a broker
//! client on the deployed device, an in-memory script in tests).
//!
//! [`ConnectivityManager`]: crate::manager::ConnectivityManager

#![allow(async_fn_in_trait)]

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur at the transport boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The link is not associated; session and publish operations need it.
    #[error("Link is down")]
    LinkDown,

    /// A link-connect attempt failed.
    #[error("Connect failed: {reason}")]
    ConnectFailed { reason: String },

    /// The remote endpoint refused or dropped the session.
    #[error("Session refused: {reason}")]
    SessionRefused { reason: String },

    /// A publish was accepted by neither the session nor the wire.
    #[error("Publish failed: {reason}")]
    PublishFailed { reason: String },
}

impl TransportError {
    /// Create a new connect-failed error.
    pub fn connect_failed(reason: impl Into<String>) -> Self {
        Self::ConnectFailed {
            reason: reason.into(),
        }
    }

    /// Create a new session-refused error.
    pub fn session_refused(reason: impl Into<String>) -> Self {
        Self::SessionRefused {
            reason: reason.into(),
        }
    }

    /// Create a new publish-failed error.
    pub fn publish_failed(reason: impl Into<String>) -> Self {
        Self::PublishFailed {
            reason: reason.into(),
        }
    }
}

/// Link-layer association status as reported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkStatus {
    /// No network association.
    Down,

    /// Network association established.
    Up,
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Down => write!(f, "Down"),
            LinkStatus::Up => write!(f, "Up"),
        }
    }
}

/// Credentials for the link-layer association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCredentials {
    /// Network identifier (e.g., the SSID).
    pub network: String,

    /// Shared secret for the association.
    pub secret: String,
}

impl LinkCredentials {
    /// Create new link credentials.
    pub fn new(network: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            secret: secret.into(),
        }
    }
}

/// Authentication for the application-level session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAuth {
    /// Session username.
    pub username: String,

    /// Session password.
    pub password: String,
}

impl SessionAuth {
    /// Create new session credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Raw transport abstraction: link association plus publish/subscribe session.
///
/// # Object Safety and Dynamic Dispatch
///
/// Not object-safe (native `async fn`, Edition 2024 RPITIT); use generic type
/// parameters, as [`ConnectivityManager`](crate::manager::ConnectivityManager)
/// does.
///
/// # Contract
///
/// - [`connect`](Transport::connect) initiates one association attempt; the
///   caller polls [`link_status`](Transport::link_status) and owns retry
///   pacing and budget.
/// - [`open_session`](Transport::open_session) requires the link to be up and
///   takes a caller-supplied client identifier; the caller is responsible for
///   making identifiers fresh across reconnects.
/// - [`maintain_session`](Transport::maintain_session) must be invoked every
///   pipeline iteration to service transport-level keepalive.
pub trait Transport: Send + Sync {
    /// Make one link-association attempt with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the attempt fails; the link stays down and the
    /// caller decides whether to try again.
    async fn connect(&mut self, credentials: &LinkCredentials) -> Result<()>;

    /// Current link-layer status. Non-blocking.
    fn link_status(&self) -> LinkStatus;

    /// Open the application-level session under `client_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link is down or the remote endpoint refuses
    /// the session.
    async fn open_session(&mut self, client_id: &str, auth: &SessionAuth) -> Result<()>;

    /// Whether the application-level session is currently open.
    ///
    /// May flip to `false` at any time when the remote endpoint drops the
    /// session; callers must treat this as the source of truth.
    fn session_open(&self) -> bool;

    /// Publish `payload` to `topic`, optionally asking the remote endpoint to
    /// retain it for late subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is not open or delivery was not
    /// accepted. Delivery acceptance is still no guarantee of receipt;
    /// telemetry is best-effort end to end.
    async fn publish(&mut self, topic: &str, payload: &str, retain: bool) -> Result<()>;

    /// Service transport-level keepalive. Must be called every iteration.
    async fn maintain_session(&mut self);
}
