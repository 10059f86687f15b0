//! Connectivity state machine types.
//!
//! The connection state tracks two independent axes: the link-layer
//! association and the application-level session. Both are owned exclusively
//! by the [`ConnectivityManager`](crate::manager::ConnectivityManager); other
//! components observe them only through the manager's snapshot accessor and
//! mutate them only through its `connect_link`/`maintain`/`publish`
//! operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Link-layer axis of the connectivity state machine.
///
/// Transitions:
/// - `Disconnected` → `Connecting` when `connect_link` starts
/// - `Connecting` → `Connected` on association within the attempt budget
/// - `Connecting` → `Failed` on budget exhaustion (degraded mode: the
///   endpoint keeps serving local access decisions, publication is skipped)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    /// No association and none being attempted.
    Disconnected,

    /// Association attempts in progress (bounded).
    Connecting,

    /// Association established.
    Connected,

    /// Attempt budget exhausted; treated as disconnected, never retried by
    /// the maintenance path.
    Failed,
}

impl LinkState {
    /// Returns `true` if the link is usable for session work.
    #[must_use]
    pub fn is_connected(self) -> bool {
        matches!(self, LinkState::Connected)
    }

    /// Returns `true` if the attempt budget was exhausted.
    #[must_use]
    pub fn is_failed(self) -> bool {
        matches!(self, LinkState::Failed)
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            LinkState::Disconnected => "Disconnected",
            LinkState::Connecting => "Connecting",
            LinkState::Connected => "Connected",
            LinkState::Failed => "Failed",
        };
        write!(f, "{}", state_str)
    }
}

/// Session axis of the connectivity state machine.
///
/// Only attempted while the link is `Connected`. Every `Closed` → `Open`
/// transition re-sends the retained registration announcement, because the
/// remote endpoint may have lost all state from the previous session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No usable publish/subscribe channel.
    Closed,

    /// Channel open; publishes are attempted.
    Open,
}

impl SessionState {
    /// Returns `true` if the session is open.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, SessionState::Open)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Closed => write!(f, "Closed"),
            SessionState::Open => write!(f, "Open"),
        }
    }
}

/// Snapshot of both connectivity axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionState {
    /// Link-layer association state.
    pub link: LinkState,

    /// Application-level session state.
    pub session: SessionState,
}

impl ConnectionState {
    /// Returns `true` if telemetry publication is currently possible.
    #[must_use]
    pub fn can_publish(self) -> bool {
        self.link.is_connected() && self.session.is_open()
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link={} session={}", self.link, self.session)
    }
}
