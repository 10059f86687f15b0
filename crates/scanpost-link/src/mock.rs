//! Mock transport implementation for testing and development.
//!
//! The mock models the unreliable remote endpoint the connectivity manager
//! is built against: connect attempts can be scripted to fail, the session
//! can be dropped behind the manager's back, and everything that reaches the
//! wire is recorded for inspection.

use crate::transport::{
    LinkCredentials, LinkStatus, Result, SessionAuth, Transport, TransportError,
};
use std::sync::{Arc, Mutex};

/// One payload accepted by the mock transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRecord {
    /// Destination topic.
    pub topic: String,

    /// Payload text.
    pub payload: String,

    /// Whether retention was requested.
    pub retain: bool,
}

#[derive(Debug, Default)]
struct TransportState {
    link_up: bool,
    session_open: bool,

    /// Upcoming `connect` calls that fail before the link comes up.
    connect_failures: u32,

    /// Upcoming `open_session` calls that are refused.
    open_failures: u32,

    /// Upcoming `publish` calls that are rejected.
    publish_failures: u32,

    connect_attempts: u32,
    keepalive_calls: u32,

    /// Client ids of accepted sessions, in order.
    session_client_ids: Vec<String>,

    /// Everything accepted onto the wire, in order.
    published: Vec<PublishRecord>,
}

/// Mock transport for testing and development.
///
/// # Examples
///
/// ```
/// use scanpost_link::mock::MockTransport;
/// use scanpost_link::transport::{LinkCredentials, LinkStatus, Transport};
///
/// #[tokio::main]
/// async fn main() {
///     let (mut transport, handle) = MockTransport::new();
///     handle.fail_connects(1);
///
///     let creds = LinkCredentials::new("net", "secret");
///     assert!(transport.connect(&creds).await.is_err());
///     assert_eq!(transport.link_status(), LinkStatus::Down);
///
///     transport.connect(&creds).await.unwrap();
///     assert_eq!(transport.link_status(), LinkStatus::Up);
/// }
/// ```
#[derive(Debug)]
pub struct MockTransport {
    state: Arc<Mutex<TransportState>>,
}

impl MockTransport {
    /// Create a new mock transport with its control handle.
    pub fn new() -> (Self, MockTransportHandle) {
        let state = Arc::new(Mutex::new(TransportState::default()));

        let transport = Self {
            state: Arc::clone(&state),
        };
        let handle = MockTransportHandle { state };

        (transport, handle)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TransportState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new().0
    }
}

impl Transport for MockTransport {
    async fn connect(&mut self, _credentials: &LinkCredentials) -> Result<()> {
        let mut state = self.lock();
        state.connect_attempts += 1;

        if state.connect_failures > 0 {
            state.connect_failures -= 1;
            return Err(TransportError::connect_failed("association timeout"));
        }

        state.link_up = true;
        Ok(())
    }

    fn link_status(&self) -> LinkStatus {
        if self.lock().link_up {
            LinkStatus::Up
        } else {
            LinkStatus::Down
        }
    }

    async fn open_session(&mut self, client_id: &str, _auth: &SessionAuth) -> Result<()> {
        let mut state = self.lock();

        if !state.link_up {
            return Err(TransportError::LinkDown);
        }

        if state.open_failures > 0 {
            state.open_failures -= 1;
            return Err(TransportError::session_refused("remote endpoint busy"));
        }

        state.session_open = true;
        state.session_client_ids.push(client_id.to_string());
        Ok(())
    }

    fn session_open(&self) -> bool {
        self.lock().session_open
    }

    async fn publish(&mut self, topic: &str, payload: &str, retain: bool) -> Result<()> {
        let mut state = self.lock();

        if !state.session_open {
            return Err(TransportError::session_refused("session not open"));
        }

        if state.publish_failures > 0 {
            state.publish_failures -= 1;
            return Err(TransportError::publish_failed("wire rejected payload"));
        }

        state.published.push(PublishRecord {
            topic: topic.to_string(),
            payload: payload.to_string(),
            retain,
        });
        Ok(())
    }

    async fn maintain_session(&mut self) {
        self.lock().keepalive_calls += 1;
    }
}

/// Handle for scripting and observing a mock transport.
#[derive(Debug, Clone)]
pub struct MockTransportHandle {
    state: Arc<Mutex<TransportState>>,
}

impl MockTransportHandle {
    fn lock(&self) -> std::sync::MutexGuard<'_, TransportState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make the next `n` connect attempts fail.
    pub fn fail_connects(&self, n: u32) {
        self.lock().connect_failures = n;
    }

    /// Make the next `n` session-open attempts fail.
    pub fn fail_opens(&self, n: u32) {
        self.lock().open_failures = n;
    }

    /// Make the next `n` publishes fail.
    pub fn fail_publishes(&self, n: u32) {
        self.lock().publish_failures = n;
    }

    /// Drop the session behind the caller's back, as a remote endpoint
    /// restart would.
    pub fn drop_session(&self) {
        self.lock().session_open = false;
    }

    /// Take the link down. Subsequent session opens fail with `LinkDown`.
    pub fn take_link_down(&self) {
        let mut state = self.lock();
        state.link_up = false;
        state.session_open = false;
    }

    /// Number of connect attempts seen so far.
    pub fn connect_attempts(&self) -> u32 {
        self.lock().connect_attempts
    }

    /// Number of keepalive invocations seen so far.
    pub fn keepalive_calls(&self) -> u32 {
        self.lock().keepalive_calls
    }

    /// Client ids of accepted sessions, in order.
    pub fn session_client_ids(&self) -> Vec<String> {
        self.lock().session_client_ids.clone()
    }

    /// Everything accepted onto the wire, in order.
    pub fn published(&self) -> Vec<PublishRecord> {
        self.lock().published.clone()
    }

    /// Published records filtered to one topic.
    pub fn published_to(&self, topic: &str) -> Vec<PublishRecord> {
        self.lock()
            .published
            .iter()
            .filter(|record| record.topic == topic)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> LinkCredentials {
        LinkCredentials::new("net", "secret")
    }

    fn auth() -> SessionAuth {
        SessionAuth::new("user", "pass")
    }

    #[tokio::test]
    async fn test_connect_scripted_failures() {
        let (mut transport, handle) = MockTransport::new();
        handle.fail_connects(2);

        assert!(transport.connect(&creds()).await.is_err());
        assert!(transport.connect(&creds()).await.is_err());
        assert!(transport.connect(&creds()).await.is_ok());
        assert_eq!(transport.link_status(), LinkStatus::Up);
        assert_eq!(handle.connect_attempts(), 3);
    }

    #[tokio::test]
    async fn test_open_session_requires_link() {
        let (mut transport, _handle) = MockTransport::new();

        let result = transport.open_session("client-1", &auth()).await;
        assert!(matches!(result, Err(TransportError::LinkDown)));
    }

    #[tokio::test]
    async fn test_publish_requires_session() {
        let (mut transport, handle) = MockTransport::new();
        transport.connect(&creds()).await.unwrap();

        let result = transport.publish("t", "{}", false).await;
        assert!(result.is_err());
        assert!(handle.published().is_empty());
    }

    #[tokio::test]
    async fn test_publish_records_in_order() {
        let (mut transport, handle) = MockTransport::new();
        transport.connect(&creds()).await.unwrap();
        transport.open_session("client-1", &auth()).await.unwrap();

        transport.publish("t/config", "{\"a\":1}", true).await.unwrap();
        transport.publish("t/state", "{\"b\":2}", false).await.unwrap();

        let published = handle.published();
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].topic, "t/config");
        assert!(published[0].retain);
        assert_eq!(handle.published_to("t/state").len(), 1);
    }

    #[tokio::test]
    async fn test_drop_session_visible_to_caller() {
        let (mut transport, handle) = MockTransport::new();
        transport.connect(&creds()).await.unwrap();
        transport.open_session("client-1", &auth()).await.unwrap();
        assert!(transport.session_open());

        handle.drop_session();
        assert!(!transport.session_open());
    }

    #[tokio::test]
    async fn test_take_link_down_closes_session() {
        let (mut transport, handle) = MockTransport::new();
        transport.connect(&creds()).await.unwrap();
        transport.open_session("client-1", &auth()).await.unwrap();

        handle.take_link_down();
        assert_eq!(transport.link_status(), LinkStatus::Down);
        assert!(!transport.session_open());
    }
}
