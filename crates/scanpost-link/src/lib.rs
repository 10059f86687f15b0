//! Connectivity layer for the Scanpost access-control endpoint.
//!
//! This crate keeps the telemetry channel usable despite an unreliable
//! network link. It is built around two independent state axes (the
//! link-layer association and the application-level publish/subscribe
//! session) and a maintenance step driven by the event pipeline once per
//! iteration.
//!
//! # Components
//!
//! - [`Transport`]: the raw network boundary (an external collaborator,
//!   specified only at its interface)
//! - [`ConnectivityManager`]: bounded link connect, silent session
//!   reopen, idempotent retained registration announcement, at-most-once
//!   publish
//! - [`mock::MockTransport`]: scriptable transport for tests and the
//!   emulator shell
//!
//! # Example
//!
//! ```
//! use scanpost_link::{ConnectivityManager, LinkConfig};
//! use scanpost_link::mock::MockTransport;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (transport, _handle) = MockTransport::new();
//!     let mut manager = ConnectivityManager::new(transport, LinkConfig::default());
//!
//!     manager.connect_link().await;
//!     manager.maintain().await;
//!     assert!(manager.state().can_publish());
//! }
//! ```

pub mod announce;
pub mod manager;
pub mod mock;
pub mod state;
pub mod transport;

pub use announce::{DeviceIdentity, RegistrationPayload};
pub use manager::{ConnectivityManager, LinkConfig, PublishOutcome};
pub use state::{ConnectionState, LinkState, SessionState};
pub use transport::{LinkCredentials, LinkStatus, SessionAuth, Transport, TransportError};
