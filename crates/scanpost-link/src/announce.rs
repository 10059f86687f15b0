//! Registration (discovery) payload.
//!
//! On every session open the endpoint publishes one retained, self-describing
//! registration message to the config topic. Subscribers that support
//! auto-discovery use it to learn the device's identity, the state topic that
//! carries scan telemetry, and the template that extracts the display value
//! from a state payload.
//!
//! The publish is idempotent: it is re-sent on every `Closed` → `Open`
//! session transition, never only once per process lifetime, because the
//! remote endpoint may have lost prior state across its own restarts.

use scanpost_core::constants::VALUE_TEMPLATE;
use serde::{Deserialize, Serialize};

/// Device identity block inside the registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Stable identifiers for this physical device.
    pub identifiers: Vec<String>,

    /// Human-readable device name.
    pub name: String,

    /// Device manufacturer.
    pub manufacturer: String,

    /// Device model.
    pub model: String,
}

/// The retained registration payload published to the config topic.
///
/// Field names are the wire format; the struct serializes 1:1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPayload {
    /// Display name of the telemetry source.
    pub name: String,

    /// Topic carrying per-scan telemetry events.
    pub state_topic: String,

    /// Template extracting the display value from a state payload.
    pub value_template: String,

    /// Topic whose payloads double as attribute sets (same as `state_topic`).
    pub json_attributes_topic: String,

    /// Stable unique id of this telemetry source.
    pub unique_id: String,

    /// Device identity block.
    pub device: DeviceIdentity,
}

impl RegistrationPayload {
    /// Build the registration payload for a device.
    pub fn new(
        unique_id: impl Into<String>,
        display_name: impl Into<String>,
        state_topic: impl Into<String>,
        device: DeviceIdentity,
    ) -> Self {
        let state_topic = state_topic.into();
        Self {
            name: display_name.into(),
            value_template: VALUE_TEMPLATE.to_string(),
            json_attributes_topic: state_topic.clone(),
            state_topic,
            unique_id: unique_id.into(),
            device,
        }
    }

    /// Encode the payload for the wire.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if encoding fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
