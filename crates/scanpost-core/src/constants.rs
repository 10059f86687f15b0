//! Shared constants for the Scanpost access-control endpoint.
//!
//! These values centralize the timing, identifier, and wire-format defaults
//! used across the workspace. The timing defaults reproduce the behavior of
//! the deployed device (a tight polling loop with a 3 second result screen
//! and a bounded link-connect budget of 20 attempts at 500 ms intervals).

// ============================================================================
// Card Identifier Constraints
// ============================================================================

/// Minimum card serial length in bytes.
///
/// A zero-length serial is a malformed read and is discarded by the caller.
/// Single-byte serials are accepted; typical ISO 14443 tags carry 4-10 bytes.
pub const MIN_UID_LENGTH: usize = 1;

/// Maximum card serial length in bytes (per ISO 14443 specification).
pub const MAX_UID_LENGTH: usize = 10;

// ============================================================================
// Timing Configuration
// ============================================================================

/// How long a granted/denied result screen stays visible before the display
/// reverts to idle (milliseconds).
pub const DEFAULT_DWELL_MS: u64 = 3000;

/// Number of link-connect attempts made at startup before the endpoint gives
/// up and continues in degraded (publish-skipping) mode.
pub const DEFAULT_LINK_ATTEMPT_BUDGET: u32 = 20;

/// Delay between link-connect attempts (milliseconds).
pub const DEFAULT_LINK_ATTEMPT_DELAY_MS: u64 = 500;

/// How long the startup "Ready" splash is held before the first idle screen
/// (milliseconds).
pub const READY_SPLASH_MS: u64 = 2000;

// ============================================================================
// Telemetry Wire Format
// ============================================================================

/// Default topic for per-scan telemetry events.
pub const DEFAULT_STATE_TOPIC: &str = "homeassistant/sensor/scanpost/state";

/// Default topic for the retained registration (discovery) payload.
pub const DEFAULT_CONFIG_TOPIC: &str = "homeassistant/sensor/scanpost/config";

/// Value-extraction template advertised in the registration payload, telling
/// the subscriber which field of the state payload carries the display value.
pub const VALUE_TEMPLATE: &str = "{{ value_json.name }}";

/// Prefix for the per-connect session client identifier. A fresh random
/// suffix is appended on every (re)connect so a stale session held by the
/// remote endpoint is never collided with.
pub const CLIENT_ID_PREFIX: &str = "scanpost";

/// Name reported for identifiers that are not in the authorization directory.
pub const UNKNOWN_NAME: &str = "unknown";

// ============================================================================
// Panel Geometry
// ============================================================================

/// Panel width in pixels (128x64 monochrome OLED).
pub const PANEL_WIDTH: i32 = 128;

/// Panel height in pixels.
pub const PANEL_HEIGHT: i32 = 64;

/// Width of one glyph at text size 1. Larger sizes scale linearly.
pub const BASE_GLYPH_WIDTH: i32 = 6;

/// Height of one glyph at text size 1. Larger sizes scale linearly.
pub const BASE_GLYPH_HEIGHT: i32 = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_bounds_are_sane() {
        assert!(MIN_UID_LENGTH >= 1);
        assert!(MAX_UID_LENGTH >= MIN_UID_LENGTH);
    }

    #[test]
    fn test_topics_share_a_base() {
        let state_base = DEFAULT_STATE_TOPIC.rsplit_once('/').unwrap().0;
        let config_base = DEFAULT_CONFIG_TOPIC.rsplit_once('/').unwrap().0;
        assert_eq!(state_base, config_base);
    }
}
