use crate::{
    Result,
    constants::{MAX_UID_LENGTH, MIN_UID_LENGTH, UNKNOWN_NAME},
    error::Error,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use subtle::ConstantTimeEq;

/// Contactless card identifier (1-10 raw serial bytes).
///
/// The canonical textual form renders each byte as two uppercase hex digits,
/// separated by single spaces with no leading or trailing space. The canonical
/// form is what the authorization directory is keyed by and what appears in
/// telemetry payloads and logs.
///
/// # Security
/// Identifier comparison is constant-time to avoid leaking, through timing,
/// how many leading bytes of a presented serial match a directory entry.
///
/// # Examples
///
/// ```
/// use scanpost_core::CardUid;
///
/// let uid = CardUid::from_bytes(vec![0xE3, 0x3C, 0x5C, 0x1C]).unwrap();
/// assert_eq!(uid.canonical(), "E3 3C 5C 1C");
///
/// // Normalization is idempotent: the canonical form parses back to an
/// // equal identifier.
/// let reparsed: CardUid = uid.canonical().parse().unwrap();
/// assert_eq!(reparsed, uid);
/// ```
#[derive(Debug, Clone, Eq)]
pub struct CardUid(Vec<u8>);

impl CardUid {
    /// Create an identifier from raw reader bytes.
    ///
    /// # Errors
    /// Returns `Error::InvalidRead` if the serial is empty (a malformed scan
    /// the caller must discard) or longer than [`MAX_UID_LENGTH`] bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        let len = bytes.len();
        if !(MIN_UID_LENGTH..=MAX_UID_LENGTH).contains(&len) {
            return Err(Error::InvalidRead(format!(
                "Serial must be {MIN_UID_LENGTH}-{MAX_UID_LENGTH} bytes, got {len}"
            )));
        }
        Ok(CardUid(bytes))
    }

    /// Get the raw serial bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Serial length in bytes. Always within 1-10 by construction.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API completeness alongside [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the canonical form: uppercase hex pairs, space-separated.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.0
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CardUid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl std::str::FromStr for CardUid {
    type Err = Error;

    /// Parse canonical text, case-insensitively ("e3 3c 5c 1c" is accepted).
    fn from_str(s: &str) -> Result<Self> {
        let mut bytes = Vec::new();
        for token in s.split_whitespace() {
            if token.len() != 2 {
                return Err(Error::InvalidUidFormat(format!(
                    "Expected two hex digits per byte, got '{token}'"
                )));
            }
            let byte = u8::from_str_radix(token, 16).map_err(|_| {
                Error::InvalidUidFormat(format!("Not a hex byte: '{token}'"))
            })?;
            bytes.push(byte);
        }
        if bytes.is_empty() {
            return Err(Error::InvalidUidFormat(format!("Empty identifier: '{s}'")));
        }
        CardUid::from_bytes(bytes)
    }
}

/// Constant-time comparison implementation for CardUid.
impl PartialEq for CardUid {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl std::hash::Hash for CardUid {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Serialized as the canonical string so payloads and logs agree.
impl Serialize for CardUid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for CardUid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// One completed card scan: the identifier, the resolved display name, and
/// the authorization decision, stamped at the moment the event was built.
///
/// Events are consumed synchronously by the display presenter and the
/// connectivity manager, then discarded. They are never queued or retried.
///
/// The serialized form is the telemetry wire format:
/// `{"name": "...", "uid": "E3 3C 5C 1C", "authorized": true, "timestamp": 1722945600000}`
/// with the timestamp in integer milliseconds since the Unix epoch.
#[derive(Debug, Clone, Serialize)]
pub struct AccessEvent {
    /// Resolved display name, or `"unknown"` for unauthorized identifiers.
    pub name: String,

    /// Canonical card identifier.
    pub uid: CardUid,

    /// Whether the identifier was found in the authorization directory.
    pub authorized: bool,

    /// When the event was produced.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl AccessEvent {
    /// Build a granted event for a directory hit.
    #[must_use]
    pub fn granted(uid: CardUid, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uid,
            authorized: true,
            timestamp: Utc::now(),
        }
    }

    /// Build a denied event for an identifier not in the directory.
    ///
    /// The name is always `"unknown"`: unauthorized scans never carry a
    /// resolved name.
    #[must_use]
    pub fn denied(uid: CardUid) -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            uid,
            authorized: false,
            timestamp: Utc::now(),
        }
    }

    /// Encode the telemetry payload.
    ///
    /// # Errors
    /// Returns `Error::Encode` if JSON serialization fails.
    pub fn to_payload(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![0xE3, 0x3C, 0x5C, 0x1C], "E3 3C 5C 1C")]
    #[case(vec![0x00, 0x11, 0x22, 0x33], "00 11 22 33")]
    #[case(vec![0x04, 0xAB, 0xCD, 0xEF, 0x01, 0x02, 0x03], "04 AB CD EF 01 02 03")]
    #[case(vec![0x0A], "0A")]
    fn test_canonical_form(#[case] bytes: Vec<u8>, #[case] expected: &str) {
        let uid = CardUid::from_bytes(bytes).unwrap();
        assert_eq!(uid.canonical(), expected);
        assert_eq!(uid.to_string(), expected);
    }

    #[test]
    fn test_empty_serial_rejected() {
        let result = CardUid::from_bytes(Vec::new());
        assert!(matches!(result, Err(Error::InvalidRead(_))));
    }

    #[test]
    fn test_overlong_serial_rejected() {
        let result = CardUid::from_bytes(vec![0x01; 11]);
        assert!(matches!(result, Err(Error::InvalidRead(_))));
    }

    #[rstest]
    #[case("E3 3C 5C 1C")]
    #[case("e3 3c 5c 1c")]
    #[case("E3 3c 5C 1c")]
    fn test_parse_is_case_normalized(#[case] input: &str) {
        let uid: CardUid = input.parse().unwrap();
        assert_eq!(uid.canonical(), "E3 3C 5C 1C");
    }

    #[test]
    fn test_normalization_idempotent() {
        let uid = CardUid::from_bytes(vec![0xE3, 0x3C, 0x5C, 0x1C]).unwrap();
        let reparsed: CardUid = uid.canonical().parse().unwrap();
        assert_eq!(reparsed.canonical(), uid.canonical());
        assert_eq!(reparsed, uid);
    }

    #[rstest]
    #[case("")] // no tokens
    #[case("E3 3")] // short token
    #[case("E3 3C5C")] // merged token
    #[case("G3 3C")] // non-hex
    fn test_parse_invalid(#[case] input: &str) {
        let result: Result<CardUid> = input.parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_constant_time_eq_semantics() {
        let a = CardUid::from_bytes(vec![0x01, 0x02]).unwrap();
        let b = CardUid::from_bytes(vec![0x01, 0x02]).unwrap();
        let c = CardUid::from_bytes(vec![0x01, 0x03]).unwrap();
        let d = CardUid::from_bytes(vec![0x01, 0x02, 0x03]).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d); // length mismatch is not equal
    }

    #[test]
    fn test_uid_serde_round_trip() {
        let uid = CardUid::from_bytes(vec![0xF3, 0xFB, 0x53, 0x94]).unwrap();
        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "\"F3 FB 53 94\"");

        let back: CardUid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uid);
    }

    #[test]
    fn test_granted_event_shape() {
        let uid = CardUid::from_bytes(vec![0xE3, 0x3C, 0x5C, 0x1C]).unwrap();
        let event = AccessEvent::granted(uid, "Donovan");

        assert!(event.authorized);
        assert_eq!(event.name, "Donovan");

        let payload = event.to_payload().unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["name"], "Donovan");
        assert_eq!(value["uid"], "E3 3C 5C 1C");
        assert_eq!(value["authorized"], true);
        assert!(value["timestamp"].is_i64());
    }

    #[test]
    fn test_denied_event_shape() {
        let uid = CardUid::from_bytes(vec![0x00, 0x11, 0x22, 0x33]).unwrap();
        let event = AccessEvent::denied(uid);

        assert!(!event.authorized);
        assert_eq!(event.name, "unknown");

        let payload = event.to_payload().unwrap();
        assert!(payload.contains("\"authorized\":false"));
        assert!(payload.contains("\"uid\":\"00 11 22 33\""));
    }

    #[test]
    fn test_payload_field_order_matches_wire_format() {
        let uid = CardUid::from_bytes(vec![0xE3, 0x3C, 0x5C, 0x1C]).unwrap();
        let payload = AccessEvent::granted(uid, "Donovan").to_payload().unwrap();

        let name_pos = payload.find("\"name\"").unwrap();
        let uid_pos = payload.find("\"uid\"").unwrap();
        let auth_pos = payload.find("\"authorized\"").unwrap();
        let ts_pos = payload.find("\"timestamp\"").unwrap();
        assert!(name_pos < uid_pos && uid_pos < auth_pos && auth_pos < ts_pos);
    }
}
