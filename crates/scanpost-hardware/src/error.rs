//! Error types for peripheral operations.
//!
//! This module defines error types specific to the card reader and display
//! panel boundaries, covering disconnection, transient read misses, and
//! initialization failures.

/// Result type alias for peripheral operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur during peripheral device operations.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Device is not connected or has been disconnected.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// Card could not be read. Transient: the scan is discarded and the
    /// next polling iteration proceeds normally.
    #[error("Card read error: {message}")]
    CardReadError { message: String },

    /// Device initialization failed. For the display panel this is fatal:
    /// the endpoint does not run without visible feedback.
    #[error("Initialization failed: {message}")]
    InitializationFailed { message: String },

    /// Device communication error.
    #[error("Communication error: {message}")]
    CommunicationError { message: String },

    /// Invalid data received from device.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HardwareError {
    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new card read error.
    pub fn card_read(message: impl Into<String>) -> Self {
        Self::CardReadError {
            message: message.into(),
        }
    }

    /// Create a new initialization failed error.
    pub fn initialization_failed(message: impl Into<String>) -> Self {
        Self::InitializationFailed {
            message: message.into(),
        }
    }

    /// Create a new communication error.
    pub fn communication(message: impl Into<String>) -> Self {
        Self::CommunicationError {
            message: message.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_error() {
        let error = HardwareError::disconnected("RC522");
        assert!(matches!(error, HardwareError::Disconnected { .. }));
        assert_eq!(error.to_string(), "Device disconnected: RC522");
    }

    #[test]
    fn test_card_read_error() {
        let error = HardwareError::card_read("collision during anticollision loop");
        assert!(matches!(error, HardwareError::CardReadError { .. }));
        assert_eq!(
            error.to_string(),
            "Card read error: collision during anticollision loop"
        );
    }

    #[test]
    fn test_initialization_failed_error() {
        let error = HardwareError::initialization_failed("panel allocation failed");
        assert_eq!(
            error.to_string(),
            "Initialization failed: panel allocation failed"
        );
    }
}
