//! Common types shared across peripheral implementations.
//!
//! This module defines device metadata and the monochrome drawing model used
//! by the display panel boundary.

use serde::{Deserialize, Serialize};

/// Generic device information.
///
/// Contains metadata about a peripheral such as name, model, and an optional
/// firmware version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device name (e.g., "RC522", "MockReader").
    pub name: String,

    /// Device model identifier.
    pub model: String,

    /// Optional firmware version string.
    pub firmware_version: Option<String>,
}

impl DeviceInfo {
    /// Create a new DeviceInfo with required fields.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            firmware_version: None,
        }
    }

    /// Set the firmware version.
    pub fn with_firmware_version(mut self, firmware_version: impl Into<String>) -> Self {
        self.firmware_version = Some(firmware_version.into());
        self
    }
}

/// Pixel shade on a monochrome panel.
///
/// The panel is 1-bit: a pixel is either lit or dark. Shapes take an explicit
/// shade so glyphs can be cut out of lit regions (the granted check-mark is
/// dark triangles over a lit circle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shade {
    /// Pixel dark (background).
    Dark,

    /// Pixel lit (foreground).
    Lit,
}

/// One primitive drawing operation composed into a frame.
///
/// The display boundary is specified at the primitive level: the presenter
/// composes frames exclusively out of these operations, and a frame becomes
/// visible only when committed as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOp {
    /// Text at a cursor position. `size` is an integer glyph multiplier.
    Text {
        x: i32,
        y: i32,
        size: u8,
        content: String,
    },

    /// Filled circle.
    FillCircle { cx: i32, cy: i32, r: i32, shade: Shade },

    /// Filled triangle.
    FillTriangle {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        shade: Shade,
    },

    /// Straight line.
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        shade: Shade,
    },
}

impl DrawOp {
    /// Text content if this op is a `Text`, `None` otherwise.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_builder() {
        let info = DeviceInfo::new("RC522", "SPI NFC Reader").with_firmware_version("v2.0");

        assert_eq!(info.name, "RC522");
        assert_eq!(info.model, "SPI NFC Reader");
        assert_eq!(info.firmware_version, Some("v2.0".to_string()));
    }

    #[test]
    fn test_draw_op_as_text() {
        let op = DrawOp::Text {
            x: 10,
            y: 10,
            size: 2,
            content: "SCAN".to_string(),
        };
        assert_eq!(op.as_text(), Some("SCAN"));

        let shape = DrawOp::FillCircle {
            cx: 64,
            cy: 20,
            r: 15,
            shade: Shade::Lit,
        };
        assert_eq!(shape.as_text(), None);
    }

    #[test]
    fn test_shade_serialization() {
        let shade = Shade::Lit;
        let json = serde_json::to_string(&shade).unwrap();
        let back: Shade = serde_json::from_str(&json).unwrap();
        assert_eq!(shade, back);
    }
}
