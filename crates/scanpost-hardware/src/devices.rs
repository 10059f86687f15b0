//! Enum wrappers for peripheral device dispatch.
//!
//! Native `async fn` in traits (RPITIT, Edition 2024) are not object-safe, so
//! `Box<dyn CardReader>` is unavailable. These enum wrappers provide concrete
//! type dispatch at compile time instead: zero-cost, type-safe, and open to
//! real-hardware variants behind feature flags later.
//!
//! # Examples
//!
//! ```
//! use scanpost_hardware::devices::AnyCardReader;
//! use scanpost_hardware::mock::MockReader;
//!
//! let (reader, _handle) = MockReader::new();
//! let any_reader = AnyCardReader::Mock(reader);
//!
//! // Can now be used polymorphically through the CardReader trait
//! ```

use crate::mock::{MockPanel, MockReader};
use crate::traits::{CardReader, DisplayPanel};
use crate::types::{DeviceInfo, Shade};
use crate::Result;

/// Enum wrapper for card reader dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyCardReader {
    /// Mock reader for development and testing.
    Mock(MockReader),
    // Planned variants:
    // - Spi(Rc522Reader) - RC522 over SPI (hardware-spi feature)
}

impl CardReader for AnyCardReader {
    async fn card_present(&self) -> Result<bool> {
        match self {
            Self::Mock(device) => device.card_present().await,
        }
    }

    async fn read_serial(&mut self) -> Result<Vec<u8>> {
        match self {
            Self::Mock(device) => device.read_serial().await,
        }
    }

    async fn release(&mut self) -> Result<()> {
        match self {
            Self::Mock(device) => device.release().await,
        }
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        match self {
            Self::Mock(device) => device.get_info().await,
        }
    }
}

/// Enum wrapper for display panel dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyDisplayPanel {
    /// Mock panel for development and testing.
    Mock(MockPanel),
    // Planned variants:
    // - I2c(Ssd1306Panel) - SSD1306 over I2C (hardware-i2c feature)
}

impl DisplayPanel for AnyDisplayPanel {
    async fn init(&mut self) -> Result<()> {
        match self {
            Self::Mock(device) => device.init().await,
        }
    }

    fn width(&self) -> i32 {
        match self {
            Self::Mock(device) => device.width(),
        }
    }

    fn height(&self) -> i32 {
        match self {
            Self::Mock(device) => device.height(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Mock(device) => device.clear(),
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, size: u8, text: &str) {
        match self {
            Self::Mock(device) => device.draw_text(x, y, size, text),
        }
    }

    fn text_width(&self, text: &str, size: u8) -> i32 {
        match self {
            Self::Mock(device) => device.text_width(text, size),
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, shade: Shade) {
        match self {
            Self::Mock(device) => device.fill_circle(cx, cy, r, shade),
        }
    }

    fn fill_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        shade: Shade,
    ) {
        match self {
            Self::Mock(device) => device.fill_triangle(x0, y0, x1, y1, x2, y2, shade),
        }
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, shade: Shade) {
        match self {
            Self::Mock(device) => device.draw_line(x0, y0, x1, y1, shade),
        }
    }

    async fn commit(&mut self) {
        match self {
            Self::Mock(device) => device.commit().await,
        }
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        match self {
            Self::Mock(device) => device.get_info().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_any_reader_dispatches_to_mock() {
        let (reader, handle) = MockReader::new();
        let mut any_reader = AnyCardReader::Mock(reader);

        handle.present_card(vec![0x01, 0x02, 0x03, 0x04]);
        assert!(any_reader.card_present().await.unwrap());
        assert_eq!(
            any_reader.read_serial().await.unwrap(),
            vec![0x01, 0x02, 0x03, 0x04]
        );
    }

    #[tokio::test]
    async fn test_any_panel_dispatches_to_mock() {
        let (panel, handle) = MockPanel::new();
        let mut any_panel = AnyDisplayPanel::Mock(panel);

        any_panel.init().await.unwrap();
        any_panel.draw_text(0, 0, 1, "TEST");
        any_panel.commit().await;

        assert_eq!(handle.commit_count(), 1);
        assert_eq!(any_panel.width(), 128);
    }
}
