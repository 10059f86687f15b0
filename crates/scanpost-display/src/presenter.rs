//! Screen presenter for the access-control endpoint.
//!
//! The presenter owns the display: it is the only component that composes
//! frames, and [`DisplayState`] is overwritten wholesale on every transition.
//! Each `show_*` operation clears the prior frame, composes the new screen
//! out of panel primitives, and commits it atomically, so an observer never
//! sees a partially-drawn frame.
//!
//! Centering is computed from measured text width:
//! `(panel_width - text_width) / 2`. Text wider than the panel is neither
//! wrapped nor truncated; what the underlying primitive does with it stands.
//!
//! # Examples
//!
//! ```
//! use scanpost_display::ScreenPresenter;
//! use scanpost_hardware::mock::MockPanel;
//!
//! #[tokio::main]
//! async fn main() -> scanpost_core::Result<()> {
//!     let (panel, _handle) = MockPanel::new();
//!     let mut presenter = ScreenPresenter::new(panel).await?;
//!
//!     presenter.show_granted("Donovan").await;
//!     presenter.show_idle().await;
//!     Ok(())
//! }
//! ```

use scanpost_core::{Error, Result};
use scanpost_hardware::traits::DisplayPanel;
use scanpost_hardware::types::Shade;
use tracing::debug;

/// Text size for headline content (idle prompt, names, titles).
const HEADLINE_TEXT_SIZE: u8 = 2;

/// Text size for secondary content (message bodies).
const BODY_TEXT_SIZE: u8 = 1;

/// Vertical center of the result roundel (check-mark / cross).
const ROUNDEL_CY: i32 = 20;

/// Radius of the result roundel.
const ROUNDEL_R: i32 = 15;

/// The screen currently rendered.
///
/// Owned exclusively by the [`ScreenPresenter`]; no partial updates exist,
/// every transition replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// Waiting for a card ("SCAN CARD" prompt).
    Idle,

    /// Access granted; the roundel plus the holder's name.
    Granted {
        /// Resolved display name of the card holder.
        name: String,
    },

    /// Access denied ("LOCKED").
    Denied,

    /// Free-form status message (startup progress, diagnostics).
    Message {
        /// Headline line.
        title: String,
        /// Secondary line.
        body: String,
    },
}

/// Composes named screens out of panel primitives.
///
/// Construction initializes the panel; failure there is fatal to the
/// endpoint and surfaces once, at startup. After successful construction
/// every `show_*` operation is infallible: composition happens in memory and
/// the commit contract has no error path.
#[derive(Debug)]
pub struct ScreenPresenter<P: DisplayPanel> {
    panel: P,
    state: DisplayState,
}

impl<P: DisplayPanel> ScreenPresenter<P> {
    /// Initialize the panel and take ownership of the display.
    ///
    /// Does not render anything yet; the caller decides the first screen
    /// (typically a startup message, then idle).
    ///
    /// # Errors
    ///
    /// Returns `Error::DisplayUnavailable` if the panel cannot be
    /// initialized. The endpoint does not run without a working display.
    pub async fn new(mut panel: P) -> Result<Self> {
        panel
            .init()
            .await
            .map_err(|e| Error::DisplayUnavailable(e.to_string()))?;

        Ok(Self {
            panel,
            state: DisplayState::Idle,
        })
    }

    /// The screen currently committed to the panel.
    #[must_use]
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Show the idle prompt.
    pub async fn show_idle(&mut self) {
        self.panel.clear();
        self.panel.draw_text(10, 10, HEADLINE_TEXT_SIZE, "SCAN");
        self.panel.draw_text(10, 35, HEADLINE_TEXT_SIZE, "CARD");
        self.panel.commit().await;

        self.state = DisplayState::Idle;
        debug!("Display: idle");
    }

    /// Show the access-granted screen: check-mark roundel plus the holder's
    /// name, centered.
    pub async fn show_granted(&mut self, name: &str) {
        let cx = self.panel.width() / 2;

        self.panel.clear();
        self.panel.fill_circle(cx, ROUNDEL_CY, ROUNDEL_R, Shade::Lit);
        // Check-mark cut out of the lit roundel, two dark triangles.
        self.panel
            .fill_triangle(cx - 8, 20, cx - 4, 26, cx + 8, 14, Shade::Dark);
        self.panel
            .fill_triangle(cx - 4, 26, cx, 22, cx + 8, 14, Shade::Dark);

        let x = self.centered_x(name, HEADLINE_TEXT_SIZE);
        self.panel.draw_text(x, 45, HEADLINE_TEXT_SIZE, name);
        self.panel.commit().await;

        self.state = DisplayState::Granted {
            name: name.to_string(),
        };
        debug!(name, "Display: granted");
    }

    /// Show the access-denied screen: crossed roundel plus "LOCKED".
    pub async fn show_denied(&mut self) {
        let cx = self.panel.width() / 2;

        self.panel.clear();
        self.panel.fill_circle(cx, ROUNDEL_CY, ROUNDEL_R, Shade::Lit);
        // Cross cut out of the lit roundel; doubled lines for stroke weight.
        self.panel.draw_line(cx - 8, 12, cx + 8, 28, Shade::Dark);
        self.panel.draw_line(cx - 7, 12, cx + 9, 28, Shade::Dark);
        self.panel.draw_line(cx + 8, 12, cx - 8, 28, Shade::Dark);
        self.panel.draw_line(cx + 9, 12, cx - 7, 28, Shade::Dark);

        self.panel.draw_text(20, 45, HEADLINE_TEXT_SIZE, "LOCKED");
        self.panel.commit().await;

        self.state = DisplayState::Denied;
        debug!("Display: denied");
    }

    /// Show a two-line status message.
    ///
    /// With `centered` set, both lines are centered from measured width;
    /// otherwise they start at the left edge.
    pub async fn show_message(&mut self, title: &str, body: &str, centered: bool) {
        self.panel.clear();

        let title_x = if centered {
            self.centered_x(title, HEADLINE_TEXT_SIZE)
        } else {
            0
        };
        self.panel.draw_text(title_x, 10, HEADLINE_TEXT_SIZE, title);

        let body_x = if centered {
            self.centered_x(body, BODY_TEXT_SIZE)
        } else {
            0
        };
        self.panel.draw_text(body_x, 40, BODY_TEXT_SIZE, body);
        self.panel.commit().await;

        self.state = DisplayState::Message {
            title: title.to_string(),
            body: body.to_string(),
        };
        debug!(title, body, "Display: message");
    }

    fn centered_x(&self, text: &str, size: u8) -> i32 {
        (self.panel.width() - self.panel.text_width(text, size)) / 2
    }
}
