//! Mock display panel implementation for testing and development.
//!
//! The mock panel records drawing primitives instead of rasterizing them.
//! Tests inspect committed frames as lists of [`DrawOp`] values, which keeps
//! assertions about screen composition exact without a pixel buffer.

use crate::{
    Result,
    traits::DisplayPanel,
    types::{DeviceInfo, DrawOp, Shade},
};
use std::sync::{Arc, Mutex};

/// Default panel width in pixels (128x64 monochrome OLED).
const DEFAULT_WIDTH: i32 = 128;

/// Default panel height in pixels.
const DEFAULT_HEIGHT: i32 = 64;

/// Base glyph width in pixels at text size 1 (classic 5x7 font plus one
/// column of spacing). Rendered width scales linearly with text size.
const BASE_GLYPH_WIDTH: i32 = 6;

#[derive(Debug, Default)]
struct PanelState {
    /// Frames that have been committed, oldest first.
    committed: Vec<Vec<DrawOp>>,

    /// When `true`, the next `init` call fails.
    fail_init: bool,

    /// Set by a successful `init`.
    initialized: bool,
}

/// Mock display panel for testing and development.
///
/// Drawing primitives accumulate into a pending frame; `commit` snapshots the
/// pending frame into the committed history shared with the
/// [`MockPanelHandle`]. The pending frame is never observable through the
/// handle, which is exactly the atomic-commit contract of the panel boundary.
///
/// # Examples
///
/// ```
/// use scanpost_hardware::mock::MockPanel;
/// use scanpost_hardware::traits::DisplayPanel;
///
/// #[tokio::main]
/// async fn main() -> scanpost_hardware::Result<()> {
///     let (mut panel, handle) = MockPanel::new();
///     panel.init().await?;
///
///     panel.clear();
///     panel.draw_text(10, 10, 2, "SCAN");
///     assert!(handle.last_frame().is_none()); // not yet committed
///
///     panel.commit().await;
///     let frame = handle.last_frame().unwrap();
///     assert_eq!(frame.len(), 1);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockPanel {
    state: Arc<Mutex<PanelState>>,
    pending: Vec<DrawOp>,
    width: i32,
    height: i32,
}

impl MockPanel {
    /// Create a new 128x64 mock panel.
    ///
    /// Returns a tuple of (MockPanel, MockPanelHandle) where the handle
    /// observes committed frames and scripts init failures.
    pub fn new() -> (Self, MockPanelHandle) {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create a mock panel with custom dimensions.
    pub fn with_size(width: i32, height: i32) -> (Self, MockPanelHandle) {
        let state = Arc::new(Mutex::new(PanelState::default()));

        let panel = Self {
            state: Arc::clone(&state),
            pending: Vec::new(),
            width,
            height,
        };

        let handle = MockPanelHandle { state };

        (panel, handle)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockPanel {
    fn default() -> Self {
        Self::new().0
    }
}

impl DisplayPanel for MockPanel {
    async fn init(&mut self) -> Result<()> {
        let mut state = self.lock();
        if state.fail_init {
            return Err(crate::HardwareError::initialization_failed(
                "panel did not acknowledge",
            ));
        }
        state.initialized = true;
        Ok(())
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn clear(&mut self) {
        self.pending.clear();
    }

    fn draw_text(&mut self, x: i32, y: i32, size: u8, text: &str) {
        self.pending.push(DrawOp::Text {
            x,
            y,
            size,
            content: text.to_string(),
        });
    }

    fn text_width(&self, text: &str, size: u8) -> i32 {
        BASE_GLYPH_WIDTH * i32::from(size) * text.chars().count() as i32
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, shade: Shade) {
        self.pending.push(DrawOp::FillCircle { cx, cy, r, shade });
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
        self.pending.push(DrawOp::FillTriangle {
            x0,
            y0,
            x1,
            y1,
            x2,
            y2,
            shade,
        });
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, shade: Shade) {
        self.pending.push(DrawOp::Line {
            x0,
            y0,
            x1,
            y1,
            shade,
        });
    }

    async fn commit(&mut self) {
        let frame = self.pending.clone();
        self.lock().committed.push(frame);
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new("Mock Panel", "Mock"))
    }
}

/// Handle for observing a mock display panel.
#[derive(Debug, Clone)]
pub struct MockPanelHandle {
    state: Arc<Mutex<PanelState>>,
}

impl MockPanelHandle {
    fn lock(&self) -> std::sync::MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make the next `init` call fail.
    pub fn fail_init(&self) {
        self.lock().fail_init = true;
    }

    /// Whether `init` has completed successfully.
    pub fn initialized(&self) -> bool {
        self.lock().initialized
    }

    /// The most recently committed frame, if any.
    pub fn last_frame(&self) -> Option<Vec<DrawOp>> {
        self.lock().committed.last().cloned()
    }

    /// Total number of committed frames.
    pub fn commit_count(&self) -> usize {
        self.lock().committed.len()
    }

    /// All committed frames, oldest first.
    pub fn frames(&self) -> Vec<Vec<DrawOp>> {
        self.lock().committed.clone()
    }
}
