//! Peripheral device trait definitions.
//!
//! This module defines the trait interfaces for the two peripherals the
//! endpoint consumes: the contactless card reader and the monochrome display
//! panel. The traits establish the boundary between the event pipeline and
//! commodity driver code, enabling substitution between mock and real
//! hardware implementations.
//!
//! All traits use native `async fn` methods (Rust 1.90 + Edition 2024 RPITIT),
//! eliminating the need for the `async_trait` macro.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::types::{DeviceInfo, Shade};

/// Contactless card reader abstraction.
///
/// Represents a reader that can detect a card in its field, deliver the raw
/// serial bytes, and release the card so the same tag is not re-read on the
/// next polling iteration.
///
/// # Object Safety and Dynamic Dispatch
///
/// **NOTE**: This trait is NOT object-safe because `async fn` methods return
/// `impl Future` (Edition 2024 RPITIT). You cannot use `Box<dyn CardReader>`.
/// Use generic type parameters, or the [`AnyCardReader`](crate::devices::AnyCardReader)
/// enum wrapper for concrete dispatch.
///
/// # Examples
///
/// ```no_run
/// use scanpost_hardware::traits::CardReader;
/// use scanpost_hardware::error::Result;
///
/// async fn poll_once<R: CardReader>(reader: &mut R) -> Result<Option<Vec<u8>>> {
///     if !reader.card_present().await? {
///         return Ok(None);
///     }
///     let serial = reader.read_serial().await?;
///     reader.release().await?;
///     Ok(Some(serial))
/// }
/// ```
pub trait CardReader: Send + Sync {
    /// Check whether a new card is in the reader's field.
    ///
    /// Non-blocking; returns immediately. A `true` result does not guarantee
    /// the subsequent read succeeds (the card may leave the field).
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while polling.
    async fn card_present(&self) -> Result<bool>;

    /// Read the raw serial bytes of the card currently in the field.
    ///
    /// The returned bytes are driver-defined and unvalidated; normalization
    /// and length checks belong to the caller. A failed read is a transient
    /// miss, not a fault: the caller discards the scan and polls again.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No card could be selected (it left the field or collided)
    /// - A communication error occurs
    async fn read_serial(&mut self) -> Result<Vec<u8>>;

    /// Release the current card and stop any active crypto session.
    ///
    /// Must be called after an event has been processed so the same card is
    /// not immediately re-read on the next iteration.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs.
    async fn release(&mut self) -> Result<()>;

    /// Get device information.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while querying
    /// device information.
    async fn get_info(&self) -> Result<DeviceInfo>;
}

/// Monochrome display panel abstraction.
///
/// The panel exposes a composed-frame model: drawing primitives accumulate
/// into an off-screen frame, and [`commit`](DisplayPanel::commit) presents
/// that frame atomically. A partially-drawn frame is never visible.
///
/// Drawing primitives are infallible by contract: after a successful
/// [`init`](DisplayPanel::init) the frame lives in memory and composition
/// cannot fail. A panel that cannot be initialized is a fatal condition for
/// the endpoint, reported exactly once at startup.
///
/// # Object Safety and Dynamic Dispatch
///
/// Not object-safe (async `init`/`commit`/`get_info` use RPITIT). Use generic
/// type parameters or [`AnyDisplayPanel`](crate::devices::AnyDisplayPanel).
///
/// # Examples
///
/// ```no_run
/// use scanpost_hardware::traits::DisplayPanel;
/// use scanpost_hardware::error::Result;
///
/// async fn splash<P: DisplayPanel>(panel: &mut P) -> Result<()> {
///     panel.init().await?;
///     panel.clear();
///     panel.draw_text(10, 10, 2, "HELLO");
///     panel.commit().await;
///     Ok(())
/// }
/// ```
pub trait DisplayPanel: Send + Sync {
    /// Probe and initialize the panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the panel does not respond. The caller treats
    /// this as fatal: the endpoint is useless without visible feedback.
    async fn init(&mut self) -> Result<()>;

    /// Panel width in pixels.
    fn width(&self) -> i32;

    /// Panel height in pixels.
    fn height(&self) -> i32;

    /// Clear the pending frame to all-dark.
    fn clear(&mut self);

    /// Draw text into the pending frame at the given cursor position.
    ///
    /// `size` is an integer glyph multiplier (1 = base font). Text wider
    /// than the panel is left to the underlying primitive; it is neither
    /// wrapped nor truncated here.
    fn draw_text(&mut self, x: i32, y: i32, size: u8, text: &str);

    /// Measure the rendered width of `text` at `size`, in pixels.
    ///
    /// Used by callers to compute horizontal centering.
    fn text_width(&self, text: &str, size: u8) -> i32;

    /// Draw a filled circle into the pending frame.
    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, shade: Shade);

    /// Draw a filled triangle into the pending frame.
    #[allow(clippy::too_many_arguments)]
    fn fill_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        shade: Shade,
    );

    /// Draw a straight line into the pending frame.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, shade: Shade);

    /// Present the pending frame atomically.
    ///
    /// Either the whole composed frame becomes visible or, on transport
    /// hiccups, the previously committed frame remains; an observer never
    /// sees a partial frame.
    async fn commit(&mut self);

    /// Get device information.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while querying
    /// device information.
    async fn get_info(&self) -> Result<DeviceInfo>;
}
