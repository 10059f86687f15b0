//! Display presentation layer for the Scanpost access-control endpoint.
//!
//! This crate turns authorization decisions into committed display frames.
//! It owns the display state and composes the endpoint's small set of named
//! screens (idle, granted, denied, status message) out of the primitives the
//! panel boundary exposes.

pub mod presenter;

pub use presenter::{DisplayState, ScreenPresenter};
