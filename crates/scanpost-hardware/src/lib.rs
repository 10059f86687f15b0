//! Peripheral abstraction layer for the Scanpost access-control endpoint.
//!
//! This crate provides trait-based abstractions for the two peripherals the
//! endpoint consumes: the contactless card reader and the monochrome display
//! panel. The traits enable substitution between mock implementations (for
//! development and testing) and real hardware drivers.
//!
//! # Design Philosophy
//!
//! - **Async-first**: I/O operations are asynchronous using native `async fn`
//!   in traits (Rust 1.90 + Edition 2024 RPITIT).
//! - **Thread-safe**: All traits require `Send + Sync` for use with Tokio.
//! - **Error-aware**: Fallible operations return `Result<T>` with detailed
//!   error information; frame composition is infallible by contract.
//!
//! # Card Readers
//!
//! The [`CardReader`] trait exposes exactly what the event pipeline needs:
//! poll for presence, read the raw serial, release the card.
//!
//! ```no_run
//! use scanpost_hardware::traits::CardReader;
//! use scanpost_hardware::error::Result;
//!
//! async fn next_serial<R: CardReader>(reader: &mut R) -> Result<Option<Vec<u8>>> {
//!     if reader.card_present().await? {
//!         return Ok(Some(reader.read_serial().await?));
//!     }
//!     Ok(None)
//! }
//! ```
//!
//! # Display Panels
//!
//! The [`DisplayPanel`] trait exposes a composed-frame model: infallible
//! drawing primitives plus an atomic `commit`. Initialization is the only
//! fallible display operation, and its failure is fatal to the endpoint.
//!
//! # Mock Implementations
//!
//! The [`mock`] module provides scriptable in-memory implementations of both
//! traits, each paired with a control handle for presenting cards, observing
//! committed frames, and injecting faults.

pub mod devices;
pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{HardwareError, Result};
pub use traits::{CardReader, DisplayPanel};
pub use types::{DeviceInfo, DrawOp, Shade};
