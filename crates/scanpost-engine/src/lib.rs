//! Core engine of the Scanpost access-control endpoint.
//!
//! This crate contains the two pieces with real decision content: the static
//! [`AuthorizationDirectory`] and the [`EventPipeline`] control loop that
//! turns raw card reads into authorization decisions, display transitions,
//! and best-effort telemetry publications.

pub mod directory;
pub mod pipeline;

pub use directory::{AuthorizationDirectory, AuthorizationEntry};
pub use pipeline::{EventPipeline, PipelineConfig, TickOutcome};
