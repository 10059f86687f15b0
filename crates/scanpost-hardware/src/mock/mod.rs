//! Mock peripheral implementations for development and testing.
//!
//! Each mock comes as a (device, handle) pair: the device half implements the
//! peripheral trait and is handed to the pipeline, while the handle half
//! stays with the test or emulator shell to script presentations, observe
//! output, and inject faults.

mod panel;
mod reader;

pub use panel::{MockPanel, MockPanelHandle};
pub use reader::{MockReader, MockReaderHandle};
