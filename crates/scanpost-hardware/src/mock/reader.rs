//! Mock card reader implementation for testing and development.
//!
//! This module provides a simulated contactless reader that can be controlled
//! programmatically for testing without requiring physical hardware.

use crate::{
    Result,
    traits::CardReader,
    types::DeviceInfo,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct ReaderState {
    /// Cards waiting to be read, oldest first.
    pending: VecDeque<Vec<u8>>,

    /// Serial currently selected by `read_serial`, cleared by `release`.
    selected: Option<Vec<u8>>,

    /// Number of upcoming `read_serial` calls that fail as transient misses.
    fail_reads: u32,

    /// How many times `release` has been called.
    releases: u32,
}

/// Mock card reader for testing and development.
///
/// The reader is driven through its [`MockReaderHandle`]: presenting a card
/// queues the raw serial bytes, and the next `card_present`/`read_serial`
/// polling cycle picks it up.
///
/// # Examples
///
/// ```
/// use scanpost_hardware::mock::MockReader;
/// use scanpost_hardware::traits::CardReader;
///
/// #[tokio::main]
/// async fn main() -> scanpost_hardware::Result<()> {
///     let (mut reader, handle) = MockReader::new();
///
///     handle.present_card(vec![0xE3, 0x3C, 0x5C, 0x1C]);
///     assert!(reader.card_present().await?);
///
///     let serial = reader.read_serial().await?;
///     assert_eq!(serial, vec![0xE3, 0x3C, 0x5C, 0x1C]);
///
///     reader.release().await?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockReader {
    state: Arc<Mutex<ReaderState>>,
    name: String,
}

impl MockReader {
    /// Create a new mock reader with the default name.
    ///
    /// Returns a tuple of (MockReader, MockReaderHandle) where the handle
    /// is used to simulate card presentations and fault injection.
    pub fn new() -> (Self, MockReaderHandle) {
        Self::with_name("Mock Card Reader".to_string())
    }

    /// Create a new mock reader with a custom name.
    pub fn with_name(name: String) -> (Self, MockReaderHandle) {
        let state = Arc::new(Mutex::new(ReaderState::default()));

        let reader = Self {
            state: Arc::clone(&state),
            name: name.clone(),
        };

        let handle = MockReaderHandle { state, name };

        (reader, handle)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ReaderState> {
        // Mutex poisoning cannot happen here: no holder panics while locked.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockReader {
    fn default() -> Self {
        Self::new().0
    }
}

impl CardReader for MockReader {
    async fn card_present(&self) -> Result<bool> {
        Ok(!self.lock().pending.is_empty())
    }

    async fn read_serial(&mut self) -> Result<Vec<u8>> {
        let mut state = self.lock();

        if state.fail_reads > 0 {
            state.fail_reads -= 1;
            return Err(crate::HardwareError::card_read(
                "card left the field during selection",
            ));
        }

        let serial = state
            .pending
            .pop_front()
            .ok_or_else(|| crate::HardwareError::card_read("no card in field"))?;
        state.selected = Some(serial.clone());
        Ok(serial)
    }

    async fn release(&mut self) -> Result<()> {
        let mut state = self.lock();
        state.selected = None;
        state.releases += 1;
        Ok(())
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock"))
    }
}

/// Handle for controlling a mock card reader.
///
/// The handle shares state with its reader, so presentations and fault
/// injection are visible to the pipeline polling the reader.
#[derive(Debug, Clone)]
pub struct MockReaderHandle {
    state: Arc<Mutex<ReaderState>>,
    name: String,
}

impl MockReaderHandle {
    fn lock(&self) -> std::sync::MutexGuard<'_, ReaderState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Present a card with the given raw serial bytes.
    ///
    /// The bytes are deliberately unvalidated: presenting an empty or
    /// overlong serial exercises the caller's malformed-scan handling.
    pub fn present_card(&self, serial: Vec<u8>) {
        self.lock().pending.push_back(serial);
    }

    /// Make the next `read_serial` call fail as a transient miss.
    ///
    /// The card stays queued, so a subsequent read still succeeds.
    pub fn fail_next_read(&self) {
        self.lock().fail_reads += 1;
    }

    /// Number of cards queued and not yet read.
    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    /// How many times the reader has been released.
    pub fn release_count(&self) -> u32 {
        self.lock().releases
    }

    /// Serial currently selected by the reader, if any.
    pub fn selected_serial(&self) -> Option<Vec<u8>> {
        self.lock().selected.clone()
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
