//! Common test harness for pipeline integration tests.
//!
//! Builds a complete endpoint out of mock peripherals and a mock transport,
//! keeping the control handles so tests can script card presentations,
//! inject network faults, and inspect committed frames and wire traffic.

use std::time::Duration;

use scanpost_display::ScreenPresenter;
use scanpost_engine::{AuthorizationDirectory, EventPipeline, PipelineConfig};
use scanpost_hardware::mock::{MockPanel, MockPanelHandle, MockReader, MockReaderHandle};
use scanpost_link::mock::{MockTransport, MockTransportHandle};
use scanpost_link::{ConnectivityManager, LinkConfig};

/// Test directory: the two cards the deployed device knows.
pub const DIRECTORY: &[(&str, &str)] = &[("E3 3C 5C 1C", "Donovan"), ("F3 FB 53 94", "Lily")];

/// A fully wired pipeline plus the control handles of every mock.
pub struct Harness {
    pub pipeline: EventPipeline<MockReader, MockPanel, MockTransport>,
    pub reader: MockReaderHandle,
    pub panel: MockPanelHandle,
    pub transport: MockTransportHandle,
}

impl Harness {
    /// Build a harness with a healthy transport and the link connected.
    pub async fn connected() -> Self {
        Self::build(|_| {}, true).await
    }

    /// Build a harness after scripting the transport, optionally attempting
    /// the bootstrap link connect.
    pub async fn build(script: impl FnOnce(&MockTransportHandle), connect: bool) -> Self {
        let (reader, reader_handle) = MockReader::new();
        let (panel, panel_handle) = MockPanel::new();
        let (transport, transport_handle) = MockTransport::new();

        script(&transport_handle);

        let presenter = ScreenPresenter::new(panel).await.unwrap();

        let link_config = LinkConfig {
            attempt_budget: 3,
            attempt_delay: Duration::from_millis(0),
            ..LinkConfig::default()
        };
        let mut link = ConnectivityManager::new(transport, link_config);
        if connect {
            link.connect_link().await;
        }

        let directory = AuthorizationDirectory::from_table(DIRECTORY).unwrap();

        let pipeline = EventPipeline::new(
            reader,
            presenter,
            link,
            directory,
            PipelineConfig {
                dwell: Duration::from_millis(0),
            },
        );

        Self {
            pipeline,
            reader: reader_handle,
            panel: panel_handle,
            transport: transport_handle,
        }
    }

    /// Texts of the most recently committed frame.
    pub fn last_frame_texts(&self) -> Vec<String> {
        self.panel
            .last_frame()
            .unwrap_or_default()
            .iter()
            .filter_map(|op| op.as_text().map(str::to_string))
            .collect()
    }
}
