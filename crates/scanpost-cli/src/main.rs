//! Scanpost bootstrap: wires peripherals, credentials, and the compiled-in
//! authorization table into the event pipeline and runs it.
//!
//! There is no command-line surface: everything an endpoint needs is
//! compiled-in constant data, exactly as on the deployed device. This binary
//! runs against the mock peripherals (the development emulator); real
//! hardware slots in through the `AnyCardReader`/`AnyDisplayPanel` wrappers
//! once driver variants exist.

use anyhow::Context;
use scanpost_core::constants::READY_SPLASH_MS;
use scanpost_display::ScreenPresenter;
use scanpost_engine::{AuthorizationDirectory, EventPipeline, PipelineConfig};
use scanpost_hardware::devices::{AnyCardReader, AnyDisplayPanel};
use scanpost_hardware::mock::{MockPanel, MockReader};
use scanpost_link::mock::MockTransport;
use scanpost_link::{ConnectivityManager, LinkConfig, LinkCredentials, SessionAuth};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Link credentials. Compiled-in on purpose: the endpoint has no
/// provisioning surface.
const NETWORK_NAME: &str = "scanpost-net";
const NETWORK_SECRET: &str = "changeme";
const SESSION_USERNAME: &str = "scanpost";
const SESSION_PASSWORD: &str = "changeme";

/// The authorization table. Adding or removing a card means rebuilding.
const AUTHORIZED: &[(&str, &str)] = &[
    ("E3 3C 5C 1C", "Donovan"),
    ("F3 FB 53 94", "Lily"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = scanpost_core::VERSION, "Scanpost starting");

    // Peripherals. The panel must come up or there is no point continuing:
    // an access endpoint without visible feedback is unusable.
    let (reader, reader_handle) = MockReader::new();
    let (panel, _panel_handle) = MockPanel::new();
    let mut presenter = ScreenPresenter::new(AnyDisplayPanel::Mock(panel))
        .await
        .context("display panel initialization failed")?;

    presenter.show_message("Connecting", "network", true).await;

    // Network. A failed link is not fatal: the endpoint degrades to
    // local-only decisions and the pipeline skips publication.
    let (transport, _transport_handle) = MockTransport::new();
    let link_config = LinkConfig {
        credentials: LinkCredentials::new(NETWORK_NAME, NETWORK_SECRET),
        auth: SessionAuth::new(SESSION_USERNAME, SESSION_PASSWORD),
        ..LinkConfig::default()
    };
    let mut link = ConnectivityManager::new(transport, link_config);
    let link_state = link.connect_link().await;
    info!(%link_state, "Link bootstrap finished");

    presenter.show_message("Scanpost", "Ready", true).await;
    info!("Ready; scan a card");
    tokio::time::sleep(Duration::from_millis(READY_SPLASH_MS)).await;
    presenter.show_idle().await;

    let directory = AuthorizationDirectory::from_table(AUTHORIZED)
        .context("invalid compiled-in authorization table")?;

    // Demo scans for the emulator shell: one known card, one unknown.
    reader_handle.present_card(vec![0xE3, 0x3C, 0x5C, 0x1C]);
    reader_handle.present_card(vec![0x00, 0x11, 0x22, 0x33]);

    let mut pipeline = EventPipeline::new(
        AnyCardReader::Mock(reader),
        presenter,
        link,
        directory,
        PipelineConfig::default(),
    );

    pipeline.run().await;
    Ok(())
}
