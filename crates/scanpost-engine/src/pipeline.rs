//! The event pipeline: one cooperative control loop.
//!
//! Each iteration turns at most one card scan into an authorization
//! decision, a display transition, and a best-effort telemetry publication:
//!
//! 1. Connectivity maintenance (always, before polling, so a scan is handled
//!    against the freshest known connectivity state)
//! 2. Poll the reader; no card ends the iteration
//! 3. Read the serial; a failed read is a transient miss, not an error
//! 4. Normalize and look the identifier up in the directory
//! 5. Build the [`AccessEvent`] and drive the presenter
//! 6. Publish the event to the state topic, best-effort
//! 7. Hold the result screen for the dwell interval, then revert to idle
//! 8. Release the card so the same tag is not immediately re-read
//!
//! Everything runs on a single logical task; the dwell interval and the
//! bounded link-connect loop are the only suspension points, and both are
//! plain awaited sleeps. While one of them runs the whole pipeline stalls,
//! maintenance included; an accepted tradeoff of the cooperative model.

use std::time::Duration;

use scanpost_core::constants::DEFAULT_DWELL_MS;
use scanpost_core::{AccessEvent, CardUid};
use scanpost_display::ScreenPresenter;
use scanpost_hardware::traits::{CardReader, DisplayPanel};
use scanpost_link::{ConnectionState, ConnectivityManager, Transport};
use tracing::{debug, info, warn};

use crate::directory::AuthorizationDirectory;

/// Pipeline timing configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How long a result screen stays visible before reverting to idle.
    pub dwell: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dwell: Duration::from_millis(DEFAULT_DWELL_MS),
        }
    }
}

/// What a single pipeline iteration did.
///
/// Returned by [`EventPipeline::tick`] so tests and shells can observe the
/// loop without scraping logs. Discarded scans carry no event: they produce
/// no display transition and no publication.
#[derive(Debug)]
pub enum TickOutcome {
    /// No card was present.
    Idle,

    /// A scan was processed to completion (granted or denied).
    Scanned(AccessEvent),

    /// The reader reported a card but the read failed; transient miss.
    MissedRead,

    /// The serial was malformed (e.g. empty); the scan was discarded.
    InvalidScan,
}

/// The endpoint's control loop over its four collaborators.
///
/// Owns the reader, the presenter, the connectivity manager, and the
/// directory; nothing else touches them while the pipeline runs. There is no
/// concurrency: exactly one operation is in flight at any time.
#[derive(Debug)]
pub struct EventPipeline<R, P, T>
where
    R: CardReader,
    P: DisplayPanel,
    T: Transport,
{
    reader: R,
    presenter: ScreenPresenter<P>,
    link: ConnectivityManager<T>,
    directory: AuthorizationDirectory,
    config: PipelineConfig,
}

impl<R, P, T> EventPipeline<R, P, T>
where
    R: CardReader,
    P: DisplayPanel,
    T: Transport,
{
    /// Assemble the pipeline. The presenter must already be initialized and
    /// the link connect attempt (if any) already made; bootstrap owns both.
    pub fn new(
        reader: R,
        presenter: ScreenPresenter<P>,
        link: ConnectivityManager<T>,
        directory: AuthorizationDirectory,
        config: PipelineConfig,
    ) -> Self {
        Self {
            reader,
            presenter,
            link,
            directory,
            config,
        }
    }

    /// Snapshot of the connectivity state, for observability.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.link.state()
    }

    /// The screen currently committed, for observability.
    #[must_use]
    pub fn display_state(&self) -> &scanpost_display::DisplayState {
        self.presenter.state()
    }

    /// Run one pipeline iteration.
    pub async fn tick(&mut self) -> TickOutcome {
        self.link.maintain().await;

        match self.reader.card_present().await {
            Ok(true) => {}
            Ok(false) => return TickOutcome::Idle,
            Err(e) => {
                debug!(error = %e, "Reader poll failed");
                return TickOutcome::Idle;
            }
        }

        let serial = match self.reader.read_serial().await {
            Ok(serial) => serial,
            Err(e) => {
                debug!(error = %e, "Card read missed");
                return TickOutcome::MissedRead;
            }
        };

        let uid = match CardUid::from_bytes(serial) {
            Ok(uid) => uid,
            Err(e) => {
                debug!(error = %e, "Malformed scan discarded");
                return TickOutcome::InvalidScan;
            }
        };
        info!(uid = %uid, "Card scanned");

        let event = match self.directory.lookup(&uid) {
            Some(name) => {
                info!(name, "Access granted");
                AccessEvent::granted(uid, name)
            }
            None => {
                info!("Access denied");
                AccessEvent::denied(uid)
            }
        };

        if event.authorized {
            self.presenter.show_granted(&event.name).await;
        } else {
            self.presenter.show_denied().await;
        }

        self.publish_event(&event).await;

        tokio::time::sleep(self.config.dwell).await;
        self.presenter.show_idle().await;

        if let Err(e) = self.reader.release().await {
            debug!(error = %e, "Card release failed");
        }

        TickOutcome::Scanned(event)
    }

    /// Run forever. The loop has no exit: the endpoint scans until the
    /// process is stopped.
    pub async fn run(&mut self) {
        info!(
            directory_entries = self.directory.len(),
            "Event pipeline running"
        );
        loop {
            self.tick().await;
        }
    }

    async fn publish_event(&mut self, event: &AccessEvent) {
        let payload = match event.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Event payload encoding failed; not published");
                return;
            }
        };

        let topic = self.link.state_topic().to_string();
        let outcome = self.link.publish(&topic, &payload).await;
        debug!(?outcome, "Event publication finished");
    }
}
