//! The status loop: fetch → render → print → diff → notify → sleep.
//!
//! Everything runs on the caller's task, one step after another, so there is
//! never more than one request in flight. A cycle that cannot load the
//! watch-list or reach the API is logged and skipped; the next cycle starts
//! after the usual interval with the online set left as it was.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use notifier_core::api::ApiClient;
use notifier_core::online::OnlineTracker;
use notifier_core::stream::{online_names, StreamRecord};
use notifier_core::template::Template;
use notifier_core::watchlist::WatchListStore;
use tracing::{debug, info, warn};

use crate::notify::Notifier;

/// Source of live-stream snapshots for a set of channels.
pub trait StreamSource {
    async fn fetch_streams(&self, channels: &[String]) -> notifier_core::Result<Vec<StreamRecord>>;
}

impl StreamSource for ApiClient {
    async fn fetch_streams(&self, channels: &[String]) -> notifier_core::Result<Vec<StreamRecord>> {
        ApiClient::fetch_streams(self, channels).await
    }
}

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub clear_screen: bool,
    pub format_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed {
        live: usize,
        newly_online: Vec<String>,
    },
    Skipped,
}

pub struct Poller<S, N> {
    source: S,
    notifier: N,
    store: WatchListStore,
    tracker: OnlineTracker,
    settings: PollSettings,
}

impl<S: StreamSource, N: Notifier> Poller<S, N> {
    pub fn new(source: S, notifier: N, store: WatchListStore, settings: PollSettings) -> Self {
        Self {
            source,
            notifier,
            store,
            tracker: OnlineTracker::new(),
            settings,
        }
    }

    /// Poll forever. Only write failures on `out` end the loop.
    pub async fn run<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        info!(
            "Polling {:?} every {:?}",
            self.store.path(),
            self.settings.interval
        );
        loop {
            self.cycle(out).await?;
            tokio::time::sleep(self.settings.interval).await;
        }
    }

    pub async fn cycle<W: Write>(&mut self, out: &mut W) -> anyhow::Result<CycleOutcome> {
        if self.settings.clear_screen {
            queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
        }

        let channels = match self.store.load() {
            Ok(channels) => channels,
            Err(e) => {
                warn!("Skipping poll, watch-list unreadable: {}", e);
                out.flush()?;
                return Ok(CycleOutcome::Skipped);
            }
        };

        let records = match self.source.fetch_streams(&channels).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Skipping poll, fetch failed: {}", e);
                out.flush()?;
                return Ok(CycleOutcome::Skipped);
            }
        };

        let template = self.template();
        for record in &records {
            writeln!(out, "{}", template.render(record))?;
        }
        out.flush()?;

        let newly_online = self.tracker.diff(&online_names(&records));
        for channel in &newly_online {
            self.notifier
                .notify(&format!("{} is now streaming!", channel))
                .await;
        }

        debug!(
            "Poll done: {} watched, {} live, {} newly online",
            channels.len(),
            records.len(),
            newly_online.len()
        );
        Ok(CycleOutcome::Completed {
            live: records.len(),
            newly_online,
        })
    }

    /// Re-read every cycle so edits to the format file apply without a restart.
    fn template(&self) -> Template {
        match Template::load(&self.settings.format_file) {
            Ok(template) => template,
            Err(e) => {
                warn!("Using default format, {}", e);
                Template::default()
            }
        }
    }
}
