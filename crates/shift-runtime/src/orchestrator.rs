//! Async polling orchestrator.
//!
//! Spawns a tokio task that re-reads the log source on an interval, runs
//! the parse pipeline and sends [`ReportSnapshot`]s through an `mpsc`
//! channel so consumers never share mutable state with the loop. Each parse
//! owns its own accumulators, so a failed or slow read only affects its own
//! tick.

use std::path::PathBuf;
use std::time::Duration;

use shift_data::reader::load_raw_log;
use shift_data::report::{parse_report, ReportOutcome};
use tokio::sync::mpsc;
use tokio::time;

// ── Public types ──────────────────────────────────────────────────────────────

/// One refreshed report forwarded to the consumer.
///
/// This is the primary data contract between the background runtime and
/// whatever renders or exports the report.
#[derive(Debug, Clone)]
pub struct ReportSnapshot {
    /// Parsed report plus run metadata.
    pub outcome: ReportOutcome,
    /// The path the raw text was loaded from.
    pub source: PathBuf,
}

// ── ReportOrchestrator ────────────────────────────────────────────────────────

/// Background polling coordinator.
///
/// Call [`ReportOrchestrator::start`] to spin up the polling loop in a
/// dedicated tokio task and receive a channel endpoint for snapshots.
pub struct ReportOrchestrator {
    /// How often to re-read the source.
    update_interval: Duration,
    /// Log file, or directory scanned for the newest log file.
    input: PathBuf,
}

impl ReportOrchestrator {
    /// Create a new orchestrator polling `input` every `update_interval_secs`.
    pub fn new(update_interval_secs: u64, input: PathBuf) -> Self {
        Self {
            update_interval: Duration::from_secs(update_interval_secs),
            input,
        }
    }

    /// Start the polling loop.
    ///
    /// Returns:
    /// - An `mpsc::Receiver<ReportSnapshot>` for the caller to poll.
    /// - An [`OrchestratorHandle`] that can be used to abort the loop.
    pub fn start(self) -> (mpsc::Receiver<ReportSnapshot>, OrchestratorHandle) {
        // Buffer a few snapshots so a slow consumer doesn't stall the loop.
        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            self.polling_loop(tx).await;
        });

        (rx, OrchestratorHandle { handle })
    }

    // ── Private implementation ────────────────────────────────────────────

    /// The main polling loop.
    ///
    /// Performs an immediate fetch on startup, then repeats on
    /// `update_interval`. Exits when the receiver side of the channel is
    /// closed.
    async fn polling_loop(self, tx: mpsc::Sender<ReportSnapshot>) {
        self.fetch_and_send(&tx).await;

        let mut interval = time::interval(self.update_interval);
        // Consume the first tick which fires immediately; we already fetched.
        interval.tick().await;

        loop {
            interval.tick().await;

            if tx.is_closed() {
                tracing::debug!("snapshot channel closed; exiting polling loop");
                break;
            }

            self.fetch_and_send(&tx).await;
        }
    }

    /// Read the source, parse it and send a snapshot to the channel.
    ///
    /// Read failures are logged and skipped; the loop keeps running so a
    /// source that appears later still gets picked up.
    async fn fetch_and_send(&self, tx: &mpsc::Sender<ReportSnapshot>) {
        let raw = match load_raw_log(&self.input) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "could not read log source; skipping tick");
                return;
            }
        };

        let outcome = parse_report(&raw);
        tracing::debug!(
            items = outcome.metadata.items,
            records = outcome.metadata.records_decoded,
            "report refreshed"
        );

        let snapshot = ReportSnapshot {
            outcome,
            source: self.input.clone(),
        };

        if let Err(e) = tx.send(snapshot).await {
            tracing::warn!(error = %e, "failed to send snapshot; receiver dropped");
        }
    }
}

// ── OrchestratorHandle ────────────────────────────────────────────────────────

/// A handle to the background polling task.
///
/// Drop or call [`OrchestratorHandle::abort`] to stop the loop.
pub struct OrchestratorHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl OrchestratorHandle {
    /// Immediately abort the polling loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
