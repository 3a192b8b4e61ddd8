//=========================================================================
// Resource Download
//=========================================================================
//
// Bridges a download running elsewhere (usually a worker thread) with
// the tick-driven welcome flow.
//
// Architecture:
//   Worker ──DownloadReporter──> crossbeam channel ──DownloadHandle──> DownloadTask
//                                                                       │
//                                   WelcomeFlowController::update() <───┘ poll()
//
// A download ends only by completing. A reporter dropped without calling
// `finish()` (worker panicked, job returned early) counts as a failed
// download so the flow never waits forever on a dead worker.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{debug, error, warn};

//=== DownloadEvent =======================================================

/// Progress notifications emitted by a running download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    /// Localization key describing the current download status.
    Status(String),

    /// The download passed the point where the prompt can be hidden.
    ThresholdReached,

    /// Terminal event; nothing follows it.
    Finished { succeeded: bool },
}

//=== Channel Endpoints ===================================================

/// Creates a connected reporter/handle pair.
pub fn download_channel() -> (DownloadReporter, DownloadHandle) {
    let (sender, receiver) = unbounded();
    (DownloadReporter { sender }, DownloadHandle { receiver })
}

/// Sending half, held by whatever performs the download.
#[derive(Debug)]
pub struct DownloadReporter {
    sender: Sender<DownloadEvent>,
}

impl DownloadReporter {
    /// Reports a human-readable status by localization key.
    pub fn status(&self, key: impl Into<String>) {
        self.send(DownloadEvent::Status(key.into()));
    }

    pub fn threshold_reached(&self) {
        self.send(DownloadEvent::ThresholdReached);
    }

    /// Reports the terminal outcome and closes the channel.
    pub fn finish(self, succeeded: bool) {
        self.send(DownloadEvent::Finished { succeeded });
    }

    fn send(&self, event: DownloadEvent) {
        if self.sender.send(event).is_err() {
            debug!(target: "welcome", "Download listener is gone, dropping event");
        }
    }
}

/// Receiving half, polled on the logic thread.
#[derive(Debug)]
pub struct DownloadHandle {
    receiver: Receiver<DownloadEvent>,
}

//=== DownloadService Trait ===============================================

/// Starts resource downloads.
pub trait DownloadService: Send {
    /// Begins downloading the assets of `resource_version`.
    ///
    /// Must return immediately; progress arrives through the handle.
    fn begin(&mut self, resource_version: &str) -> DownloadHandle;
}

//=== ThreadedDownloadService =============================================

/// Runs a download job on a dedicated worker thread per request.
///
/// The job reports status and the threshold through the reporter and
/// returns whether it succeeded; completion is reported for it.
pub struct ThreadedDownloadService<F> {
    job: Arc<F>,
}

impl<F> ThreadedDownloadService<F>
where
    F: Fn(&str, &DownloadReporter) -> bool + Send + Sync + 'static,
{
    pub fn new(job: F) -> Self {
        Self { job: Arc::new(job) }
    }
}

impl<F> DownloadService for ThreadedDownloadService<F>
where
    F: Fn(&str, &DownloadReporter) -> bool + Send + Sync + 'static,
{
    fn begin(&mut self, resource_version: &str) -> DownloadHandle {
        let (reporter, handle) = download_channel();
        let job = Arc::clone(&self.job);
        let version = resource_version.to_string();

        let spawned = thread::Builder::new()
            .name(format!("download-{}", version))
            .spawn(move || {
                let succeeded = job(&version, &reporter);
                reporter.finish(succeeded);
            });

        // On spawn failure the closure (and its reporter) is dropped, which
        // the task reads as a failed download.
        if let Err(e) = spawned {
            error!(target: "welcome", "Failed to spawn download worker: {}", e);
        }

        handle
    }
}

//=== DownloadTask ========================================================

/// Tick-driven view of one running download.
#[derive(Debug)]
pub struct DownloadTask {
    resource_version: String,
    handle: DownloadHandle,
    finished: bool,
}

impl DownloadTask {
    pub fn new(resource_version: impl Into<String>, handle: DownloadHandle) -> Self {
        Self {
            resource_version: resource_version.into(),
            handle,
            finished: false,
        }
    }

    pub fn resource_version(&self) -> &str {
        &self.resource_version
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Drains the events that arrived since the last tick.
    ///
    /// The returned batch ends with `Finished` at most once over the life
    /// of the task; later polls return nothing.
    pub fn poll(&mut self) -> Vec<DownloadEvent> {
        let mut events = Vec::new();

        while !self.finished {
            match self.handle.receiver.try_recv() {
                Ok(event) => {
                    self.finished = matches!(event, DownloadEvent::Finished { .. });
                    events.push(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!(
                        target: "welcome",
                        "Download of {} ended without reporting completion",
                        self.resource_version
                    );
                    self.finished = true;
                    events.push(DownloadEvent::Finished { succeeded: false });
                }
            }
        }

        events
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn poll_until_finished(task: &mut DownloadTask) -> Vec<DownloadEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while !task.is_finished() {
            assert!(Instant::now() < deadline, "download never finished");
            events.extend(task.poll());
            thread::sleep(Duration::from_millis(1));
        }
        events
    }

    #[test]
    fn task_drains_events_in_order() {
        let (reporter, handle) = download_channel();
        let mut task = DownloadTask::new("1.20.1", handle);

        reporter.status("status.info.download_assets");
        assert_eq!(
            task.poll(),
            vec![DownloadEvent::Status("status.info.download_assets".into())]
        );
        assert!(task.poll().is_empty());

        reporter.threshold_reached();
        reporter.finish(true);
        assert_eq!(
            task.poll(),
            vec![
                DownloadEvent::ThresholdReached,
                DownloadEvent::Finished { succeeded: true }
            ]
        );
        assert!(task.is_finished());
        assert!(task.poll().is_empty());
    }

    #[test]
    fn dropped_reporter_counts_as_failure() {
        let (reporter, handle) = download_channel();
        let mut task = DownloadTask::new("1.20.1", handle);

        reporter.status("status.info.download_assets");
        drop(reporter);

        assert_eq!(
            task.poll(),
            vec![
                DownloadEvent::Status("status.info.download_assets".into()),
                DownloadEvent::Finished { succeeded: false }
            ]
        );
        assert!(task.is_finished());
    }

    #[test]
    fn reporter_survives_dropped_handle() {
        let (reporter, handle) = download_channel();
        drop(handle);
        reporter.status("ignored");
        reporter.finish(false);
    }

    #[test]
    fn threaded_service_reports_job_outcome() {
        let mut service = ThreadedDownloadService::new(|version: &str, reporter: &DownloadReporter| {
            reporter.status(format!("fetching {}", version));
            reporter.threshold_reached();
            version != "broken"
        });

        let mut ok = DownloadTask::new("1.20.1", service.begin("1.20.1"));
        assert_eq!(
            poll_until_finished(&mut ok),
            vec![
                DownloadEvent::Status("fetching 1.20.1".into()),
                DownloadEvent::ThresholdReached,
                DownloadEvent::Finished { succeeded: true }
            ]
        );

        let mut failed = DownloadTask::new("broken", service.begin("broken"));
        let events = poll_until_finished(&mut failed);
        assert_eq!(events.last(), Some(&DownloadEvent::Finished { succeeded: false }));
    }
}
