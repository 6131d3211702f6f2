//! Async driver for [`UploadForm`]: owns the form behind a lock, runs the
//! processing call, and paces the simulated progress ticker.

use std::sync::Arc;

use shared::{domain::SelectedFile, error::FormError, protocol::ProcessResponse};
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    backend::{HttpProcessingClient, ProcessingBackend},
    config::ClientSettings,
    form::{SubmitOutcome, UploadForm},
};

struct ControllerInner {
    form: Mutex<UploadForm>,
    updates: watch::Sender<UploadForm>,
    backend: Arc<dyn ProcessingBackend>,
    settings: ClientSettings,
}

impl ControllerInner {
    fn publish(&self, form: &UploadForm) {
        self.updates.send_replace(form.clone());
    }
}

#[derive(Clone)]
pub struct UploadController {
    inner: Arc<ControllerInner>,
}

impl UploadController {
    pub fn new(backend: Arc<dyn ProcessingBackend>, settings: ClientSettings) -> Self {
        let (updates, _) = watch::channel(UploadForm::new());
        Self {
            inner: Arc::new(ControllerInner {
                form: Mutex::new(UploadForm::new()),
                updates,
                backend,
                settings,
            }),
        }
    }

    pub fn with_http_backend(settings: ClientSettings) -> Self {
        let backend = Arc::new(HttpProcessingClient::new(
            settings.processing_endpoint.clone(),
        ));
        Self::new(backend, settings)
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.inner.settings
    }

    /// Receives a fresh copy of the form after every state change.
    pub fn subscribe(&self) -> watch::Receiver<UploadForm> {
        self.inner.updates.subscribe()
    }

    pub async fn snapshot(&self) -> UploadForm {
        self.inner.form.lock().await.clone()
    }

    pub async fn select_script(&self, file: SelectedFile) -> Result<(), FormError> {
        let mut form = self.inner.form.lock().await;
        let result = form.select_script(file);
        self.inner.publish(&form);
        result
    }

    pub async fn select_videos(
        &self,
        files: impl IntoIterator<Item = SelectedFile>,
    ) -> Result<usize, FormError> {
        let files: Vec<SelectedFile> = files.into_iter().collect();
        let offered = files.len();
        let mut form = self.inner.form.lock().await;
        let result = form.select_videos(files);
        if let Ok(accepted) = result {
            if accepted < offered {
                debug!(offered, accepted, "dropped non-video files from batch");
            }
        }
        self.inner.publish(&form);
        result
    }

    pub async fn remove_video(&self, index: usize) -> Option<SelectedFile> {
        let mut form = self.inner.form.lock().await;
        let removed = form.remove_video(index);
        if removed.is_some() {
            self.inner.publish(&form);
        }
        removed
    }

    pub async fn clear_script(&self) {
        let mut form = self.inner.form.lock().await;
        form.clear_script();
        self.inner.publish(&form);
    }

    pub async fn start_new_project(&self) {
        let mut form = self.inner.form.lock().await;
        form.start_new_project();
        self.inner.publish(&form);
    }

    /// Runs one processing attempt to completion.
    ///
    /// Returns immediately with `AlreadyInFlight` (no state change) when an
    /// attempt is outstanding, or `MissingInputs` when script or videos are
    /// absent.
    pub async fn submit(&self) -> SubmitOutcome {
        let pending = {
            let mut form = self.inner.form.lock().await;
            match form.begin_submission() {
                Ok(pending) => {
                    self.inner.publish(&form);
                    pending
                }
                Err(SubmitOutcome::AlreadyInFlight) => {
                    debug!("submit ignored; attempt already in flight");
                    return SubmitOutcome::AlreadyInFlight;
                }
                Err(outcome) => {
                    self.inner.publish(&form);
                    return outcome;
                }
            }
        };

        info!(
            attempt = pending.attempt,
            script = %pending.script.name,
            videos = pending.videos.len(),
            "submitting processing attempt"
        );
        let in_flight = InFlightAttempt::start(Arc::clone(&self.inner), pending.attempt);
        let outcome = self
            .inner
            .backend
            .process(&pending.script, &pending.videos)
            .await;
        log_outcome(pending.attempt, &outcome);
        in_flight.settle(outcome).await
    }
}

fn log_outcome(attempt: u64, outcome: &Result<ProcessResponse, FormError>) {
    match outcome {
        Ok(response) => info!(
            attempt,
            matched_scenes = response.matched_scenes(),
            "processing attempt succeeded"
        ),
        Err(err) => warn!(attempt, "processing attempt failed: {err}"),
    }
}

/// Interval task that bumps the displayed progress for one attempt.
/// Dropping the ticker aborts the task.
struct ProgressTicker {
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    fn start(inner: Arc<ControllerInner>, attempt: u64) -> Self {
        let period = inner.settings.progress_tick();
        let step = inner.settings.progress_step;
        let ceiling = inner.settings.progress_ceiling;

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let mut form = inner.form.lock().await;
                if !form.advance_progress(attempt, step, ceiling) {
                    break;
                }
                debug!(attempt, progress = form.progress(), "progress tick");
                inner.publish(&form);
            }
        });
        Self { handle }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Scope of one outstanding attempt. Owns the ticker; if dropped without
/// [`InFlightAttempt::settle`] the attempt is marked failed so the form never
/// stays stuck in the submitting state.
struct InFlightAttempt {
    inner: Arc<ControllerInner>,
    attempt: u64,
    ticker: Option<ProgressTicker>,
    settled: bool,
}

impl InFlightAttempt {
    fn start(inner: Arc<ControllerInner>, attempt: u64) -> Self {
        let ticker = ProgressTicker::start(Arc::clone(&inner), attempt);
        Self {
            inner,
            attempt,
            ticker: Some(ticker),
            settled: false,
        }
    }

    async fn settle(mut self, outcome: Result<ProcessResponse, FormError>) -> SubmitOutcome {
        // Stop the ticker before anything else can observe the outcome.
        drop(self.ticker.take());

        // Cancellation while waiting for the lock must still abandon the attempt.
        let mut form = self.inner.form.lock().await;
        let result = form.complete_submission(self.attempt, outcome);
        self.settled = true;
        self.inner.publish(&form);
        result
    }
}

impl Drop for InFlightAttempt {
    fn drop(&mut self) {
        drop(self.ticker.take());
        if self.settled {
            return;
        }

        warn!(attempt = self.attempt, "processing attempt abandoned");
        if let Ok(mut form) = self.inner.form.try_lock() {
            if form.abandon_submission(self.attempt) {
                self.inner.publish(&form);
            }
            return;
        }
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let inner = Arc::clone(&self.inner);
            let attempt = self.attempt;
            runtime.spawn(async move {
                let mut form = inner.form.lock().await;
                if form.abandon_submission(attempt) {
                    inner.publish(&form);
                }
            });
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
