//! In-memory form state and its synchronous transitions.
//!
//! Nothing here touches the network or the clock; the async side lives in
//! [`crate::controller`] and drives the submission-related transitions.

use shared::{
    domain::{ProcessingStatus, ProgressPhase, SelectedFile},
    error::{FormError, GENERIC_FAILURE_MESSAGE},
    protocol::ProcessResponse,
};

pub const PROGRESS_COMPLETE: u8 = 100;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    script: Option<SelectedFile>,
    videos: Vec<SelectedFile>,
    status: ProcessingStatus,
    progress: u8,
    result: Option<ProcessResponse>,
    error: Option<FormError>,
    attempt: u64,
}

/// Inputs captured when an attempt starts; later edits to the form do not
/// affect what is uploaded.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub attempt: u64,
    pub script: SelectedFile,
    pub videos: Vec<SelectedFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed,
    MissingInputs,
    AlreadyInFlight,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self) -> Option<&SelectedFile> {
        self.script.as_ref()
    }

    pub fn videos(&self) -> &[SelectedFile] {
        &self.videos
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == ProcessingStatus::Submitting
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn progress_caption(&self) -> &'static str {
        ProgressPhase::from_progress(self.progress).caption()
    }

    pub fn result(&self) -> Option<&ProcessResponse> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Whether the submit action is live: inputs present and nothing in flight.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.script.is_some() && !self.videos.is_empty()
    }

    pub fn select_script(&mut self, file: SelectedFile) -> Result<(), FormError> {
        if !file.is_screenplay() {
            self.error = Some(FormError::InvalidScript);
            return Err(FormError::InvalidScript);
        }
        self.script = Some(file);
        self.error = None;
        Ok(())
    }

    /// Appends every video in `files` and silently drops the rest.
    /// Returns how many were appended.
    pub fn select_videos(
        &mut self,
        files: impl IntoIterator<Item = SelectedFile>,
    ) -> Result<usize, FormError> {
        let valid: Vec<SelectedFile> = files.into_iter().filter(SelectedFile::is_video).collect();
        if valid.is_empty() {
            self.error = Some(FormError::NoValidVideos);
            return Err(FormError::NoValidVideos);
        }
        let accepted = valid.len();
        self.videos.extend(valid);
        self.error = None;
        Ok(accepted)
    }

    pub fn remove_video(&mut self, index: usize) -> Option<SelectedFile> {
        if index >= self.videos.len() {
            return None;
        }
        Some(self.videos.remove(index))
    }

    pub fn clear_script(&mut self) {
        self.script = None;
    }

    pub fn start_new_project(&mut self) {
        if self.is_submitting() {
            return;
        }
        self.script = None;
        self.videos.clear();
        self.result = None;
        self.progress = 0;
        self.error = None;
        self.status = ProcessingStatus::Idle;
    }

    pub(crate) fn begin_submission(&mut self) -> Result<PendingSubmission, SubmitOutcome> {
        if self.is_submitting() {
            return Err(SubmitOutcome::AlreadyInFlight);
        }
        let script = match (&self.script, self.videos.is_empty()) {
            (Some(script), false) => script.clone(),
            _ => {
                self.error = Some(FormError::MissingInputs);
                return Err(SubmitOutcome::MissingInputs);
            }
        };

        self.attempt += 1;
        self.status = ProcessingStatus::Submitting;
        self.progress = 0;
        self.error = None;
        self.result = None;

        Ok(PendingSubmission {
            attempt: self.attempt,
            script,
            videos: self.videos.clone(),
        })
    }

    /// One ticker step. Returns `false` once the ticker has nothing left to do
    /// for `attempt`.
    pub(crate) fn advance_progress(&mut self, attempt: u64, step: u8, ceiling: u8) -> bool {
        if self.attempt != attempt || !self.is_submitting() {
            return false;
        }
        if self.progress >= ceiling {
            self.progress = ceiling;
            return false;
        }
        self.progress = self.progress.saturating_add(step).min(ceiling);
        true
    }

    pub(crate) fn complete_submission(
        &mut self,
        attempt: u64,
        outcome: Result<ProcessResponse, FormError>,
    ) -> SubmitOutcome {
        if self.attempt != attempt || !self.is_submitting() {
            return SubmitOutcome::Failed;
        }
        match outcome {
            Ok(response) => {
                self.progress = PROGRESS_COMPLETE;
                self.result = Some(response);
                self.status = ProcessingStatus::Succeeded;
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                self.error = Some(err);
                self.status = ProcessingStatus::Failed;
                SubmitOutcome::Failed
            }
        }
    }

    /// Leaves the submitting state when an attempt ends without an outcome.
    pub(crate) fn abandon_submission(&mut self, attempt: u64) -> bool {
        if self.attempt != attempt || !self.is_submitting() {
            return false;
        }
        self.error = Some(FormError::transport(GENERIC_FAILURE_MESSAGE));
        self.status = ProcessingStatus::Failed;
        true
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
