//! Client-side workflow for submitting a screenplay plus video clips to the
//! processing service: selection, validation, submission, simulated
//! progress and result handling.

pub mod backend;
pub mod config;
pub mod controller;
pub mod form;
pub mod selection;

pub use backend::{HttpProcessingClient, ProcessingBackend};
pub use config::{load_settings, load_settings_from, ClientSettings};
pub use controller::UploadController;
pub use form::{SubmitOutcome, UploadForm, PROGRESS_COMPLETE};
pub use selection::{selected_file_from_path, selected_files_from_paths};

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod http_tests;
