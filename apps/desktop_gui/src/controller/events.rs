//! Backend-to-UI events and error modeling for the desktop form.

use client_core::UploadForm;

pub enum UiEvent {
    FormUpdated(UploadForm),
    Info(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Filesystem,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    ScriptSelection,
    VideoSelection,
}

/// Failures outside the form's own error banner: unreadable picks, a dead
/// backend worker, a full command queue.
#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("no such file")
            || lower.contains("not a regular file")
            || lower.contains("permission denied")
            || lower.contains("failed to read")
        {
            UiErrorCategory::Filesystem
        } else if lower.contains("disconnect")
            || lower.contains("queue")
            || lower.contains("runtime")
            || lower.contains("connection")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn display_text(&self) -> String {
        let prefix = match self.context {
            UiErrorContext::BackendStartup => "Backend unavailable",
            UiErrorContext::ScriptSelection => "Could not open script",
            UiErrorContext::VideoSelection => "Could not open video",
        };
        format!("{prefix}: {}", self.message)
    }
}
