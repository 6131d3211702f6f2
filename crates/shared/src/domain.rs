use std::{path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};

pub const PLAIN_TEXT_MIME: &str = "text/plain";
pub const VIDEO_MIME_PREFIX: &str = "video/";
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Screenplay extensions accepted regardless of the reported MIME type.
pub const SCREENPLAY_EXTENSIONS: &[&str] = &[".fountain"];

/// Where the bytes of a selected file come from when it is finally uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

/// A file the user picked, as seen by the form before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub source: FileSource,
}

impl SelectedFile {
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            source: FileSource::Memory(Arc::from(bytes)),
        }
    }

    /// Lower-cased extension including the leading dot, if the name has one.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(format!(".{}", ext.to_ascii_lowercase()))
    }

    pub fn is_plain_text(&self) -> bool {
        self.mime_type == PLAIN_TEXT_MIME
    }

    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with(VIDEO_MIME_PREFIX)
    }

    pub fn is_screenplay(&self) -> bool {
        self.is_plain_text()
            || SCREENPLAY_EXTENSIONS
                .iter()
                .any(|ext| self.name.ends_with(ext))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Cosmetic caption bucket for the simulated progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    AnalyzingScript,
    ProcessingScenes,
    MatchingScenes,
    Finalizing,
}

impl ProgressPhase {
    pub fn from_progress(progress: u8) -> Self {
        match progress {
            0..=29 => Self::AnalyzingScript,
            30..=59 => Self::ProcessingScenes,
            60..=89 => Self::MatchingScenes,
            _ => Self::Finalizing,
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            Self::AnalyzingScript => "Analyzing script...",
            Self::ProcessingScenes => "Processing video scenes...",
            Self::MatchingScenes => "Matching scenes to script...",
            Self::Finalizing => "Finalizing video...",
        }
    }
}
