//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

#[derive(Debug)]
pub enum BackendCommand {
    SelectScript { path: PathBuf },
    SelectVideos { paths: Vec<PathBuf> },
    RemoveVideo { index: usize },
    ClearScript,
    StartNewProject,
    Submit,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectScript { .. } => "select_script",
            Self::SelectVideos { .. } => "select_videos",
            Self::RemoveVideo { .. } => "remove_video",
            Self::ClearScript => "clear_script",
            Self::StartNewProject => "start_new_project",
            Self::Submit => "submit",
        }
    }
}
