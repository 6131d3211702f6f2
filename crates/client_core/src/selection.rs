//! Turning filesystem paths into [`SelectedFile`] handles.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use shared::domain::{FileSource, SelectedFile, FALLBACK_MIME};

pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME)
        .to_string()
}

/// Reads only metadata; file contents are loaded when the form is submitted.
pub async fn selected_file_from_path(path: impl Into<PathBuf>) -> Result<SelectedFile> {
    let path = path.into();
    let metadata = tokio::fs::metadata(&path)
        .await
        .with_context(|| format!("failed to read metadata for '{}'", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("'{}' is not a regular file", path.display());
    }
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin")
        .to_string();

    Ok(SelectedFile {
        name,
        mime_type: guess_mime_type(&path),
        size_bytes: metadata.len(),
        source: FileSource::Path(path),
    })
}

pub async fn selected_files_from_paths(
    paths: impl IntoIterator<Item = PathBuf>,
) -> Result<Vec<SelectedFile>> {
    let mut files = Vec::new();
    for path in paths {
        files.push(selected_file_from_path(path).await?);
    }
    Ok(files)
}

pub async fn read_file_bytes(file: &SelectedFile) -> Result<Vec<u8>> {
    match &file.source {
        FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        FileSource::Path(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read '{}'", path.display())),
    }
}
