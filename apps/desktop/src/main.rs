use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{
    load_settings, load_settings_from, selected_file_from_path, selected_files_from_paths,
    SubmitOutcome, UploadController,
};
use shared::format::human_readable_bytes;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Upload a screenplay and its raw clips for automatic scene assembly.
#[derive(Parser, Debug)]
struct Args {
    /// Screenplay file (.txt or .fountain).
    #[arg(long)]
    script: PathBuf,
    /// Video clip; repeat for every clip, in upload order.
    #[arg(long = "video", required = true)]
    videos: Vec<PathBuf>,
    /// Processing endpoint, overriding the settings file and environment.
    #[arg(long)]
    endpoint: Option<String>,
    /// Settings file to read instead of ./video_editor.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the full response payload as JSON on success.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    };
    if let Some(endpoint) = args.endpoint {
        settings = settings.with_endpoint(endpoint);
    }
    let controller = UploadController::with_http_backend(settings);

    let script = selected_file_from_path(&args.script).await?;
    controller.select_script(script).await?;

    let videos = selected_files_from_paths(args.videos)
        .await
        .context("failed to read video selection")?;
    let offered = videos.len();
    let accepted = controller.select_videos(videos).await?;
    if accepted < offered {
        println!("Skipped {} file(s) that are not videos.", offered - accepted);
    }

    let form = controller.snapshot().await;
    if let Some(script) = form.script() {
        let format = script.extension().unwrap_or_else(|| script.mime_type.clone());
        println!(
            "Script: {} [{format}, {}]",
            script.name,
            human_readable_bytes(script.size_bytes)
        );
    }
    for (index, video) in form.videos().iter().enumerate() {
        println!(
            "Video {}: {} ({})",
            index + 1,
            video.name,
            human_readable_bytes(video.size_bytes)
        );
    }
    println!("Sending to {}", controller.settings().processing_endpoint);

    let mut updates = controller.subscribe();
    let printer = tokio::spawn(async move {
        let mut last_progress = None;
        while updates.changed().await.is_ok() {
            let (submitting, progress, caption) = {
                let form = updates.borrow_and_update();
                (form.is_submitting(), form.progress(), form.progress_caption())
            };
            if !submitting {
                break;
            }
            if last_progress != Some(progress) {
                println!("[{progress:>3}%] {caption}");
                last_progress = Some(progress);
            }
        }
    });

    let outcome = controller.submit().await;
    printer.abort();

    let form = controller.snapshot().await;
    match (outcome, form.result()) {
        (SubmitOutcome::Succeeded, Some(result)) => {
            println!("Processing complete!");
            println!(
                "Matched {} scenes from your script.",
                result.matched_scenes()
            );
            println!("Download: {}", result.download_url());
            if args.json {
                println!("{}", serde_json::to_string_pretty(result)?);
            }
            Ok(())
        }
        _ => {
            let message = form
                .error()
                .map(ToString::to_string)
                .unwrap_or_else(|| format!("submission ended as {outcome:?}"));
            Err(anyhow!(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn videos_repeat_in_order_and_logs_default_to_info() {
        let args = Args::try_parse_from([
            "desktop",
            "--script",
            "pilot.fountain",
            "--video",
            "a.mp4",
            "--video",
            "b.mov",
        ])
        .expect("args");
        assert_eq!(args.videos, vec![PathBuf::from("a.mp4"), PathBuf::from("b.mov")]);
        assert!(Args::try_parse_from(["desktop", "--script", "pilot.fountain"]).is_err());
        assert_eq!(DEFAULT_LOG_FILTER, "info");
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }
}
