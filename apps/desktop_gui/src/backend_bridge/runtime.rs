//! Backend worker: owns the tokio runtime and the upload controller, applies
//! queued UI commands and streams form snapshots back to the UI.

use std::thread;

use client_core::{
    selected_file_from_path, selected_files_from_paths, ClientSettings, SubmitOutcome,
    UploadController,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build backend runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let controller = UploadController::with_http_backend(settings);
            spawn_snapshot_forwarder(&controller, ui_tx.clone());
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Ready; processing endpoint {}",
                controller.settings().processing_endpoint
            )));

            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(&controller, &ui_tx, cmd).await;
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

fn spawn_snapshot_forwarder(controller: &UploadController, ui_tx: Sender<UiEvent>) {
    let mut updates = controller.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let form = updates.borrow_and_update().clone();
            match ui_tx.try_send(UiEvent::FormUpdated(form)) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::warn!("ui event queue full; dropped form snapshot");
                }
                Err(TrySendError::Disconnected(_)) => break,
            }
        }
    });
}

async fn handle_command(controller: &UploadController, ui_tx: &Sender<UiEvent>, cmd: BackendCommand) {
    match cmd {
        BackendCommand::SelectScript { path } => match selected_file_from_path(path).await {
            Ok(file) => {
                // Rejections land in the form's error banner via the snapshot.
                let _ = controller.select_script(file).await;
            }
            Err(err) => send_error(ui_tx, UiErrorContext::ScriptSelection, format!("{err:#}")),
        },
        BackendCommand::SelectVideos { paths } => match selected_files_from_paths(paths).await {
            Ok(files) => {
                let _ = controller.select_videos(files).await;
            }
            Err(err) => send_error(ui_tx, UiErrorContext::VideoSelection, format!("{err:#}")),
        },
        BackendCommand::RemoveVideo { index } => {
            controller.remove_video(index).await;
        }
        BackendCommand::ClearScript => controller.clear_script().await,
        BackendCommand::StartNewProject => controller.start_new_project().await,
        BackendCommand::Submit => {
            let controller = controller.clone();
            tokio::spawn(async move {
                let outcome = controller.submit().await;
                if outcome == SubmitOutcome::AlreadyInFlight {
                    tracing::debug!("ignored submit; processing already running");
                }
            });
        }
    }
}

fn send_error(ui_tx: &Sender<UiEvent>, context: UiErrorContext, message: String) {
    tracing::warn!(?context, "{message}");
    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(context, message)));
}
