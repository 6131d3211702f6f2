use std::time::Duration;

use client_core::UploadForm;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::{Color32, RichText};
use shared::{
    error::{ErrorCode, FormError},
    format::human_readable_bytes,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiErrorCategory, UiEvent},
    orchestration::dispatch_backend_command,
};

const SCRIPT_EXTENSIONS: &[&str] = &["txt", "fountain"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "webm", "mkv", "avi", "mpeg", "mpg"];

const ACCENT: Color32 = Color32::from_rgb(196, 181, 253);
const SUCCESS: Color32 = Color32::from_rgb(134, 239, 172);
const DANGER: Color32 = Color32::from_rgb(252, 165, 165);
const WARNING: Color32 = Color32::from_rgb(253, 224, 71);

/// Text colour and background tint for the banner: amber for input problems,
/// red when the processing call itself failed.
fn banner_palette(err: &FormError) -> (Color32, Color32) {
    match err.code() {
        ErrorCode::Validation => (WARNING, Color32::from_rgba_unmultiplied(234, 179, 8, 40)),
        ErrorCode::Transport => (DANGER, Color32::from_rgba_unmultiplied(239, 68, 68, 40)),
    }
}

pub struct VideoEditorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    form: UploadForm,
    status: Option<String>,
    backend_down: bool,
}

impl VideoEditorApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: UploadForm::new(),
            status: None,
            backend_down: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::FormUpdated(form) => self.form = form,
                UiEvent::Info(message) => self.status = Some(message),
                UiEvent::Error(err) => {
                    if err.category() == UiErrorCategory::Transport {
                        self.backend_down = true;
                    }
                    self.status = Some(err.display_text());
                }
            }
        }
    }

    fn send(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn show_header(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new("AI Video Editor").size(32.0).strong());
            ui.label(
                RichText::new(
                    "Upload your script and video scenes - AI will automatically arrange them",
                )
                .color(ACCENT),
            );
        });
    }

    fn show_script_panel(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading("Script File");
            if ui.button("Click to upload script").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Screenplay", SCRIPT_EXTENSIONS)
                    .pick_file()
                {
                    self.send(BackendCommand::SelectScript { path });
                }
            }
            ui.label(RichText::new(".txt or .fountain format").small().color(ACCENT));

            let script_name = self.form.script().map(|script| script.name.clone());
            if let Some(name) = script_name {
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("✔ {name}")).color(SUCCESS));
                    if ui.small_button("Remove").clicked() {
                        self.send(BackendCommand::ClearScript);
                    }
                });
            }
        });
    }

    fn show_video_panel(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading("Video Scenes");
            if ui.button("Click to upload videos").clicked() {
                if let Some(paths) = rfd::FileDialog::new()
                    .add_filter("Video", VIDEO_EXTENSIONS)
                    .pick_files()
                {
                    if !paths.is_empty() {
                        self.send(BackendCommand::SelectVideos { paths });
                    }
                }
            }
            ui.label(RichText::new("Multiple files supported").small().color(ACCENT));

            if self.form.videos().is_empty() {
                return;
            }
            ui.separator();
            let mut remove_index = None;
            egui::ScrollArea::vertical()
                .max_height(192.0)
                .show(ui, |ui| {
                    for (index, video) in self.form.videos().iter().enumerate() {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(video.name.as_str());
                                ui.label(
                                    RichText::new(human_readable_bytes(video.size_bytes))
                                        .small()
                                        .color(ACCENT),
                                );
                            });
                            if ui.small_button("Remove").clicked() {
                                remove_index = Some(index);
                            }
                        });
                    }
                });
            if let Some(index) = remove_index {
                self.send(BackendCommand::RemoveVideo { index });
            }
        });
    }

    fn show_error_banner(&self, ui: &mut egui::Ui) {
        if let Some(err) = self.form.error() {
            let (text, fill) = banner_palette(err);
            egui::Frame::group(ui.style()).fill(fill).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(format!("⚠ {err}")).color(text));
            });
        }
    }

    fn show_submit_button(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let label = if self.form.is_submitting() {
                "Processing..."
            } else {
                "Process & Generate Video"
            };
            let enabled = self.form.can_submit() && !self.backend_down;
            let button = egui::Button::new(RichText::new(label).size(18.0).strong());
            if ui.add_enabled(enabled, button).clicked() {
                self.send(BackendCommand::Submit);
            }
        });
    }

    fn show_progress(&self, ui: &mut egui::Ui) {
        if !self.form.is_submitting() {
            return;
        }
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Processing Progress");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(format!("{}%", self.form.progress())).color(ACCENT));
                });
            });
            ui.add(egui::ProgressBar::new(f32::from(self.form.progress()) / 100.0));
            ui.label(RichText::new(self.form.progress_caption()).small().color(ACCENT));
        });
    }

    fn show_result(&mut self, ui: &mut egui::Ui) {
        let Some(result) = self.form.result() else {
            return;
        };
        let matched = result.matched_scenes();
        let download_url = result.download_url().to_string();

        let mut start_over = false;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading(RichText::new("Processing Complete!").color(SUCCESS));
            ui.label("Your video has been successfully processed.");
            ui.label(
                RichText::new(format!("Matched {matched} scenes from your script."))
                    .color(ACCENT),
            );
            ui.horizontal(|ui| {
                ui.hyperlink_to("▶ Download Final Video", &download_url);
                if ui.button("Start New Project").clicked() {
                    start_over = true;
                }
            });
        });
        if start_over {
            self.send(BackendCommand::StartNewProject);
        }
    }

    fn show_info(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("How It Works").strong());
            ui.columns(3, |cols| {
                cols[0].label(RichText::new("1. Upload Script").strong());
                cols[0].label("Upload your screenplay in .txt or .fountain format");
                cols[1].label(RichText::new("2. Upload Scenes").strong());
                cols[1].label("Add all raw video clips from your film");
                cols[2].label(RichText::new("3. AI Processing").strong());
                cols[2].label("Our AI matches and arranges scenes automatically");
            });
        });
    }
}

impl eframe::App for VideoEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        if let Some(status) = &self.status {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.label(RichText::new(status).small());
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_header(ui);
                ui.add_space(16.0);
                ui.columns(2, |cols| {
                    self.show_script_panel(&mut cols[0]);
                    self.show_video_panel(&mut cols[1]);
                });
                ui.add_space(12.0);
                self.show_error_banner(ui);
                ui.add_space(12.0);
                self.show_submit_button(ui);
                ui.add_space(12.0);
                self.show_progress(ui);
                self.show_result(ui);
                ui.add_space(16.0);
                self.show_info(ui);
            });
        });

        if self.form.is_submitting() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
