use std::{collections::HashMap, fs, path::Path, time::Duration};

use tracing::warn;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "video_editor.toml";
pub const DEFAULT_PROCESSING_ENDPOINT: &str = "http://localhost:8000/api/process";
pub const DEFAULT_PROGRESS_TICK_MS: u64 = 1000;
pub const DEFAULT_PROGRESS_STEP: u8 = 10;
pub const DEFAULT_PROGRESS_CEILING: u8 = 90;
const MAX_PROGRESS_CEILING: u8 = 99;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub processing_endpoint: String,
    pub progress_tick_ms: u64,
    pub progress_step: u8,
    pub progress_ceiling: u8,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            processing_endpoint: DEFAULT_PROCESSING_ENDPOINT.into(),
            progress_tick_ms: DEFAULT_PROGRESS_TICK_MS,
            progress_step: DEFAULT_PROGRESS_STEP,
            progress_ceiling: DEFAULT_PROGRESS_CEILING,
        }
    }
}

impl ClientSettings {
    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.processing_endpoint = endpoint.into();
        self.sanitized()
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !is_http_url(&self.processing_endpoint) {
            warn!(
                endpoint = %self.processing_endpoint,
                "invalid processing endpoint; using default"
            );
            self.processing_endpoint = defaults.processing_endpoint;
        }
        if self.progress_tick_ms == 0 {
            self.progress_tick_ms = defaults.progress_tick_ms;
        }
        if self.progress_step == 0 {
            self.progress_step = defaults.progress_step;
        }
        self.progress_ceiling = self.progress_ceiling.min(MAX_PROGRESS_CEILING);
        self
    }
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(DEFAULT_SETTINGS_FILE)
}

/// Defaults, then the TOML file at `path` if readable, then environment
/// overrides.
pub fn load_settings_from(path: impl AsRef<Path>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path.as_ref()) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_file_values(&mut settings, &file_cfg),
            Err(err) => warn!(
                "ignoring unreadable settings file '{}': {err}",
                path.as_ref().display()
            ),
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings.sanitized()
}

fn apply_file_values(settings: &mut ClientSettings, file_cfg: &HashMap<String, toml::Value>) {
    if let Some(v) = file_cfg.get("processing_endpoint").and_then(toml::Value::as_str) {
        settings.processing_endpoint = v.to_string();
    }
    if let Some(v) = file_cfg.get("progress_tick_ms").and_then(toml::Value::as_integer) {
        if let Ok(v) = u64::try_from(v) {
            settings.progress_tick_ms = v;
        }
    }
    if let Some(v) = file_cfg.get("progress_step").and_then(toml::Value::as_integer) {
        if let Ok(v) = u8::try_from(v) {
            settings.progress_step = v;
        }
    }
    if let Some(v) = file_cfg.get("progress_ceiling").and_then(toml::Value::as_integer) {
        if let Ok(v) = u8::try_from(v) {
            settings.progress_ceiling = v;
        }
    }
}

fn apply_env_overrides(settings: &mut ClientSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("PROCESSING_ENDPOINT") {
        settings.processing_endpoint = v;
    }
    if let Some(v) = var("APP__PROCESSING_ENDPOINT") {
        settings.processing_endpoint = v;
    }

    if let Some(v) = var("APP__PROGRESS_TICK_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.progress_tick_ms = parsed;
        }
    }
    if let Some(v) = var("APP__PROGRESS_STEP") {
        if let Ok(parsed) = v.parse::<u8>() {
            settings.progress_step = parsed;
        }
    }
    if let Some(v) = var("APP__PROGRESS_CEILING") {
        if let Ok(parsed) = v.parse::<u8>() {
            settings.progress_ceiling = parsed;
        }
    }
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
