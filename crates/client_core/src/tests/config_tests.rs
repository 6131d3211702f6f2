use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("video_editor_settings_{suffix}.toml"));
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_match_reference_ticker() {
    let settings = ClientSettings::default();
    assert_eq!(settings.processing_endpoint, "http://localhost:8000/api/process");
    assert_eq!(settings.progress_tick(), Duration::from_millis(1000));
    assert_eq!(settings.progress_step, 10);
    assert_eq!(settings.progress_ceiling, 90);
}

#[test]
fn missing_file_yields_defaults() {
    let settings = load_settings_from("/definitely/not/here/video_editor.toml");
    assert_eq!(settings.progress_step, DEFAULT_PROGRESS_STEP);
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        r#"
processing_endpoint = "https://render.example.com/api/process"
progress_tick_ms = 250
progress_step = 5
"#,
    );
    let mut settings = ClientSettings::default();
    let raw = fs::read_to_string(&path).expect("read");
    let file_cfg: HashMap<String, toml::Value> = toml::from_str(&raw).expect("toml");
    apply_file_values(&mut settings, &file_cfg);
    let settings = settings.sanitized();

    assert_eq!(
        settings.processing_endpoint,
        "https://render.example.com/api/process"
    );
    assert_eq!(settings.progress_tick_ms, 250);
    assert_eq!(settings.progress_step, 5);
    assert_eq!(settings.progress_ceiling, 90);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn later_env_keys_win() {
    let mut settings = ClientSettings::default();
    apply_env_overrides(&mut settings, |key| match key {
        "PROCESSING_ENDPOINT" => Some("http://first:1/api/process".to_string()),
        "APP__PROCESSING_ENDPOINT" => Some("http://second:2/api/process".to_string()),
        "APP__PROGRESS_CEILING" => Some("80".to_string()),
        "APP__PROGRESS_STEP" => Some("not-a-number".to_string()),
        _ => None,
    });
    assert_eq!(settings.processing_endpoint, "http://second:2/api/process");
    assert_eq!(settings.progress_ceiling, 80);
    assert_eq!(settings.progress_step, DEFAULT_PROGRESS_STEP);
}

#[test]
fn sanitizing_rejects_bad_values() {
    let settings = ClientSettings {
        processing_endpoint: "ftp://files.example.com/upload".to_string(),
        progress_tick_ms: 0,
        progress_step: 0,
        progress_ceiling: 100,
    }
    .sanitized();

    assert_eq!(settings.processing_endpoint, DEFAULT_PROCESSING_ENDPOINT);
    assert_eq!(settings.progress_tick_ms, DEFAULT_PROGRESS_TICK_MS);
    assert_eq!(settings.progress_step, DEFAULT_PROGRESS_STEP);
    assert_eq!(settings.progress_ceiling, 99);
}

#[test]
fn endpoint_override_is_validated() {
    let settings = ClientSettings::default().with_endpoint("not a url");
    assert_eq!(settings.processing_endpoint, DEFAULT_PROCESSING_ENDPOINT);

    let settings = ClientSettings::default().with_endpoint("http://127.0.0.1:9000/api/process");
    assert_eq!(settings.processing_endpoint, "http://127.0.0.1:9000/api/process");
}
