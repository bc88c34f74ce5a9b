use std::{collections::HashMap, path::PathBuf};

use super::{resolve_settings, Settings};
use dashboard_api::SliderSettings;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_serve_bundled_dataset_on_8080() {
    let settings = resolve_settings(None, env_from(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.server_bind, "127.0.0.1:8080");
    assert_eq!(
        settings.dataset_path,
        PathBuf::from("data/spacex_launch_dash.csv")
    );
}

#[test]
fn file_values_override_defaults() {
    let file = r#"
bind_addr = "0.0.0.0:9000"
dataset_path = "/srv/launches.csv"
slider_max = 12000.0
slider_step = 500.0
"#;
    let settings = resolve_settings(Some(file), env_from(&[])).expect("settings");
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.dataset_path, PathBuf::from("/srv/launches.csv"));
    assert_eq!(settings.slider.max, 12_000.0);
    assert_eq!(settings.slider.step, 500.0);
    assert_eq!(settings.slider.min, 0.0);
}

#[test]
fn environment_overrides_file_and_app_prefix_wins() {
    let file = r#"bind_addr = "0.0.0.0:9000""#;
    let env = env_from(&[
        ("DASHBOARD_BIND", "127.0.0.1:7000"),
        ("APP__BIND_ADDR", "127.0.0.1:7001"),
        ("DASHBOARD_DATASET", "other.csv"),
    ]);
    let settings = resolve_settings(Some(file), env).expect("settings");
    assert_eq!(settings.server_bind, "127.0.0.1:7001");
    assert_eq!(settings.dataset_path, PathBuf::from("other.csv"));
}

#[test]
fn non_numeric_slider_override_is_ignored() {
    let env = env_from(&[("APP__SLIDER_STEP", "wide"), ("APP__SLIDER_MAX", "8000")]);
    let settings = resolve_settings(None, env).expect("settings");
    assert_eq!(settings.slider.step, 1_000.0);
    assert_eq!(settings.slider.max, 8_000.0);
}

#[test]
fn invalid_slider_falls_back_to_defaults() {
    let env = env_from(&[("APP__SLIDER_MIN", "5000"), ("APP__SLIDER_MAX", "100")]);
    let settings = resolve_settings(None, env).expect("settings");
    assert_eq!(settings.slider, SliderSettings::default());
}

#[test]
fn malformed_file_is_an_error() {
    let err = resolve_settings(Some("bind_addr = "), env_from(&[])).expect_err("should fail");
    assert!(err.to_string().contains("dashboard.toml"));

    let err = resolve_settings(Some("port = 1"), env_from(&[])).expect_err("unknown key");
    assert!(err.to_string().contains("dashboard.toml"));
}

#[test]
fn slider_step_too_fine_for_marks_falls_back_to_defaults() {
    let env = env_from(&[("APP__SLIDER_STEP", "0.001")]);
    let settings = resolve_settings(None, env).expect("settings");
    assert_eq!(settings.slider, SliderSettings::default());

    let file = "slider_step = 0.5";
    let settings = resolve_settings(Some(file), env_from(&[])).expect("settings");
    assert_eq!(settings.slider, SliderSettings::default());
}
