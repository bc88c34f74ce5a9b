use std::{fs, io::ErrorKind, path::PathBuf};

use anyhow::Context;
use dashboard_api::SliderSettings;
use serde::Deserialize;
use tracing::warn;

pub const CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_bind: String,
    pub dataset_path: PathBuf,
    pub slider: SliderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            dataset_path: PathBuf::from("data/spacex_launch_dash.csv"),
            slider: SliderSettings::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    bind_addr: Option<String>,
    dataset_path: Option<PathBuf>,
    slider_min: Option<f64>,
    slider_max: Option<f64>,
    slider_step: Option<f64>,
}

/// Defaults, then `dashboard.toml` in the working directory, then environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let raw = match fs::read_to_string(CONFIG_FILE) {
        Ok(raw) => Some(raw),
        Err(error) if error.kind() == ErrorKind::NotFound => None,
        Err(error) => {
            return Err(error).with_context(|| format!("failed to read {CONFIG_FILE}"));
        }
    };
    resolve_settings(raw.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn resolve_settings(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        let file_cfg: FileSettings =
            toml::from_str(raw).with_context(|| format!("failed to parse {CONFIG_FILE}"))?;
        if let Some(v) = file_cfg.bind_addr {
            settings.server_bind = v;
        }
        if let Some(v) = file_cfg.dataset_path {
            settings.dataset_path = v;
        }
        if let Some(v) = file_cfg.slider_min {
            settings.slider.min = v;
        }
        if let Some(v) = file_cfg.slider_max {
            settings.slider.max = v;
        }
        if let Some(v) = file_cfg.slider_step {
            settings.slider.step = v;
        }
    }

    if let Some(v) = env("DASHBOARD_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("DASHBOARD_DATASET") {
        settings.dataset_path = PathBuf::from(v);
    }
    if let Some(v) = env("APP__DATASET_PATH") {
        settings.dataset_path = PathBuf::from(v);
    }

    if let Some(v) = parse_env_f64(&env, "APP__SLIDER_MIN") {
        settings.slider.min = v;
    }
    if let Some(v) = parse_env_f64(&env, "APP__SLIDER_MAX") {
        settings.slider.max = v;
    }
    if let Some(v) = parse_env_f64(&env, "APP__SLIDER_STEP") {
        settings.slider.step = v;
    }

    if !settings.slider.is_valid() {
        warn!(
            min = settings.slider.min,
            max = settings.slider.max,
            step = settings.slider.step,
            "invalid payload slider settings; falling back to defaults"
        );
        settings.slider = SliderSettings::default();
    }

    Ok(settings)
}

fn parse_env_f64(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<f64> {
    let raw = env(key)?;
    match raw.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(%key, value = %raw, "ignoring non-numeric environment override");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
