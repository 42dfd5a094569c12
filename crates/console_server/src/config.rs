use std::{fs, time::Duration};

use console_core::DisplayZone;
use serde::Deserialize;
use tracing::warn;

pub const CONFIG_FILE: &str = "console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub api_url: String,
    pub display_utc: bool,
    pub request_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8220".into(),
            api_url: "http://127.0.0.1:8221".into(),
            display_utc: false,
            request_timeout_ms: 5_000,
        }
    }
}

impl Settings {
    pub fn display_zone(&self) -> DisplayZone {
        if self.display_utc {
            DisplayZone::Utc
        } else {
            DisplayZone::Local
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(1))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    api_url: Option<String>,
    display_utc: Option<bool>,
    request_timeout_ms: Option<u64>,
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings.api_url = normalize_api_url(&settings.api_url);
    settings
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(cfg) => cfg,
        Err(error) => {
            warn!(file = CONFIG_FILE, %error, "ignoring unreadable config file");
            return;
        }
    };

    if let Some(v) = file_cfg.bind_addr {
        settings.bind_addr = v;
    }
    if let Some(v) = file_cfg.api_url {
        settings.api_url = v;
    }
    if let Some(v) = file_cfg.display_utc {
        settings.display_utc = v;
    }
    if let Some(v) = file_cfg.request_timeout_ms {
        settings.request_timeout_ms = v;
    }
}

/// Later keys in each list win.
pub(crate) fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    for key in ["CONSOLE_BIND", "APP__BIND_ADDR"] {
        if let Some(v) = var(key) {
            settings.bind_addr = v;
        }
    }

    for key in ["CONSOLE_API_URL", "APP__API_URL"] {
        if let Some(v) = var(key) {
            settings.api_url = v;
        }
    }

    if let Some(v) = var("APP__DISPLAY_UTC") {
        match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => settings.display_utc = true,
            "0" | "false" | "no" => settings.display_utc = false,
            _ => warn!(value = %v, "ignoring invalid APP__DISPLAY_UTC"),
        }
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_MS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid APP__REQUEST_TIMEOUT_MS"),
        }
    }
}

pub(crate) fn normalize_api_url(raw_api_url: &str) -> String {
    let raw_api_url = raw_api_url.trim();

    if raw_api_url.is_empty() {
        return Settings::default().api_url;
    }

    if raw_api_url.contains("://") {
        return raw_api_url.to_string();
    }

    format!("http://{raw_api_url}")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
