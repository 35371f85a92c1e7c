use std::{collections::HashMap, fs, path::PathBuf, time::Duration};

use tracing::warn;

use crate::handler::DEFAULT_HIDE_DELAY;

pub const SETTINGS_FILE: &str = "recipe_client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub token_path: PathBuf,
    pub notification_hide: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            token_path: PathBuf::from("./data/client_storage.json"),
            notification_hide: DEFAULT_HIDE_DELAY,
        }
    }
}

/// Defaults, then `recipe_client.toml` in the working directory, then
/// environment variables.
pub fn load_settings() -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw);
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut ClientSettings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, toml::Value>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(error = %err, file = SETTINGS_FILE, "ignoring malformed settings file");
            return;
        }
    };

    if let Some(v) = file_cfg.get("server_url").and_then(toml::Value::as_str) {
        settings.server_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("token_path").and_then(toml::Value::as_str) {
        settings.token_path = PathBuf::from(v);
    }
    if let Some(v) = file_cfg
        .get("notification_hide_ms")
        .and_then(toml::Value::as_integer)
        .and_then(|ms| u64::try_from(ms).ok())
    {
        settings.notification_hide = Duration::from_millis(v);
    }
}

fn apply_env(settings: &mut ClientSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("RECIPE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("RECIPE_TOKEN_PATH") {
        settings.token_path = PathBuf::from(v);
    }
    if let Some(v) = var("APP__TOKEN_PATH") {
        settings.token_path = PathBuf::from(v);
    }

    if let Some(v) = var("APP__NOTIFICATION_HIDE_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.notification_hide = Duration::from_millis(parsed);
        }
    }
}
