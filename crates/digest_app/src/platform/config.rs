use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use digest_engine::{
    FetchSettings, InferenceSettings, DEFAULT_CLASSIFIER_MODEL, DEFAULT_INFERENCE_URL,
    DEFAULT_SUMMARY_MODEL,
};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "digest.ron";

const ENV_API_TOKEN: &str = "HF_API_TOKEN";
const ENV_INFERENCE_URL: &str = "DIGEST_INFERENCE_URL";
const ENV_LOG_LEVEL: &str = "DIGEST_LOG_LEVEL";

/// Settings read from `digest.ron`, every field optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_destination: LogDestination,
    pub inference_url: String,
    pub api_token: Option<String>,
    pub summary_model: String,
    pub classifier_model: String,
    pub fetch_timeout_secs: Option<u64>,
    pub inference_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_destination: LogDestination::Terminal,
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            api_token: None,
            summary_model: DEFAULT_SUMMARY_MODEL.to_string(),
            classifier_model: DEFAULT_CLASSIFIER_MODEL.to_string(),
            fetch_timeout_secs: None,
            inference_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Loads `path` if it exists; a missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()));
            }
        };
        ron::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Environment values win over the file.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.is_empty()) {
            self.api_token = Some(token);
        }
        if let Some(url) = lookup(ENV_INFERENCE_URL).filter(|v| !v.is_empty()) {
            self.inference_url = url;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
        self
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: self.fetch_timeout_secs.map(Duration::from_secs),
            ..FetchSettings::default()
        }
    }

    pub fn inference_settings(&self) -> InferenceSettings {
        InferenceSettings {
            base_url: self.inference_url.clone(),
            api_token: self.api_token.clone(),
            summary_model: self.summary_model.clone(),
            classifier_model: self.classifier_model.clone(),
            request_timeout: self.inference_timeout_secs.map(Duration::from_secs),
        }
    }
}
