use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "cms_admin";
const DEFAULT_API_BASE_URL: &str = "https://api.admin.pixeladvant.com/api/";
const DEFAULT_BLOG_COLLECTION: &str = "blogs/";
const DEFAULT_TIMEOUT_SECS: i64 = 30;
const DEFAULT_SETTINGS_PATH: &str = "data/site_settings.json";

/// Runtime settings: defaults, then `cms_admin.toml` (or `--config`), then `CMS_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub blog_collection: String,
    pub request_timeout_secs: u64,
    pub settings_path: PathBuf,
}

impl AppConfig {
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("blog_collection", DEFAULT_BLOG_COLLECTION)?
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("settings_path", DEFAULT_SETTINGS_PATH)?;

        let builder = match file {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder
            .add_source(Environment::with_prefix("CMS"))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
