use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::SettingsError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
pub const DEFAULT_SETTINGS_FILE: &str = "dashboard.toml";
pub const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DashboardSettings {
    pub api_base: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
        }
    }
}

impl DashboardSettings {
    /// Defaults, then `dashboard.toml` if present, then `DASHBOARD_*` env.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(Path::new(DEFAULT_SETTINGS_FILE))
    }

    pub fn load_from(file: &Path) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .set_default("api_base", DEFAULT_API_BASE)?
            .add_source(File::from(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn with_api_base(mut self, api_base: Option<String>) -> Self {
        if let Some(api_base) = api_base {
            self.api_base = api_base;
        }
        self
    }
}
