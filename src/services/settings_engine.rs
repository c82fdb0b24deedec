// pwcheck Settings Engine
// Reads controller settings from the JSON file at the platform config path and
// layers the environment override on top. The controller never writes the file.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::ControllerSettings;

/// Environment variable that overrides `service.base_url`.
pub const SERVICE_URL_ENV: &str = "PWCHECK_SERVICE_URL";

/// Read-only access to the controller settings.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ControllerSettings, SettingsError>;
    fn get_settings(&self) -> &ControllerSettings;
    fn get_config_path(&self) -> &str;
}

pub struct SettingsEngine {
    config_path: String,
    settings: ControllerSettings,
}

impl SettingsEngine {
    /// `path_override` replaces `<config dir>/settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: ControllerSettings::default(),
        }
    }

    /// Loads the settings file, warning and keeping the defaults when it is
    /// unreadable or malformed.
    pub fn load_or_default(&mut self) -> &ControllerSettings {
        if let Err(e) = self.load() {
            warn!(path = %self.config_path, error = %e, "falling back to default settings");
        }
        &self.settings
    }

    /// Replaces the service base URL for this run only.
    pub fn override_service_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            info!(url = %url, "service URL overridden");
            self.settings.service.base_url = url;
        }
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.override_service_url(std::env::var(SERVICE_URL_ENV).ok());
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields the defaults. A malformed file is a
    /// serialization error and leaves the defaults in place.
    fn load(&mut self) -> Result<ControllerSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            debug!(path = %self.config_path, "no settings file, using defaults");
            self.settings = ControllerSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: ControllerSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    fn get_settings(&self) -> &ControllerSettings {
        &self.settings
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
