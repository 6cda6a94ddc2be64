use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Unit used for the route distance label.
///
/// The routing service always reports meters; which unit the view shows
/// is a presentation decision made by the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Miles,
    Kilometers,
}

/// Application configuration.
///
/// API keys and addresses are never compiled into the binary: they come
/// from the config file, with environment overrides for the secrets
/// (`COMMUTE_GOOGLE_API_KEY`, `COMMUTE_OPENWEATHER_API_KEY`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API key for the geocoding and routing services
    pub google_api_key: String,

    /// API key for the weather service
    pub openweather_api_key: String,

    /// Free-text home address, resolved by the geocoder
    pub home_address: String,

    /// Free-text work address, resolved by the geocoder
    pub work_address: String,

    /// Unit for the distance label in the composed view
    #[serde(default)]
    pub distance_unit: DistanceUnit,

    /// Per-call HTTP timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: "YOUR_GOOGLE_API_KEY".to_string(),
            openweather_api_key: "YOUR_OPENWEATHER_API_KEY".to_string(),
            home_address: String::new(),
            work_address: String::new(),
            distance_unit: DistanceUnit::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load a config from a specific path, with env overrides applied.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).context("Failed to read config file")?;
        let mut config: Config =
            toml::from_str(&contents).context("Failed to parse config file")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Write the config back to its default path.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("commute");
        Ok(dir.join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("COMMUTE_GOOGLE_API_KEY") {
            self.google_api_key = key;
        }
        if let Ok(key) = std::env::var("COMMUTE_OPENWEATHER_API_KEY") {
            self.openweather_api_key = key;
        }
    }

    /// Validate the configuration.
    ///
    /// Placeholder API keys and missing addresses are errors; a zero
    /// timeout is a warning (reqwest treats it as no timeout).
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.google_api_key.is_empty() || self.google_api_key.starts_with("YOUR_") {
            result.add_error("google_api_key", "not configured");
        }
        if self.openweather_api_key.is_empty() || self.openweather_api_key.starts_with("YOUR_") {
            result.add_error("openweather_api_key", "not configured");
        }
        if self.home_address.trim().is_empty() {
            result.add_error("home_address", "must not be empty");
        }
        if self.work_address.trim().is_empty() {
            result.add_error("work_address", "must not be empty");
        }
        if self.request_timeout_secs == 0 {
            result.add_warning("request_timeout_secs", "zero disables the HTTP timeout");
        }

        result
    }
}
