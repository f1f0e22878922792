//! Configuration Management Module
//!
//! File-based configuration (TOML, JSON or YAML) for the generation
//! provider, model names, listing defaults and logging, with environment
//! variable overrides and validation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_METADATA_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_ICON_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_AUDIT_MODEL: &str = "gemini-2.5-flash";

const APP_DIR: &str = "play-architect";
const ENV_REF_PREFIX: &str = "env:";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {format:?} config: {message}")]
    Parse {
        format: ConfigFormat,
        message: String,
    },

    #[error("Failed to serialize {format:?} config: {message}")]
    Serialize {
        format: ConfigFormat,
        message: String,
    },

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration file format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    #[default]
    Toml,
    Yaml,
}

impl std::str::FromStr for ConfigFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl ConfigFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        ext.parse()
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectConfig {
    pub provider: ProviderConfig,
    pub models: ModelConfig,
    pub listing: ListingDefaults,
    pub log: LogSettings,
}

/// Generation provider connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Literal key, or `env:NAME` to read it from the environment
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 60,
        }
    }
}

/// Model name per gateway operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub metadata: String,
    pub icon: String,
    pub audit: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            metadata: DEFAULT_METADATA_MODEL.to_string(),
            icon: DEFAULT_ICON_MODEL.to_string(),
            audit: DEFAULT_AUDIT_MODEL.to_string(),
        }
    }
}

/// Initial values for a new listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingDefaults {
    pub category: String,
}

impl Default for ListingDefaults {
    fn default() -> Self {
        Self {
            category: crate::listing::DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    /// Log file for the interactive shell
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Configuration manager
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    source: Option<PathBuf>,
    config: ArchitectConfig,
}

impl ConfigManager {
    /// Wrap an in-memory configuration
    pub fn new(config: ArchitectConfig) -> Self {
        Self {
            source: None,
            config,
        }
    }

    /// Load, apply environment overrides and validate
    ///
    /// Without an explicit path the first existing
    /// `<config_dir>/play-architect/config.{toml,json,yaml,yml}` is used;
    /// with none present the defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let source = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::discover(),
        };

        let mut manager = match source {
            Some(ref file) => Self::from_file(file)?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        manager.apply_env_overrides();
        manager.validate()?;
        Ok(manager)
    }

    /// Read a config file without overrides
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut manager = Self::from_str(&content, format)?;
        manager.source = Some(path.to_path_buf());
        info!("Loaded configuration from {:?}", path);
        Ok(manager)
    }

    /// Parse configuration text
    pub fn from_str(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let parse_err = |message: String| ConfigError::Parse { format, message };
        let config: ArchitectConfig = match format {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?
            }
        };
        Ok(Self::new(config))
    }

    fn discover() -> Option<PathBuf> {
        let dir = dirs::config_dir()?.join(APP_DIR);
        ["toml", "json", "yaml", "yml"]
            .iter()
            .map(|ext| dir.join("config").with_extension(ext))
            .find(|p| p.exists())
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// `API_KEY` wins over `GEMINI_API_KEY`, both win over the file. Empty
    /// values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("API_KEY").or_else(|| get("GEMINI_API_KEY")) {
            self.config.provider.api_key = Some(key);
            debug!("Applied env override for API key");
        }

        if let Some(base_url) = get("PLAY_ARCHITECT_BASE_URL") {
            self.config.provider.base_url = base_url;
            debug!("Applied env override for base URL");
        }

        let models = &mut self.config.models;
        for (var, slot) in [
            ("PLAY_ARCHITECT_METADATA_MODEL", &mut models.metadata),
            ("PLAY_ARCHITECT_ICON_MODEL", &mut models.icon),
            ("PLAY_ARCHITECT_AUDIT_MODEL", &mut models.audit),
        ] {
            if let Some(model) = get(var) {
                *slot = model;
                debug!("Applied env override {}", var);
            }
        }

        if let Some(level) = get("PLAY_ARCHITECT_LOG") {
            self.config.log.level = level;
            debug!("Applied env override for log level");
        }

        // Resolve `env:NAME` indirection last so overrides may use it too
        let resolved = match self.config.provider.api_key.as_deref() {
            Some(value) => match value.strip_prefix(ENV_REF_PREFIX) {
                Some(name) => Some(get(name.trim())),
                None => None,
            },
            None => None,
        };
        if let Some(key) = resolved {
            self.config.provider.api_key = key;
        }
    }

    /// Validate configuration
    ///
    /// A missing API key is not an error here; the gateway reports it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let provider = &self.config.provider;
        let base_url = provider.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid("provider.base_url is empty".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "provider.base_url must use http or https: {}",
                base_url
            )));
        }
        if provider.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "provider.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        let models = &self.config.models;
        for (name, model) in [
            ("metadata", &models.metadata),
            ("icon", &models.icon),
            ("audit", &models.audit),
        ] {
            if model.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("models.{} is empty", name)));
            }
        }

        Ok(())
    }

    /// Save configuration in the format implied by `path`
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let ser_err = |message: String| ConfigError::Serialize { format, message };
        let content = match format {
            ConfigFormat::Toml => {
                toml::to_string_pretty(&self.config).map_err(|e| ser_err(e.to_string()))?
            }
            ConfigFormat::Json => {
                serde_json::to_string_pretty(&self.config).map_err(|e| ser_err(e.to_string()))?
            }
            ConfigFormat::Yaml => {
                serde_yaml::to_string(&self.config).map_err(|e| ser_err(e.to_string()))?
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    pub fn config(&self) -> &ArchitectConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ArchitectConfig {
        &mut self.config
    }

    pub fn into_config(self) -> ArchitectConfig {
        self.config
    }

    /// File the configuration was read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
