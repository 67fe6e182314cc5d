//! Configuration for the compiler tools.
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (godecl.toml)
//! - Environment variables (GODECL_*)
//!
//! ## Example config file (godecl.toml):
//! ```toml
//! [schemas]
//! path = "./schemas"
//!
//! [output]
//! dir = "./gen"
//! format = "pretty"
//! include_fingerprint = true
//!
//! [suggestions]
//! enabled = true
//! limit = 3
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the compiler tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Schema discovery settings
    #[serde(default)]
    pub schemas: SchemasConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// "Did you mean" hints for unknown type names
    #[serde(default)]
    pub suggestions: SuggestionConfig,
}

/// Schema discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemasConfig {
    /// Root directory schema documents are discovered under
    #[serde(default = "default_schemas_path")]
    pub path: PathBuf,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory generated Go files are written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// JSON report format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,

    /// Include the source fingerprint in reports
    #[serde(default = "default_true")]
    pub include_fingerprint: bool,
}

/// Output format for JSON reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

/// Suggestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Print hints next to type-not-found findings
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum hints per finding
    #[serde(default = "default_suggestion_limit")]
    pub limit: usize,
}

// Default value functions
fn default_schemas_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("gen")
}

fn default_true() -> bool {
    true
}

fn default_suggestion_limit() -> usize {
    3
}

impl Default for SchemasConfig {
    fn default() -> Self {
        Self {
            path: default_schemas_path(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: OutputFormat::Pretty,
            include_fingerprint: true,
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: default_suggestion_limit(),
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            schemas: SchemasConfig::default(),
            output: OutputConfig::default(),
            suggestions: SuggestionConfig::default(),
        }
    }
}

impl CompilerConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["godecl.toml", ".godecl.toml", "config/godecl.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "godecl", "godecl") {
            let xdg_config = config_dir.config_dir().join("godecl.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (GODECL_*)
        builder = builder.add_source(
            Environment::with_prefix("GODECL")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the schema root (resolves relative paths)
    pub fn schemas_path(&self) -> PathBuf {
        if self.schemas.path.is_absolute() {
            self.schemas.path.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.schemas.path)
        }
    }
}
