//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Table formatting styles understood by the Polars table renderer
pub const TABLE_FORMATTINGS: &[&str] = &[
    "ASCII_FULL",
    "ASCII_FULL_CONDENSED",
    "ASCII_NO_BORDERS",
    "ASCII_BORDERS_ONLY",
    "ASCII_BORDERS_ONLY_CONDENSED",
    "ASCII_HORIZONTAL_ONLY",
    "ASCII_MARKDOWN",
    "MARKDOWN",
    "UTF8_FULL",
    "UTF8_FULL_CONDENSED",
    "UTF8_NO_BORDERS",
    "UTF8_BORDERS_ONLY",
    "UTF8_HORIZONTAL_ONLY",
    "NOTHING",
];

const DEFAULT_TABLE_FORMATTING: &str = "UTF8_FULL_CONDENSED";
const DEFAULT_FULL_STR_LEN: usize = 300;
const DEFAULT_GLIMPSE_MAX_ITEMS: usize = 15;

/// Errors raised while loading configuration
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("Config file not found: {}", path.display())]
    #[diagnostic(code(pqview::config::not_found))]
    NotFound { path: PathBuf },

    #[error("Could not read config file {}", path.display())]
    #[diagnostic(code(pqview::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}", path.display())]
    #[diagnostic(code(pqview::config::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error(
        "Unknown table formatting style: {value} (expected one of: {})",
        TABLE_FORMATTINGS.join(", ")
    )]
    #[diagnostic(code(pqview::config::table_formatting))]
    UnknownFormatting { value: String },
}

/// pqview configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Table border style passed to the renderer
    pub table_formatting: Option<String>,

    /// String truncation length for the bounded presets (engine default when unset)
    pub str_len: Option<usize>,

    /// String truncation length when showing everything
    pub full_str_len: Option<usize>,

    /// Values shown per column by `glimpse`
    pub glimpse_max_items: Option<usize>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// `explicit` is the file named by `--config` / `PQVIEW_CONFIG`; when given
    /// it replaces the global config file and must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // 1. Built-in defaults (applied by the accessors)

        // 2. Config file
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound {
                        path: path.to_path_buf(),
                    });
                }
                config.merge(Self::from_file(path)?);
            }
            None => {
                if let Some(global_path) = Self::global_config_path() {
                    if global_path.exists() {
                        config.merge(Self::from_file(&global_path)?);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(formatting) = std::env::var("PQVIEW_TABLE_FORMATTING") {
            config.table_formatting = Some(formatting);
        }

        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Parse a single YAML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_yaml(contents: &str) -> Result<Self, serde_yml::Error> {
        // An empty file deserializes to unit, not a mapping
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(contents)
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "pqview")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.table_formatting.is_some() {
            self.table_formatting = other.table_formatting;
        }
        if other.str_len.is_some() {
            self.str_len = other.str_len;
        }
        if other.full_str_len.is_some() {
            self.full_str_len = other.full_str_len;
        }
        if other.glimpse_max_items.is_some() {
            self.glimpse_max_items = other.glimpse_max_items;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match &self.table_formatting {
            Some(value) if !TABLE_FORMATTINGS.contains(&value.as_str()) => {
                Err(ConfigError::UnknownFormatting {
                    value: value.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    pub fn table_formatting(&self) -> &str {
        self.table_formatting
            .as_deref()
            .unwrap_or(DEFAULT_TABLE_FORMATTING)
    }

    pub fn full_str_len(&self) -> usize {
        self.full_str_len.unwrap_or(DEFAULT_FULL_STR_LEN)
    }

    pub fn glimpse_max_items(&self) -> usize {
        self.glimpse_max_items.unwrap_or(DEFAULT_GLIMPSE_MAX_ITEMS)
    }
}
