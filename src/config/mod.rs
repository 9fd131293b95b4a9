//! Configuration for variant-matrix.
//!
//! Settings are read from a TOML file. The location is, in order of precedence:
//!
//! 1. The `--config` CLI flag
//! 2. The `VARIANT_MATRIX_CONFIG` environment variable
//! 3. `~/.variant-matrix/config.toml` (`%LOCALAPPDATA%\variant-matrix\config.toml` on Windows)
//!
//! A missing file is not an error; defaults are used instead.
//!
//! # Example
//!
//! ```toml
//! input_name = "variants"
//! namespace = "fields"
//! templates_dir = "templates"
//! js_class = "Craft.Commerce.VariantMatrix"
//! js_resource = "commerce/js/VariantMatrix.js"
//! translation_category = "commerce"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_PATH_ENV, DEFAULT_INPUT_NAME, DEFAULT_JS_CLASS, DEFAULT_JS_RESOURCE,
    DEFAULT_TRANSLATION_CATEGORY,
};
use crate::core::MatrixError;
use crate::matrix::MatrixSettings;
use crate::view::validate_input_name;

fn default_input_name() -> String {
    DEFAULT_INPUT_NAME.to_string()
}

fn default_js_class() -> String {
    DEFAULT_JS_CLASS.to_string()
}

fn default_js_resource() -> String {
    DEFAULT_JS_RESOURCE.to_string()
}

fn default_translation_category() -> String {
    DEFAULT_TRANSLATION_CATEGORY.to_string()
}

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixConfig {
    /// Matrix input name (sans namespace).
    #[serde(default = "default_input_name")]
    pub input_name: String,

    /// Namespace of the enclosing form, if the matrix is embedded in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Directory whose `*.html` files override or extend the built-in templates.
    ///
    /// Relative paths are resolved against the configuration file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,

    /// Client-side controller constructed by the bootstrap statement.
    #[serde(default = "default_js_class")]
    pub js_class: String,

    /// Script resource that defines the controller.
    #[serde(default = "default_js_resource")]
    pub js_resource: String,

    /// Category the UI strings are registered under.
    #[serde(default = "default_translation_category")]
    pub translation_category: String,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            input_name: default_input_name(),
            namespace: None,
            templates_dir: None,
            js_class: default_js_class(),
            js_resource: default_js_resource(),
            translation_category: default_translation_category(),
        }
    }
}

impl MatrixConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match std::env::var_os(CONFIG_PATH_ENV) {
                Some(path) => PathBuf::from(path),
                None => Self::default_path()?,
            },
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or fails validation.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        if let (Some(dir), Some(base)) = (&config.templates_dir, path.parent()) {
            if dir.is_relative() {
                config.templates_dir = Some(base.join(dir));
            }
        }

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default configuration file location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join(CONFIG_DIR_NAME.trim_start_matches('.'))
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(CONFIG_DIR_NAME)
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Reject values that cannot produce a usable widget.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ConfigError`] for an empty input name or
    /// controller class, or an input name containing brackets.
    pub fn validate(&self) -> Result<(), MatrixError> {
        validate_input_name(&self.input_name).map_err(|e| MatrixError::ConfigError {
            message: format!("input_name: {e}"),
        })?;
        if self.js_class.trim().is_empty() {
            return Err(MatrixError::ConfigError {
                message: "js_class must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Renderer settings derived from this configuration.
    #[must_use]
    pub fn settings(&self) -> MatrixSettings {
        MatrixSettings {
            js_class: self.js_class.clone(),
            js_resource: self.js_resource.clone(),
            translation_category: self.translation_category.clone(),
        }
    }
}
