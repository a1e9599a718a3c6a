//! Estimation config loading.
//!
//! Source layering (defaults are not baked in: the document is authoritative)
//! follows the builder pattern: an optional JSON file, an optional inline
//! JSON document, and optional `ENERMATCH_*` environment overrides. Whatever
//! the sources produce is shape-checked once by [`super::validator`]; the
//! loader never auto-reloads — refreshing on change is the caller's job.

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

use super::types::EstimationConfig;
use super::validator::validate_document;
use crate::error::{EngineError, Result};

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    inline_json: Option<String>,
    load_env: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            config_file: None,
            inline_json: None,
            load_env: false,
        }
    }

    /// Load the config document from a JSON file
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Layer an inline JSON document (e.g. fetched from a config service)
    pub fn with_json(mut self, json: impl Into<String>) -> Self {
        self.inline_json = Some(json.into());
        self
    }

    /// Layer `ENERMATCH_*` environment variable overrides
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Build, shape-check, and return the final configuration
    pub fn load(self) -> Result<EstimationConfig> {
        let mut builder = Config::builder();

        if let Some(path) = &self.config_file {
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Json)
                    .required(true),
            );
        }

        if let Some(json) = &self.inline_json {
            builder = builder.add_source(File::from_str(json, FileFormat::Json));
        }

        if self.load_env {
            builder = builder.add_source(
                Environment::with_prefix("ENERMATCH")
                    .prefix_separator("_")
                    .separator("__")
                    // Env values arrive as strings; parse them so numeric
                    // overrides stay numeric through validation.
                    .try_parsing(true),
            );
        }

        let raw: Value = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .context("failed to assemble estimation config sources")
            .map_err(|e| EngineError::ConfigSource(format!("{e:#}")))?;

        let config = validate_document(&raw)?;
        info!(
            version = %config.version,
            categories = config.categories.len(),
            "estimation config loaded"
        );
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimationConfig {
    /// Validate a config document already parsed to JSON
    pub fn from_value(doc: &Value) -> Result<Self> {
        Ok(validate_document(doc)?)
    }

    /// Parse and validate a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(json)?;
        Self::from_value(&doc)
    }
}
