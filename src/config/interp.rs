//! Interpolator configuration (interp.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default element name rendered in place of a failed placeholder
pub const DEFAULT_ERROR_TAG: &str = "oppia-expression-error-tag";

/// Interpolator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpolatorConfig {
    /// Element name of the marker emitted for failed placeholders in HTML mode
    pub error_tag: String,
    /// Decode HTML entities in placeholder bodies before parsing (HTML mode
    /// and parameter extraction only)
    pub decode_entities: bool,
}

impl Default for InterpolatorConfig {
    fn default() -> Self {
        Self {
            error_tag: DEFAULT_ERROR_TAG.to_string(),
            decode_entities: true,
        }
    }
}

impl InterpolatorConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: InterpolatorConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;

        if config.error_tag.is_empty()
            || !config
                .error_tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            anyhow::bail!("Invalid error_tag {:?} in {:?}", config.error_tag, path);
        }

        tracing::debug!("Loaded interpolator config from {:?}", path);
        Ok(config)
    }

    /// The literal markup inserted for a failed placeholder
    pub fn error_marker(&self) -> String {
        format!("<{0}></{0}>", self.error_tag)
    }
}
