use crate::attributes::{AttributeNames, DEFAULT_PREFIX};
use crate::breakpoints::Breakpoint;
use anyhow::{Context as _, Error};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Engine settings, usually loaded from a JSON file:
///
/// ```json
/// { "prefix": "sq", "breakpoints": [600, 900] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceConfig {
    pub prefix: String,
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            breakpoints: Vec::new(),
        }
    }
}

impl SequenceConfig {
    /// # Errors
    /// Fails on malformed JSON, unknown keys, negative breakpoints or an
    /// invalid prefix.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json).context("invalid sequence config")?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Fails if the file cannot be read, or as [`from_json_str`](Self::from_json_str).
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// # Errors
    /// Fails when the prefix cannot be used for attribute names.
    pub fn validate(&self) -> Result<(), Error> {
        AttributeNames::new(&self.prefix)?;
        Ok(())
    }
}
