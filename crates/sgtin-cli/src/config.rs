//! `epcgen.toml` loading.
//!
//! Every key is optional; command-line flags override file values.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sgtin::{LabelRule, Overage};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "epcgen.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// One print template, keyed by customer and label size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub customer: String,
    pub label_size: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_per_batch: u64,
    pub labels_per_roll: u64,
    pub label_rule: LabelRule,
    pub overage: Overage,
    pub log_format: LogFormat,
    pub templates: Vec<TemplateEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_per_batch: 1000,
            labels_per_roll: 1000,
            label_rule: LabelRule::Legacy,
            overage: Overage::NONE,
            log_format: LogFormat::Compact,
            templates: Vec::new(),
        }
    }
}

impl Config {
    /// Loads `path` if given, else `epcgen.toml` when present, else defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::read(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Builds the template lookup table from the `[[templates]]` entries.
    pub fn template_table(&self) -> HashMap<(String, String), PathBuf> {
        self.templates
            .iter()
            .map(|t| ((t.customer.clone(), t.label_size.clone()), t.path.clone()))
            .collect()
    }
}
