//! Configuration for snippet generation.
//!
//! The configuration lists the snippet targets a host should offer and the
//! output format the command line tool prints. It can be loaded from a YAML
//! file or created programmatically.
//!
//! # Examples
//!
//! ```no_run
//! use snippets_core::config::{Config, OutputFormat};
//! use serde_json::json;
//!
//! let mut config = Config::new(vec![json!({ "target": "node_axios" })]);
//! config.format = OutputFormat::Json;
//!
//! # async fn load() -> snippets_core::Result<()> {
//! let config = Config::from_file("snippets.yaml").await?;
//! let targets = config.target_specs()?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::{fmt, path::Path, str::FromStr};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tokio::fs;

use crate::{target::TargetSpec, Error};

/// How generated snippets are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Each snippet under a title line
    #[default]
    Text,
    /// The snippet bundle as JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::config(format!("Unknown output format: {}", s))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snippet generation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Raw target declarations, validated by [`Config::target_specs`]
    #[serde(default)]
    pub targets: Vec<JsonValue>,

    /// Output format for printed snippets
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    /// Create a new Config with the given targets and text output
    pub fn new(targets: Vec<JsonValue>) -> Self {
        Self {
            targets,
            format: OutputFormat::default(),
        }
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Validate every configured target
    pub fn target_specs(&self) -> crate::Result<Vec<TargetSpec>> {
        self.targets.iter().map(TargetSpec::normalize).collect()
    }
}
