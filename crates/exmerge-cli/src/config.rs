//! `exmerge.toml` handling.
//!
//! Every field is optional; command-line flags override whatever the file
//! sets.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use exmerge_merge::MergeConfig;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub merge: MergeConfig,
    pub output: OutputConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory merged documents are written to when `--output` is absent.
    pub dir: PathBuf,
    /// File name prefix of generated output names.
    pub prefix: String,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            prefix: "Merged".to_string(),
            pretty: true,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or fall back to defaults when no file is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Where to write a merged document produced at `now`.
    pub fn output_path(&self, now: DateTime<Utc>, extension: &str) -> PathBuf {
        self.output.dir.join(output_name(&self.output.prefix, now, extension))
    }
}

/// `<prefix>-<UTC timestamp>.<extension>`, unique to the second.
pub fn output_name(prefix: &str, now: DateTime<Utc>, extension: &str) -> String {
    format!("{prefix}-{}.{extension}", now.format("%Y%m%dT%H%M%SZ"))
}
