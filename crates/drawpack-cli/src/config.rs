//! Run configuration: an optional TOML file merged with command-line flags.
//!
//! ```toml
//! mode = "po"
//! strip_segments = ["Export", "Released"]
//! include_unclassified = true
//! mail_template = "templates/rfq.txt"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use drawpack_model::{ClassificationOptions, Mode};
use serde::{Deserialize, Deserializer};

/// Defaults read from `--config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    #[serde(deserialize_with = "deserialize_mode")]
    pub mode: Option<Mode>,
    pub strip_segments: Vec<String>,
    pub include_unclassified: Option<bool>,
    pub mail_template: Option<PathBuf>,
}

/// Values given on the command line; unset fields fall back to the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagOverrides {
    pub mode: Option<Mode>,
    pub root: Option<String>,
    pub strip_segments: Vec<String>,
    pub include_unclassified: bool,
    pub mail_template: Option<PathBuf>,
}

/// Reads a config file; a missing `path` yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parse config {}", path.display()))
}

/// Parses config file contents.
pub fn parse_config(contents: &str) -> Result<FileConfig> {
    Ok(toml::from_str(contents)?)
}

/// Accepts any spelling `Mode::from_str` does, e.g. `"RFQ"`.
fn deserialize_mode<'de, D>(deserializer: D) -> std::result::Result<Option<Mode>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|value| value.parse::<Mode>().map_err(serde::de::Error::custom))
        .transpose()
}

impl FileConfig {
    /// Mode from the flags, else the file, else rfq.
    pub fn mode(&self, flags: &FlagOverrides) -> Mode {
        flags.mode.or(self.mode).unwrap_or_default()
    }

    /// Builds the run's classification options.
    ///
    /// A blank or missing `--root` uses `default_root` for the chosen mode.
    /// Strip segments from the flags replace the file's list.
    pub fn classification_options(
        &self,
        flags: &FlagOverrides,
        default_root: impl FnOnce(Mode) -> String,
    ) -> ClassificationOptions {
        let mode = self.mode(flags);
        let root = flags
            .root
            .as_deref()
            .map(str::trim)
            .filter(|root| !root.is_empty())
            .map_or_else(|| default_root(mode), str::to_string);
        let strip = if flags.strip_segments.is_empty() {
            &self.strip_segments
        } else {
            &flags.strip_segments
        };
        ClassificationOptions::new(mode, root)
            .with_strip_segments(strip.iter().map(String::as_str))
            .with_include_unclassified(
                flags.include_unclassified || self.include_unclassified.unwrap_or(false),
            )
    }

    /// Template path from the flags, else the file.
    pub fn mail_template(&self, flags: &FlagOverrides) -> Option<PathBuf> {
        flags
            .mail_template
            .clone()
            .or_else(|| self.mail_template.clone())
    }
}
