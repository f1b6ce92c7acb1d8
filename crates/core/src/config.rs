//! Codec configuration via `simdb-meta.toml`
//!
//! Codec settings live in a small TOML file. Nothing reads it implicitly: a
//! caller loads a [`MetaConfig`] with [`MetaConfig::from_file`] and hands it to
//! a [`Codec`]. The free functions [`crate::flatten()`] and
//! [`crate::unflatten()`] use the defaults.

use crate::document::Document;
use crate::entry::{FlatEntry, StoredRow};
use crate::error::{Error, Result};
use crate::limits::CodecLimits;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "simdb-meta.toml";

/// What flattening does with an empty mapping or an empty sequence
///
/// Neither produces a leaf, so a faithful flat form does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCollectionPolicy {
    /// Fail with `UnrepresentableDocument`
    #[default]
    Reject,
    /// Drop the collection; it does not come back on unflatten
    Skip,
}

impl EmptyCollectionPolicy {
    /// Name used in the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            EmptyCollectionPolicy::Reject => "reject",
            EmptyCollectionPolicy::Skip => "skip",
        }
    }
}

impl fmt::Display for EmptyCollectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmptyCollectionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reject" => Ok(EmptyCollectionPolicy::Reject),
            "skip" => Ok(EmptyCollectionPolicy::Skip),
            other => Err(Error::Config(format!(
                "Invalid empty_collections policy '{}'. Expected \"reject\" or \"skip\".",
                other
            ))),
        }
    }
}

/// Codec configuration loaded from `simdb-meta.toml`.
///
/// # Example
///
/// ```toml
/// empty_collections = "reject"
///
/// [limits]
/// max_nesting_depth = 64
/// max_path_segments = 128
/// max_sequence_len = 100000
/// max_entries = 1000000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetaConfig {
    /// Handling of empty mappings and sequences during flatten
    #[serde(default)]
    pub empty_collections: EmptyCollectionPolicy,
    /// Size limits
    #[serde(default)]
    pub limits: CodecLimits,
}

impl MetaConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# simdb-meta codec configuration
#
# Empty mappings and lists have no flat form.
#   "reject" = fail the flatten call (default)
#   "skip"   = drop them silently; they are not restored by unflatten
empty_collections = "reject"

[limits]
# Maximum nesting depth of mappings and lists
max_nesting_depth = 64
# Maximum number of segments in one path
max_path_segments = 128
# Maximum number of elements in one list
max_sequence_len = 100000
# Maximum number of flat entries per record
max_entries = 1000000
"#
    }

    /// Parse config from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MetaConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: MetaConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::Config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Reject limits configured as zero.
    pub fn validate(&self) -> Result<()> {
        match self.limits.first_zero_limit() {
            Some(name) => Err(Error::Config(format!(
                "Invalid limit '{}' in {}: must be greater than zero",
                name, CONFIG_FILE_NAME
            ))),
            None => Ok(()),
        }
    }
}

/// Flatten/unflatten pair bound to one configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    config: MetaConfig,
}

impl Codec {
    /// Create a codec, validating the configuration
    pub fn new(config: MetaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Codec { config })
    }

    /// The configuration in use
    pub fn config(&self) -> &MetaConfig {
        &self.config
    }

    /// Flatten a document under this configuration
    pub fn flatten(&self, doc: &Document) -> Result<Vec<FlatEntry>> {
        crate::flatten::flatten_with(doc, &self.config)
    }

    /// Rebuild a document under this configuration's limits
    pub fn unflatten(&self, entries: &[FlatEntry]) -> Result<Document> {
        crate::unflatten::unflatten_with(entries, &self.config.limits)
    }

    /// Decode storage rows and rebuild a document
    pub fn unflatten_rows(&self, rows: &[StoredRow]) -> Result<Document> {
        let entries = rows
            .iter()
            .map(FlatEntry::from_row)
            .collect::<Result<Vec<_>>>()?;
        self.unflatten(&entries)
    }
}
