//! Configuration for jdx.
//!
//! Settings come from a YAML file: `--config <path>` when given, otherwise
//! `jdx.yaml` in the current directory when it exists, otherwise defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{Error, Result};
use crate::model::DEFAULT_DATA_SUFFIX;

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "jdx.yaml";

/// Default suffix for exported JSON files.
pub const DEFAULT_JSON_SUFFIX: &str = ".jdx.json";

/// Default number of items listed before output is truncated.
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct JdxConfig {
    /// Suffix of data files (e.g. `.data`).
    pub data_suffix: String,

    /// Suffix used when deriving an export file name.
    pub json_suffix: String,

    /// Display settings
    pub display: DisplayConfig,
}

/// Display configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct DisplayConfig {
    /// Maximum rows listed per section before "... and N more".
    pub max_items: usize,

    /// Use ASCII arrows and markers instead of Unicode.
    pub ascii: bool,
}

impl Default for JdxConfig {
    fn default() -> Self {
        Self {
            data_suffix: DEFAULT_DATA_SUFFIX.to_string(),
            json_suffix: DEFAULT_JSON_SUFFIX.to_string(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            ascii: false,
        }
    }
}

impl JdxConfig {
    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, or a config error if
    /// it is not valid YAML or fails validation.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load from `explicit` if given, else from `dir/jdx.yaml` if present,
    /// else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a chosen file cannot be loaded.
    pub async fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path).await;
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if fs::try_exists(&candidate).await? {
            Self::load(&candidate).await
        } else {
            Ok(Self::default())
        }
    }

    /// Check value constraints.
    ///
    /// # Errors
    ///
    /// Returns a config error naming the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.data_suffix.is_empty() {
            return Err(Error::Config("data-suffix must not be empty".to_string()));
        }
        if self.json_suffix.is_empty() {
            return Err(Error::Config("json-suffix must not be empty".to_string()));
        }
        if self.display.max_items == 0 {
            return Err(Error::Config(
                "display.max-items must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve a data file argument: the suffix is appended when missing.
    #[must_use]
    pub fn data_path(&self, arg: &Path) -> PathBuf {
        let has_suffix = arg
            .to_str()
            .is_some_and(|s| s.ends_with(self.data_suffix.as_str()));
        if has_suffix {
            arg.to_path_buf()
        } else {
            let mut os = arg.as_os_str().to_owned();
            os.push(&self.data_suffix);
            PathBuf::from(os)
        }
    }

    /// Default export path next to the data file: `<basename><json-suffix>`.
    #[must_use]
    pub fn json_path(&self, data_path: &Path) -> PathBuf {
        let text = data_path.to_string_lossy();
        let stem = text.strip_suffix(self.data_suffix.as_str()).unwrap_or(&text);
        PathBuf::from(format!("{stem}{}", self.json_suffix))
    }
}
