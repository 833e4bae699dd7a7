//! Configuration types for j1939-dl

use crate::error::{Error, Result};
use crate::types::{DatasetDuration, Format};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fixed path of the generation endpoint
pub const GENERATE_PATH: &str = "/generate";

/// Generation server settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the generation server (default: "http://127.0.0.1:3000")
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ServerConfig {
    /// Absolute URL of the generation endpoint
    ///
    /// Any path on the base URL is replaced by [`GENERATE_PATH`].
    pub fn endpoint(&self) -> Result<url::Url> {
        let base = url::Url::parse(&self.base_url).map_err(|e| {
            Error::config(
                "server.base_url",
                format!("invalid URL '{}': {}", self.base_url, e),
            )
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::config(
                "server.base_url",
                format!("unsupported scheme '{}'", base.scheme()),
            ));
        }
        base.join(GENERATE_PATH)
            .map_err(|e| Error::config("server.base_url", e.to_string()))
    }
}

/// How to handle a download whose file name already exists
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCollisionAction {
    /// Append " (1)", " (2)", ... to the stem
    #[default]
    Rename,
    /// Replace the existing file
    Overwrite,
    /// Fail the download
    Skip,
}

/// Where and how downloads are written
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Download directory (default: ".")
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// File name stem; the format extension is appended (default: "j1939_dataset")
    #[serde(default = "default_filename_stem")]
    pub filename_stem: String,

    /// File collision handling
    #[serde(default)]
    pub file_collision: FileCollisionAction,

    /// Prefer the server's Content-Disposition file name when present (default: false)
    #[serde(default)]
    pub use_server_filename: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            filename_stem: default_filename_stem(),
            file_collision: FileCollisionAction::default(),
            use_server_filename: false,
        }
    }
}

/// Whether the duration input is checked before sending
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationPolicy {
    /// Send whatever was entered; the server decides
    #[default]
    Permissive,
    /// Require a positive whole number of seconds
    Numeric,
}

/// Initial form values
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormDefaults {
    /// Initially selected format (default: csv)
    #[serde(default)]
    pub format: Format,

    /// Initial duration input (default: "10")
    #[serde(default)]
    pub duration: DatasetDuration,

    /// Duration validation policy (default: permissive)
    #[serde(default)]
    pub duration_policy: DurationPolicy,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            format: Format::default(),
            duration: DatasetDuration::default(),
            duration_policy: DurationPolicy::default(),
        }
    }
}

/// Main configuration for the request dispatcher
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generation server
    #[serde(default)]
    pub server: ServerConfig,

    /// Download destination
    #[serde(default)]
    pub download: DownloadConfig,

    /// Form defaults and validation
    #[serde(default)]
    pub form: FormDefaults,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that would otherwise only fail at request time
    pub fn validate(&self) -> Result<()> {
        self.server.endpoint()?;

        let stem = self.download.filename_stem.trim();
        if stem.is_empty() {
            return Err(Error::config(
                "download.filename_stem",
                "file name stem must not be empty",
            ));
        }
        if stem.contains(['/', '\\']) {
            return Err(Error::config(
                "download.filename_stem",
                format!("'{}' must not contain path separators", stem),
            ));
        }
        Ok(())
    }

    /// Download directory
    pub fn download_dir(&self) -> &PathBuf {
        &self.download.download_dir
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_filename_stem() -> String {
    "j1939_dataset".to_string()
}
