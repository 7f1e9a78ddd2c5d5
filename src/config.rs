//! Configuration for lyric-match.
//!
//! Loaded from an explicit path, or from [`DEFAULT_CONFIG_FILE`] in the
//! working directory when it exists, falling back to built-in defaults.
//! CLI flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::vectorizer::VectorizerConfig;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "lyric-match.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CSV the `train` command reads.
    pub dataset_path: PathBuf,

    /// Where `train` writes the artifact and `predict` reads it.
    pub artifact_path: PathBuf,

    pub vectorizer: VectorizerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/spotify_songs.csv"),
            artifact_path: PathBuf::from("models/lyric_index.cbor"),
            vectorizer: VectorizerConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration.
    ///
    /// With `path`, that file must exist. Without, [`DEFAULT_CONFIG_FILE`] is
    /// read if present.
    ///
    /// # Errors
    /// Unreadable or unparsable file, or out-of-range values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()
    }
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# lyric-match configuration
#
# CLI flags override the values below.

# Headed CSV with lyrics, song name and artist columns
dataset_path = "data/spotify_songs.csv"

# Trained index written by `train`, read by `predict` and `inspect`
artifact_path = "models/lyric_index.cbor"

[vectorizer]
# Keep terms found in at least this many songs
min_df = 2
# and in at most this share of songs
max_df = 0.95
# Cap on vocabulary size, most frequent terms first
max_features = 5000
"#
}

/// Write [`example_config`] to `path` unless a file is already there.
///
/// Returns true if a new file was created.
pub fn write_example_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    let write_err = |source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, example_config()).map_err(write_err)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_config_matches_defaults() {
        let config = Config::from_toml(example_config()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml("[vectorizer]\nmax_features = 100\n").unwrap();
        assert_eq!(config.vectorizer.max_features, 100);
        assert_eq!(config.vectorizer.min_df, 2);
        assert_eq!(config.artifact_path, PathBuf::from("models/lyric_index.cbor"));
    }

    #[test]
    fn explicit_file_is_loaded_and_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "artifact_path = \"out/index.cbor\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.artifact_path, PathBuf::from("out/index.cbor"));

        std::fs::write(&path, "[vectorizer]\nmax_df = 1.5\n").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "dataset_path = [").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(Error::ParseConfig { .. })));
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(Error::ReadFile { .. })));
    }

    #[test]
    fn example_is_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("lyric-match.toml");
        assert!(write_example_config(&path).unwrap());
        assert!(!write_example_config(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), example_config());
    }
}
