//! The trained artifact and its on-disk form.
//!
//! An artifact is written once by the corpus builder and read once at
//! service start. The file is CBOR; [`ARTIFACT_FORMAT_VERSION`] changes
//! whenever the layout does.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analyzer::Normalizer;
use crate::error::{Error, Result};
use crate::index::CorpusIndex;
use crate::vectorizer::vocab::Vocabulary;

/// Layout version of artifact files written by this build.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Fitted vocabulary plus the indexed corpus.
///
/// Immutable once built; share it with `Arc` to serve concurrent lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedArtifact {
    format_version: u32,
    /// normalization rules the corpus was built with
    ruleset: String,
    /// IDF engine the weights were computed with
    engine: String,
    vocabulary: Vocabulary,
    index: CorpusIndex,
}

impl TrainedArtifact {
    /// # Errors
    /// [`Error::CorruptArtifact`] when the index rows do not have the
    /// vocabulary's dimension.
    pub fn new(vocabulary: Vocabulary, index: CorpusIndex, ruleset: String, engine: &str) -> Result<Self> {
        let artifact = Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            ruleset,
            engine: engine.to_string(),
            vocabulary,
            index,
        };
        artifact.check_dimensions()?;
        Ok(artifact)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    pub fn ruleset(&self) -> &str {
        &self.ruleset
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    /// Write the artifact to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |source| Error::WriteFile {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_cbor::to_writer(&mut writer, self).map_err(Error::Encode)?;
        writer.flush().map_err(write_err)?;
        info!(
            path = %path.display(),
            songs = self.index.len(),
            terms = self.vocabulary.dim(),
            "artifact saved"
        );
        Ok(())
    }

    /// Read and validate an artifact written by [`TrainedArtifact::save`].
    ///
    /// # Errors
    /// I/O and decode failures, an unknown format version, a normalization
    /// ruleset different from this build's, or mismatched dimensions.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Self = serde_cbor::from_reader(BufReader::new(file)).map_err(Error::Decode)?;
        artifact.validate(&Normalizer::default().ruleset())?;
        info!(
            path = %path.display(),
            songs = artifact.index.len(),
            terms = artifact.vocabulary.dim(),
            "artifact loaded"
        );
        Ok(artifact)
    }

    /// Check that the artifact can be queried with `ruleset`.
    pub fn validate(&self, ruleset: &str) -> Result<()> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(Error::UnsupportedArtifactVersion {
                found: self.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }
        if self.ruleset != ruleset {
            return Err(Error::CorruptArtifact {
                reason: format!(
                    "built with normalization ruleset {:?}, this build uses {:?}",
                    self.ruleset, ruleset
                ),
            });
        }
        self.check_dimensions()
    }

    fn check_dimensions(&self) -> Result<()> {
        if self.index.dim() != self.vocabulary.dim() {
            return Err(Error::CorruptArtifact {
                reason: format!(
                    "index dimension {} does not match vocabulary size {}",
                    self.index.dim(),
                    self.vocabulary.dim()
                ),
            });
        }
        Ok(())
    }
}
