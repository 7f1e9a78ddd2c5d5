//! Error types for lyric-match.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while training, loading or querying a lyric index.
#[derive(Debug, Error)]
pub enum Error {
    /// Fit was attempted on no usable documents.
    #[error("cannot fit a vocabulary on an empty corpus")]
    EmptyCorpus,

    /// Every record was discarded before fitting.
    #[error("no usable lyrics left to index ({discarded} records discarded)")]
    InsufficientData {
        /// Number of records that normalized to nothing.
        discarded: usize,
        /// The fit failure that followed.
        #[source]
        source: Box<Error>,
    },

    /// A query was run against an index with no rows.
    #[error("the lyric index is empty")]
    EmptyIndex,

    /// The query text normalized to no tokens.
    #[error("lyrics are empty after preprocessing, provide meaningful text")]
    EmptyQuery,

    /// The service has no artifact to query against.
    #[error("model not loaded: {reason}")]
    ArtifactNotLoaded {
        /// Why the artifact is unavailable.
        reason: String,
    },

    /// Failed to read a file.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write {path}: {source}")]
    WriteFile {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Artifact encoding failed.
    #[error("failed to encode artifact: {0}")]
    Encode(#[source] serde_cbor::Error),

    /// Artifact decoding failed.
    #[error("failed to decode artifact: {0}")]
    Decode(#[source] serde_cbor::Error),

    /// The artifact decoded but violates an index invariant.
    #[error("corrupt artifact: {reason}")]
    CorruptArtifact {
        /// The violated invariant.
        reason: String,
    },

    /// The artifact was written by an incompatible format version.
    #[error("unsupported artifact format version {found} (expected {expected})")]
    UnsupportedArtifactVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },

    /// The dataset could not be parsed.
    #[error("dataset error: {0}")]
    Csv(#[from] csv::Error),

    /// Required dataset columns could not be detected.
    #[error("missing required columns {missing:?} (available: {available:?})")]
    MissingColumns {
        /// Logical fields with no matching column.
        missing: Vec<&'static str>,
        /// Column headers present in the dataset.
        available: Vec<String>,
    },

    /// The config file is not valid TOML for [`crate::Config`].
    #[error("failed to parse config file {path}: {source}")]
    ParseConfig {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The config parsed but holds out-of-range values.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// What is wrong with it.
        reason: String,
    },
}

impl Error {
    /// Returns `true` when the error is caused by the caller's input rather
    /// than by the service state.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, Self::EmptyQuery)
    }

    /// Returns `true` when the service cannot answer at all.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::ArtifactNotLoaded { .. } | Self::EmptyIndex)
    }
}

/// Convenience alias for lyric-match results.
pub type Result<T> = std::result::Result<T, Error>;
