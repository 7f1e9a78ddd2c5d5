//! This crate identifies songs from lyric snippets using a TF-IDF index.

pub mod analyzer;
pub mod artifact;
pub mod builder;
pub mod config;
pub mod dataset;
pub mod error;
pub mod index;
pub mod service;
pub mod utils;
pub mod vectorizer;

/// Lookup Service
/// The top-level query surface of this crate. It holds one trained artifact
/// and answers "which song are these lyrics from" with a song, an artist and
/// a confidence in [0, 1].
///
/// A service built from a failed artifact load is degraded: it reports
/// `model_loaded = false` and rejects every lookup.
///
/// Lookups take `&self` and never mutate shared state, so one service can
/// answer from many threads at once.
pub use service::LookupService;

/// Lookup result returned by [`LookupService`]
pub use service::Prediction;

/// Corpus Builder
/// Normalizes raw records, drops the ones with no usable lyrics, fits the
/// vectorizer and indexes the rest.
///
/// Produces a [`TrainedArtifact`] together with a `BuildReport`.
pub use builder::CorpusBuilder;

/// Trained Artifact
/// Fitted vocabulary plus the indexed songs, as written to and read from
/// disk.
///
/// # Serialization
/// CBOR, with a format version and the normalization ruleset checked on load.
pub use artifact::TrainedArtifact;

/// TF-IDF Vectorizer
/// Fits a vocabulary of unigrams and bigrams over normalized documents and
/// produces their L2-normalized TF-IDF rows.
///
/// `TfidfVectorizer<E>` takes the IDF engine as a type parameter
/// (default `SmoothIdfEngine`).
pub use vectorizer::TfidfVectorizer;

/// Vectorizer parameters: document-frequency window and vocabulary cap
pub use vectorizer::VectorizerConfig;

/// Text normalization shared by training and lookup
pub use analyzer::{normalize, NormalizedDocument, Normalizer};

/// Training record
pub use dataset::LyricRecord;

pub use config::Config;
pub use error::{Error, Result};
