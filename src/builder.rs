//! Offline corpus building: records in, [`TrainedArtifact`] out.

use serde::Serialize;
use tracing::{info, warn};

use crate::analyzer::{NormalizedDocument, Normalizer};
use crate::artifact::TrainedArtifact;
use crate::dataset::LyricRecord;
use crate::error::{Error, Result};
use crate::index::{CorpusIndex, SongEntry};
use crate::vectorizer::tfidf::{SmoothIdfEngine, TfidfEngine};
use crate::vectorizer::{TfidfVectorizer, VectorizerConfig};

/// Summary of one build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// records handed to the builder
    pub total_records: usize,
    /// records whose lyrics normalized to nothing
    pub discarded: usize,
    /// songs in the resulting index
    pub indexed: usize,
    pub vocabulary_size: usize,
}

/// Builds the searchable index from raw records.
#[derive(Debug, Clone)]
pub struct CorpusBuilder<E = SmoothIdfEngine>
where
    E: TfidfEngine,
{
    normalizer: Normalizer,
    vectorizer: TfidfVectorizer<E>,
}

impl Default for CorpusBuilder<SmoothIdfEngine> {
    fn default() -> Self {
        Self::new(VectorizerConfig::default())
    }
}

impl<E> CorpusBuilder<E>
where
    E: TfidfEngine,
{
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            normalizer: Normalizer::default(),
            vectorizer: TfidfVectorizer::new(config),
        }
    }

    /// Normalize, filter, fit and index `records`.
    ///
    /// Records whose lyrics normalize to no tokens are skipped. The rest keep
    /// their input order, so entry `i` of the index is the `i`-th surviving
    /// record.
    ///
    /// # Errors
    /// [`Error::InsufficientData`] when no record survives normalization.
    pub fn build(&self, records: &[LyricRecord]) -> Result<(TrainedArtifact, BuildReport)> {
        let mut entries = Vec::with_capacity(records.len());
        let mut discarded = 0;
        for record in records {
            let normalized = self.normalizer.normalize(&record.lyrics);
            if normalized.is_empty() {
                discarded += 1;
                continue;
            }
            entries.push(SongEntry {
                song_name: record.song_name.clone(),
                artist: record.artist.clone(),
                normalized_lyrics: normalized,
            });
        }
        if discarded > 0 {
            warn!(discarded, total = records.len(), "records with no usable lyrics skipped");
        }

        let documents: Vec<NormalizedDocument> = entries.iter().map(|e| e.normalized_lyrics.clone()).collect();
        let (vocabulary, matrix) = self.vectorizer.fit(&documents).map_err(|err| match err {
            Error::EmptyCorpus => Error::InsufficientData {
                discarded,
                source: Box::new(err),
            },
            other => other,
        })?;

        let index = CorpusIndex::new(entries, matrix, vocabulary.dim())?;
        let report = BuildReport {
            total_records: records.len(),
            discarded,
            indexed: index.len(),
            vocabulary_size: vocabulary.dim(),
        };
        let artifact = TrainedArtifact::new(vocabulary, index, self.normalizer.ruleset(), E::NAME)?;
        info!(
            total = report.total_records,
            discarded = report.discarded,
            indexed = report.indexed,
            vocabulary = report.vocabulary_size,
            "corpus built"
        );
        Ok((artifact, report))
    }
}
