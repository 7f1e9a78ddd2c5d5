//! Lookup service: lyric snippet in, best-matching song out.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::analyzer::Normalizer;
use crate::artifact::TrainedArtifact;
use crate::error::{Error, Result};
use crate::index::Hit;
use crate::vectorizer::TfidfVector;

/// Decimal places kept in [`Prediction::confidence`].
pub const CONFIDENCE_DECIMALS: i32 = 4;

/// Identified song
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub song: String,
    pub artist: String,
    /// cosine similarity rounded to [`CONFIDENCE_DECIMALS`] places
    pub confidence: f64,
}

impl From<Hit<'_>> for Prediction {
    fn from(hit: Hit<'_>) -> Self {
        Self {
            song: hit.entry.song_name.clone(),
            artist: hit.entry.artist.clone(),
            confidence: round_confidence(hit.score),
        }
    }
}

/// Readiness report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Health {
    pub model_loaded: bool,
    pub songs_available: usize,
}

#[derive(Debug, Clone)]
enum ServiceState {
    Ready(Arc<TrainedArtifact>),
    NotReady { reason: String },
}

/// Answers lookups against one immutable artifact.
///
/// Every method takes `&self`; share the service across threads with `Arc`
/// or by reference.
#[derive(Debug, Clone)]
pub struct LookupService {
    state: ServiceState,
    normalizer: Normalizer,
}

impl LookupService {
    pub fn new(artifact: Arc<TrainedArtifact>) -> Self {
        Self::with_state(ServiceState::Ready(artifact))
    }

    /// Service from the outcome of [`TrainedArtifact::load`]. A failed load
    /// gives a degraded service that rejects every lookup.
    pub fn from_load(loaded: Result<TrainedArtifact>) -> Self {
        match loaded {
            Ok(artifact) => Self::new(Arc::new(artifact)),
            Err(err) => Self::unavailable(err.to_string()),
        }
    }

    /// Degraded service
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::with_state(ServiceState::NotReady { reason: reason.into() })
    }

    fn with_state(state: ServiceState) -> Self {
        Self {
            state,
            normalizer: Normalizer::default(),
        }
    }

    pub fn artifact(&self) -> Option<&Arc<TrainedArtifact>> {
        match &self.state {
            ServiceState::Ready(artifact) => Some(artifact),
            ServiceState::NotReady { .. } => None,
        }
    }

    pub fn health(&self) -> Health {
        match &self.state {
            ServiceState::Ready(artifact) => Health {
                model_loaded: true,
                songs_available: artifact.index().len(),
            },
            ServiceState::NotReady { .. } => Health {
                model_loaded: false,
                songs_available: 0,
            },
        }
    }

    /// Best-matching song for `lyrics`.
    ///
    /// A snippet sharing no term with the vocabulary still succeeds, with
    /// confidence 0.0 and the first indexed song.
    ///
    /// # Errors
    /// [`Error::ArtifactNotLoaded`] on a degraded service,
    /// [`Error::EmptyQuery`] when `lyrics` normalizes to nothing.
    pub fn predict(&self, lyrics: &str) -> Result<Prediction> {
        let artifact = self.ready()?;
        let query = self.vectorize(artifact, lyrics)?;
        let hit = artifact.index().query(&query)?;
        debug!(index = hit.index, score = hit.score, "lookup");
        Ok(hit.into())
    }

    /// Up to `k` songs, best first. Same errors as [`LookupService::predict`].
    pub fn predict_top_k(&self, lyrics: &str, k: usize) -> Result<Vec<Prediction>> {
        let artifact = self.ready()?;
        let query = self.vectorize(artifact, lyrics)?;
        let hits = artifact.index().query_top_k(&query, k)?;
        debug!(k, returned = hits.len(), "top-k lookup");
        Ok(hits.into_iter().map(Prediction::from).collect())
    }

    fn ready(&self) -> Result<&TrainedArtifact> {
        match &self.state {
            ServiceState::Ready(artifact) => Ok(artifact.as_ref()),
            ServiceState::NotReady { reason } => Err(Error::ArtifactNotLoaded { reason: reason.clone() }),
        }
    }

    fn vectorize(&self, artifact: &TrainedArtifact, lyrics: &str) -> Result<TfidfVector> {
        if lyrics.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        let doc = self.normalizer.normalize(lyrics);
        if doc.is_empty() {
            return Err(Error::EmptyQuery);
        }
        Ok(artifact.vocabulary().transform(&doc))
    }
}

fn round_confidence(score: f64) -> f64 {
    let scale = 10f64.powi(CONFIDENCE_DECIMALS);
    (score * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::builder::CorpusBuilder;
    use crate::dataset::{sample_records, LyricRecord};

    fn sample_service() -> LookupService {
        let (artifact, _) = CorpusBuilder::default().build(&sample_records()).unwrap();
        LookupService::new(Arc::new(artifact))
    }

    #[test]
    fn identifies_sample_songs() {
        let service = sample_service();
        let prediction = service.predict("tryna call on my own").unwrap();
        assert_eq!(prediction.song, "Blinding Lights");
        assert_eq!(prediction.artist, "The Weeknd");
        assert!(prediction.confidence > 0.0 && prediction.confidence <= 1.0);

        let prediction = service.predict("Is this the real life? Is this just fantasy?").unwrap();
        assert_eq!(prediction.song, "Bohemian Rhapsody");
    }

    #[test]
    fn full_lyrics_score_one() {
        let service = sample_service();
        let record = &sample_records()[4];
        let prediction = service.predict(&record.lyrics).unwrap();
        assert_eq!(prediction.song, "Hotel California");
        assert_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn two_song_corpus() {
        let records = vec![
            LyricRecord::new("I been tryna call", "Blinding Lights", "The Weeknd"),
            LyricRecord::new("Imagine there's no heaven", "Imagine", "John Lennon"),
        ];
        let (artifact, _) = CorpusBuilder::default().build(&records).unwrap();
        let service = LookupService::new(Arc::new(artifact));
        let prediction = service.predict("tryna call").unwrap();
        assert_eq!(prediction.song, "Blinding Lights");
        assert_eq!(prediction.artist, "The Weeknd");
        assert!(prediction.confidence > 0.0);
    }

    #[test]
    fn empty_queries_are_rejected() {
        let service = sample_service();
        for text in ["", "   \n", "the and of", "!!! 42"] {
            let err = service.predict(text).unwrap_err();
            assert!(matches!(err, Error::EmptyQuery), "{text:?} gave {err}");
            assert!(err.is_bad_input());
        }
    }

    #[test]
    fn unknown_words_give_zero_confidence() {
        let service = sample_service();
        let prediction = service.predict("xylophone quasar zeppelinx").unwrap();
        assert_eq!(prediction.confidence, 0.0);
        assert_eq!(prediction.song, "Blinding Lights");
    }

    #[test]
    fn confidence_is_rounded() {
        assert_eq!(round_confidence(0.123456), 0.1235);
        assert_eq!(round_confidence(0.99999), 1.0);
        assert_eq!(round_confidence(0.0), 0.0);
    }

    #[test]
    fn degraded_service_rejects_lookups() {
        let service = LookupService::from_load(Err(Error::EmptyIndex));
        assert_eq!(
            service.health(),
            Health {
                model_loaded: false,
                songs_available: 0
            }
        );
        let err = service.predict("tryna call").unwrap_err();
        assert!(matches!(err, Error::ArtifactNotLoaded { .. }));
        assert!(err.is_not_ready());
        assert!(service.predict_top_k("tryna call", 3).is_err());
    }

    #[test]
    fn health_reports_song_count() {
        let health = sample_service().health();
        assert!(health.model_loaded);
        assert_eq!(health.songs_available, 50);
    }

    #[test]
    fn top_k_starts_with_prediction() {
        let service = sample_service();
        let best = service.predict("desert highway wind").unwrap();
        let ranked = service.predict_top_k("desert highway wind", 3).unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0], best);
        assert!(ranked.windows(2).all(|w| w[0].confidence >= w[1].confidence));
    }

    #[test]
    fn concurrent_lookups_agree() {
        let service = Arc::new(sample_service());
        let expected = service.predict("glitters is gold stairway").unwrap();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                thread::spawn(move || service.predict("glitters is gold stairway").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
        assert_eq!(expected.song, "Stairway to Heaven");
    }
}
