pub mod corpus;
pub mod term;
pub mod tfidf;
pub mod vocab;

use std::marker::PhantomData;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analyzer::NormalizedDocument;
use crate::error::{Error, Result};
use crate::utils::math::vector::SparseVec;
use crate::vectorizer::corpus::Corpus;
use crate::vectorizer::term::TermFrequency;
use crate::vectorizer::tfidf::{SmoothIdfEngine, TfidfEngine};
use crate::vectorizer::vocab::Vocabulary;

/// L2-normalized TF-IDF vector over a [`Vocabulary`]
pub type TfidfVector = SparseVec<f32>;

/// Rows are documents, columns are vocabulary terms
pub type TfidfMatrix = Vec<TfidfVector>;

/// Vocabulary construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// minimum number of documents a term must appear in
    pub min_df: u64,
    /// maximum share of documents a term may appear in (0.0, 1.0]
    pub max_df: f64,
    /// keep at most this many terms, by corpus-wide count
    pub max_features: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            min_df: 2,
            max_df: 0.95,
            max_features: 5000,
        }
    }
}

impl VectorizerConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.min_df < 1 {
            return Err(Error::InvalidConfig {
                reason: "vectorizer.min_df must be at least 1".to_string(),
            });
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(Error::InvalidConfig {
                reason: format!("vectorizer.max_df must be in (0, 1], got {}", self.max_df),
            });
        }
        if self.max_features < 1 {
            return Err(Error::InvalidConfig {
                reason: "vectorizer.max_features must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// TF-IDF Vectorizer
///
/// Fits a [`Vocabulary`] over unigrams and bigrams of normalized documents
/// and produces the L2-normalized TF-IDF matrix of those documents.
///
/// `TfidfVectorizer<E>` takes the IDF formula as a type parameter
/// (default [`SmoothIdfEngine`]).
#[derive(Debug, Clone)]
pub struct TfidfVectorizer<E = SmoothIdfEngine>
where
    E: TfidfEngine,
{
    config: VectorizerConfig,
    _marker: PhantomData<E>,
}

impl Default for TfidfVectorizer<SmoothIdfEngine> {
    fn default() -> Self {
        Self::new(VectorizerConfig::default())
    }
}

impl<E> TfidfVectorizer<E>
where
    E: TfidfEngine,
{
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Fit the vocabulary and compute the TF-IDF row of every document.
    ///
    /// Row `i` of the matrix belongs to `documents[i]`. Documents with no
    /// retained term get a zero row.
    ///
    /// # Errors
    /// [`Error::EmptyCorpus`] when `documents` is empty or every document is
    /// empty.
    pub fn fit(&self, documents: &[NormalizedDocument]) -> Result<(Vocabulary, TfidfMatrix)> {
        if documents.iter().all(NormalizedDocument::is_empty) {
            return Err(Error::EmptyCorpus);
        }

        let freqs: Vec<TermFrequency> = documents
            .par_iter()
            .map(TermFrequency::from_document)
            .collect();
        let corpus = freqs
            .par_iter()
            .fold(Corpus::new, |mut corpus, freq| {
                corpus.add_doc(freq);
                corpus
            })
            .reduce(Corpus::new, Corpus::merge_corpus);

        let mut selected = select_terms(&corpus, self.config.min_df, self.config.max_df, self.config.max_features);
        if selected.is_empty() {
            // 小さいコーパスでは df 窓が空になりうる
            warn!(
                doc_num = corpus.doc_num(),
                min_df = self.config.min_df,
                max_df = self.config.max_df,
                "document-frequency window retains no term, widening to every term"
            );
            selected = select_terms(&corpus, 1, 1.0, self.config.max_features);
        }
        if selected.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let doc_num = corpus.doc_num();
        let vocab = Vocabulary::from_terms(
            selected.into_iter().map(|term| {
                let idf = E::idf(doc_num, corpus.term_stats(term).doc_freq) as f32;
                (Box::<str>::from(term), idf)
            }),
            doc_num,
        );
        debug!(
            candidates = corpus.vocab_size(),
            retained = vocab.dim(),
            doc_num,
            "vocabulary fitted"
        );

        let matrix: TfidfMatrix = freqs.par_iter().map(|freq| vocab.weigh(freq)).collect();
        Ok((vocab, matrix))
    }

    /// Vectorize one document against a fitted vocabulary
    pub fn transform(doc: &NormalizedDocument, vocab: &Vocabulary) -> TfidfVector {
        vocab.transform(doc)
    }
}

/// Terms with `min_df <= df <= max_df × N`, the `max_features` most frequent
/// of them (ties broken lexically).
fn select_terms(corpus: &Corpus, min_df: u64, max_df: f64, max_features: usize) -> Vec<&str> {
    let max_doc_count = max_df * corpus.doc_num() as f64;
    let mut candidates: Vec<(&str, u64)> = corpus
        .iter()
        .filter(|(_, stats)| stats.doc_freq >= min_df && stats.doc_freq as f64 <= max_doc_count)
        .map(|(term, stats)| (term, stats.total_count))
        .collect();
    candidates.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    candidates.truncate(max_features);
    candidates.into_iter().map(|(term, _)| term).collect()
}
