use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analyzer::NormalizedDocument;
use crate::utils::math::vector::SparseVec;
use crate::vectorizer::term::TermFrequency;
use crate::vectorizer::TfidfVector;

/// Frozen vocabulary of a fitted vectorizer
///
/// Maps each retained term to its column index and IDF weight. The column of
/// a term is its position in the map; terms are stored in lexical order, so
/// refitting identical input yields identical columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(with = "indexmap::map::serde_seq")]
    terms: IndexMap<Box<str>, f32>,
    /// number of documents the IDF weights were computed from
    doc_num: u64,
}

impl Vocabulary {
    /// Build from `(term, idf)` pairs.
    /// Columns follow the lexical order of the terms.
    pub fn from_terms<I>(terms: I, doc_num: u64) -> Self
    where
        I: IntoIterator<Item = (Box<str>, f32)>,
    {
        let mut terms: Vec<(Box<str>, f32)> = terms.into_iter().collect();
        terms.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            terms: terms.into_iter().collect(),
            doc_num,
        }
    }

    /// Dimension of the vector space
    #[inline]
    pub fn dim(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Column index of `term`
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// IDF weight of `term`
    #[inline]
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.terms.get(term).copied()
    }

    /// Term at column `index`
    #[inline]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|(term, _)| term.as_ref())
    }

    /// Iterate `(term, idf)` in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.terms.iter().map(|(term, idf)| (term.as_ref(), *idf))
    }

    /// TF-IDF vector of a normalized document
    ///
    /// Terms missing from the vocabulary contribute nothing. The result is
    /// L2-normalized, or the zero vector when no term is known.
    pub fn transform(&self, doc: &NormalizedDocument) -> TfidfVector {
        self.weigh(&TermFrequency::from_document(doc))
    }

    /// raw count × idf, then L2 normalization
    pub(crate) fn weigh(&self, freq: &TermFrequency) -> TfidfVector {
        let pairs: Vec<(u32, f32)> = freq
            .iter()
            .filter_map(|(term, count)| {
                let (idx, _, idf) = self.terms.get_full(term)?;
                let col = u32::try_from(idx).ok()?;
                Some((col, count as f32 * *idf))
            })
            .collect();
        let mut vec = SparseVec::from_pairs(self.dim(), pairs);
        vec.l2_normalize();
        vec.shrink_to_fit();
        vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::from_terms(
            vec![
                ("sky".into(), 2.0),
                ("heaven".into(), 1.0),
                ("imagine heaven".into(), 3.0),
                ("imagine".into(), 1.5),
            ],
            4,
        )
    }

    fn doc(tokens: &[&str]) -> NormalizedDocument {
        NormalizedDocument::from(tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn columns_follow_lexical_order() {
        let vocab = vocab();
        assert_eq!(vocab.dim(), 4);
        assert_eq!(vocab.index_of("heaven"), Some(0));
        assert_eq!(vocab.index_of("imagine"), Some(1));
        assert_eq!(vocab.index_of("imagine heaven"), Some(2));
        assert_eq!(vocab.index_of("sky"), Some(3));
        assert_eq!(vocab.term(2), Some("imagine heaven"));
        assert_eq!(vocab.idf("sky"), Some(2.0));
    }

    #[test]
    fn transform_weighs_and_normalizes() {
        let vocab = vocab();
        let vec = vocab.transform(&doc(&["imagine", "heaven", "heaven"]));
        // heaven: 2 × 1.0, imagine: 1 × 1.5, "imagine heaven": 1 × 3.0
        let norm = (2.0_f64 * 2.0 + 1.5 * 1.5 + 3.0 * 3.0).sqrt();
        assert_eq!(vec.len(), 4);
        assert!((vec.norm() - 1.0).abs() < 1e-6);
        assert!((f64::from(vec.get(0).unwrap_or_default()) - 2.0 / norm).abs() < 1e-6);
        assert!((f64::from(vec.get(2).unwrap_or_default()) - 3.0 / norm).abs() < 1e-6);
        assert_eq!(vec.get(3), Some(0.0));
    }

    #[test]
    fn unknown_terms_give_zero_vector() {
        let vec = vocab().transform(&doc(&["rain", "window"]));
        assert!(vec.is_zero());
        assert_eq!(vec.len(), 4);
    }

    #[test]
    fn transform_does_not_touch_vocabulary() {
        let vocab = vocab();
        let before = vocab.clone();
        let _ = vocab.transform(&doc(&["imagine", "unseen"]));
        assert_eq!(vocab, before);
    }
}
