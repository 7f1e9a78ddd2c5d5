use indexmap::IndexMap;

use crate::vectorizer::term::TermFrequency;

/// Corpus-wide statistics of one term
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TermStats {
    /// number of documents containing the term at least once
    pub doc_freq: u64,
    /// occurrences of the term over the whole corpus
    pub total_count: u64,
}

/// keep document count and per-term statistics of a training corpus
///
/// Built during fit only; it is not part of the trained artifact.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    doc_num: u64,
    term_stats: IndexMap<Box<str>, TermStats>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document's terms to the corpus
    pub fn add_doc(&mut self, freq: &TermFrequency) {
        self.doc_num += 1;
        for (term, count) in freq.iter() {
            let stats = self.term_stats.entry(term.into()).or_default();
            stats.doc_freq += 1;
            stats.total_count += u64::from(count);
        }
    }

    /// Merge another corpus into self
    pub fn merge_corpus(mut self, other: Corpus) -> Corpus {
        self.doc_num += other.doc_num;
        for (term, other_stats) in other.term_stats {
            let stats = self.term_stats.entry(term).or_default();
            stats.doc_freq += other_stats.doc_freq;
            stats.total_count += other_stats.total_count;
        }
        self
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Statistics of `term`, zeroed when absent
    #[inline]
    pub fn term_stats(&self, term: &str) -> TermStats {
        self.term_stats.get(term).copied().unwrap_or_default()
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_stats.len()
    }

    /// Iterate `(term, stats)` in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, TermStats)> {
        self.term_stats.iter().map(|(term, stats)| (term.as_ref(), *stats))
    }
}
