use indexmap::IndexMap;

use crate::analyzer::NormalizedDocument;

/// TermFrequency struct
/// Counts how often each term (unigram or bigram) occurs in one document.
///
/// Bigrams are the contiguous token pairs of the document, stored as the two
/// tokens joined by a single space.
///
/// # Examples
/// ```
/// use lyric_match::vectorizer::term::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("love");
/// term_freq.add_term("heaven");
/// term_freq.add_term("love");
///
/// assert_eq!(term_freq.term_count("love"), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrequency {
    term_count: IndexMap<Box<str>, u32>,
}

/// Implementation for adding terms
impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the unigrams and bigrams of a normalized document
    pub fn from_document(doc: &NormalizedDocument) -> Self {
        let tokens = doc.tokens();
        let mut freq = Self::new();
        freq.add_terms(tokens);
        for pair in tokens.windows(2) {
            freq.add_term(&format!("{} {}", pair[0], pair[1]));
        }
        freq
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        match self.term_count.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.term_count.insert(term.into(), 1);
            }
        }
        self
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }
}

/// Implementation for retrieving information
impl TermFrequency {
    /// Occurrences of `term`, 0 when absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u32 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Iterate `(term, count)` in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.term_count.iter().map(|(term, count)| (term.as_ref(), *count))
    }

    /// Number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }
}
