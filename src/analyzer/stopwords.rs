//! Fixed English stopword table.
//!
//! The table is the 179-word English list distributed with NLTK's stopwords
//! corpus. It is embedded so normalization never depends on a runtime
//! download; bump [`STOPWORDS_VERSION`] whenever the table changes, since
//! every trained artifact depends on it.

use std::collections::HashSet;

/// Version tag of [`ENGLISH_STOPWORDS`], recorded in trained artifacts.
pub const STOPWORDS_VERSION: &str = "nltk-english-179";

/// English stopwords, lowercase.
///
/// Entries containing an apostrophe can never match after normalization
/// strips punctuation; they are kept so the table stays identical to the
/// reference list.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what",
    "which", "who", "whom", "this", "that", "that'll", "these", "those", "am", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after", "above",
    "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some",
    "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn",
    "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
    "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't",
    "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
    "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// A stopword set with O(1) lookup.
///
/// Words are stored lowercase; lookups are expected to be lowercase already.
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: HashSet<&'static str>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::english()
    }
}

impl Stopwords {
    /// The fixed English table.
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS)
    }

    /// Build a set from an explicit word list.
    pub fn from_words(words: &[&'static str]) -> Self {
        Self {
            words: words.iter().copied().collect(),
        }
    }

    /// Checks if a lowercase token is a stopword.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of distinct stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// `true` when the set holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_table_has_179_distinct_words() {
        assert_eq!(ENGLISH_STOPWORDS.len(), 179);
        assert_eq!(Stopwords::english().len(), 179);
    }

    #[test]
    fn common_function_words_are_stopwords() {
        let stopwords = Stopwords::english();
        for word in ["the", "been", "theirs", "wouldn", "because"] {
            assert!(stopwords.contains(word), "{word} should be a stopword");
        }
        assert!(!stopwords.contains("love"));
        assert!(!stopwords.contains("heaven"));
    }
}
