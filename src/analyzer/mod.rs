//! Text normalization shared by training and lookup.
//!
//! `normalize` maps raw lyric text to an ordered sequence of lowercase
//! alphabetic tokens:
//!
//! 1. lowercase the whole string
//! 2. drop every character that is not an ASCII letter or whitespace
//!    (dropped, not replaced: `don't` becomes `dont`)
//! 3. split into words with a [`Tokenizer`]; the default one also separates
//!    contractions such as `gonna` (`gon`, `na`)
//! 4. drop stopwords and tokens of two characters or fewer

pub mod stopwords;
pub mod tokenizer;

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

pub use stopwords::{Stopwords, STOPWORDS_VERSION};
pub use tokenizer::{Tokenizer, WordTokenizer};

/// Tokens must be longer than this many characters to be kept.
pub const MAX_DROPPED_TOKEN_LEN: usize = 2;

static DEFAULT_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(Normalizer::default);

/// Normalize `text` with the default English rules.
pub fn normalize(text: &str) -> NormalizedDocument {
    DEFAULT_NORMALIZER.normalize(text)
}

/// Ordered sequence of normalized tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedDocument {
    tokens: Vec<String>,
}

impl NormalizedDocument {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens joined by single spaces.
    pub fn join(&self) -> String {
        self.tokens.join(" ")
    }
}

impl From<Vec<String>> for NormalizedDocument {
    fn from(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

impl fmt::Display for NormalizedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

/// Deterministic text normalizer.
#[derive(Debug, Clone)]
pub struct Normalizer<T = WordTokenizer>
where
    T: Tokenizer,
{
    stopwords: Stopwords,
    tokenizer: T,
}

impl Default for Normalizer<WordTokenizer> {
    fn default() -> Self {
        Self::new(Stopwords::english(), WordTokenizer)
    }
}

impl<T> Normalizer<T>
where
    T: Tokenizer,
{
    pub fn new(stopwords: Stopwords, tokenizer: T) -> Self {
        Self { stopwords, tokenizer }
    }

    /// Identifies the stopword table and tokenization rules.
    /// Artifacts built with one ruleset must be queried with the same one.
    pub fn ruleset(&self) -> String {
        format!("{}+{}", STOPWORDS_VERSION, T::VERSION)
    }

    /// Normalize `text` into tokens. Never fails; blank input gives an empty
    /// document.
    pub fn normalize(&self, text: &str) -> NormalizedDocument {
        if text.is_empty() {
            return NormalizedDocument::default();
        }
        let cleaned = clean(text);
        let tokens = self
            .tokenizer
            .tokenize(&cleaned)
            .into_iter()
            .filter(|tok| tok.len() > MAX_DROPPED_TOKEN_LEN && !self.stopwords.contains(tok))
            .map(str::to_owned)
            .collect();
        NormalizedDocument { tokens }
    }
}

/// Lowercase, then keep only ASCII letters and whitespace.
fn clean(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(doc: &NormalizedDocument) -> Vec<&str> {
        doc.tokens().iter().map(String::as_str).collect()
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(normalize("").is_empty());
        assert!(normalize(" ").is_empty());
        assert!(normalize("\n\t  ").is_empty());
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(normalize("Love"), normalize("love"));
        assert_eq!(normalize("LOVE"), normalize("love"));
        assert_eq!(toks(&normalize("LOVE")), vec!["love"]);
    }

    #[test]
    fn punctuation_and_digits_are_removed_without_spacing() {
        assert_eq!(toks(&normalize("Don't stop-believin' 4ever!")), vec!["dont", "stopbelievin", "ever"]);
        assert_eq!(toks(&normalize("abc123def")), vec!["abcdef"]);
    }

    #[test]
    fn stopwords_and_short_tokens_are_dropped() {
        let doc = normalize("I been tryna call, I been on my own for long enough");
        assert_eq!(toks(&doc), vec!["tryna", "call", "long", "enough"]);
    }

    #[test]
    fn order_is_preserved() {
        let doc = normalize("heaven imagine heaven");
        assert_eq!(toks(&doc), vec!["heaven", "imagine", "heaven"]);
    }

    #[test]
    fn non_ascii_letters_are_stripped() {
        assert_eq!(toks(&normalize("Café señorita")), vec!["caf", "seorita"]);
    }

    #[test]
    fn idempotent_on_own_output() {
        let inputs = [
            "Is this the real life? Is this just fantasy?",
            "Imagine there's no heaven, it's easy if you try",
            "12 34 !!",
            "She was more like a beauty queen from a movie scene",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once.join());
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn contractions_tokenize_like_english_words() {
        let cases: [(&str, &[&str]); 7] = [
            ("cannot stop", &["stop"]),
            ("gimme more", &["gim"]),
            ("gonna party", &["gon", "party"]),
            ("gotta go", &["got"]),
            ("lemme see", &["lem", "see"]),
            ("I wanna dance", &["wan", "dance"]),
            ("Can't Wanna-be", &["cant", "wannabe"]),
        ];
        for (input, expected) in cases {
            let doc = normalize(input);
            assert_eq!(toks(&doc), expected, "{input:?}");
            assert_eq!(normalize(&doc.join()), doc, "not idempotent for {input:?}");
        }
        assert_eq!(
            toks(&normalize("I wanna dance, gonna party, gotta go, gimme more, lemme see, cannot stop")),
            vec!["wan", "dance", "gon", "party", "got", "gim", "lem", "see", "stop"]
        );
    }

    #[test]
    fn ruleset_names_both_tables() {
        let ruleset = Normalizer::default().ruleset();
        assert!(ruleset.contains(STOPWORDS_VERSION));
        assert!(ruleset.contains(WordTokenizer::VERSION));
    }
}
