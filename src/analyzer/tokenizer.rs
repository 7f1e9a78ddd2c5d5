//! Tokenization of already-cleaned text.

/// Splits cleaned text into word tokens.
///
/// Implementations must be deterministic: the same input always yields the
/// same tokens in the same order. [`Tokenizer::VERSION`] is recorded in trained
/// artifacts so an index is never queried with different tokenization rules
/// than it was built with.
pub trait Tokenizer: Send + Sync {
    /// Version tag of the tokenization rules.
    const VERSION: &'static str;

    /// Tokenize `text`, which contains only lowercase ASCII letters and
    /// whitespace.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Contractions an English word tokenizer splits even without apostrophes,
/// as (whole word, byte offset of the split).
pub const CONTRACTIONS: &[(&str, usize)] = &[
    ("cannot", 3),
    ("gimme", 3),
    ("gonna", 3),
    ("gotta", 3),
    ("lemme", 3),
    ("wanna", 3),
];

/// English word tokenizer for letter-and-whitespace text.
///
/// Words are the whitespace runs (any Unicode whitespace). A word equal to
/// one of [`CONTRACTIONS`] is split in two: `gonna` gives `gon` and `na`,
/// `cannot` gives `can` and `not`. Other words are kept whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    const VERSION: &'static str = "word-2";

    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut tokens = Vec::new();
        for word in text.split_whitespace() {
            match CONTRACTIONS.iter().find(|(whole, _)| *whole == word) {
                Some(&(_, at)) => {
                    let (head, tail) = word.split_at(at);
                    tokens.push(head);
                    tokens.push(tail);
                }
                None => tokens.push(word),
            }
        }
        tokens
    }
}
