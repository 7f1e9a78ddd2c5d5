/// TF-IDF weighting engine
///
/// Plugs the inverse-document-frequency formula into
/// [`TfidfVectorizer`](super::TfidfVectorizer). Term frequency is always the
/// raw count of the term in the document; the engine only decides how
/// strongly rarity is rewarded. Implementations must be monotonically
/// decreasing in `doc_freq`.
pub trait TfidfEngine {
    /// Short name recorded in trained artifacts
    const NAME: &'static str;

    /// IDF of a term found in `doc_freq` of `doc_num` documents
    fn idf(doc_num: u64, doc_freq: u64) -> f64;
}

/// Smoothed IDF
///
/// `idf = ln((1 + N) / (1 + df)) + 1`
///
/// The `+1` inside acts as if one extra document contained every term, so
/// `df = N` never divides to zero; the `+1` outside keeps terms present in
/// every document at a non-zero weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmoothIdfEngine;

impl TfidfEngine for SmoothIdfEngine {
    const NAME: &'static str = "smooth-idf";

    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}
