//! Similarity index over the corpus matrix.
//!
//! A [`CorpusIndex`] pairs every [`SongEntry`] with its TF-IDF row. Rows are
//! L2-normalized (or zero) and so is every query vector, so cosine
//! similarity reduces to the dot product.

pub mod try_serde;

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analyzer::NormalizedDocument;
use crate::error::{Error, Result};
use crate::vectorizer::{TfidfMatrix, TfidfVector};

/// A known song. Identified by its position in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongEntry {
    pub song_name: String,
    pub artist: String,
    pub normalized_lyrics: NormalizedDocument,
}

/// One scored index entry
#[derive(Clone, Copy, PartialEq)]
pub struct Hit<'a> {
    /// row of the entry in the index
    pub index: usize,
    pub entry: &'a SongEntry,
    /// cosine similarity in [0, 1]
    pub score: f64,
}

impl fmt::Debug for Hit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {:?} by {:?}: {:.6}",
            self.index, self.entry.song_name, self.entry.artist, self.score
        )
    }
}

/// Songs paired 1:1 with the rows of their TF-IDF matrix.
///
/// Row `i` always belongs to entry `i`; both are fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusIndex {
    entries: Vec<SongEntry>,
    matrix: TfidfMatrix,
    /// vocabulary dimension shared by every row
    dim: usize,
}

impl CorpusIndex {
    /// Pair entries with matrix rows.
    ///
    /// # Errors
    /// [`Error::CorruptArtifact`] when the lengths differ or a row does not
    /// have dimension `dim`.
    pub fn new(entries: Vec<SongEntry>, matrix: TfidfMatrix, dim: usize) -> Result<Self> {
        if entries.len() != matrix.len() {
            return Err(Error::CorruptArtifact {
                reason: format!("{} entries but {} matrix rows", entries.len(), matrix.len()),
            });
        }
        if let Some((row, vec)) = matrix.iter().enumerate().find(|(_, vec)| vec.len() != dim) {
            return Err(Error::CorruptArtifact {
                reason: format!("row {} has dimension {} (expected {})", row, vec.len(), dim),
            });
        }
        Ok(Self { entries, matrix, dim })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[SongEntry] {
        &self.entries
    }

    pub fn matrix(&self) -> &TfidfMatrix {
        &self.matrix
    }

    /// Entry and row at `index`
    pub fn get(&self, index: usize) -> Option<(&SongEntry, &TfidfVector)> {
        Some((self.entries.get(index)?, self.matrix.get(index)?))
    }

    /// Similarity of `query` to every row, in row order
    pub fn scores(&self, query: &TfidfVector) -> Vec<f64> {
        debug_assert_eq!(query.len(), self.dim, "query dimension does not match the index");
        self.matrix.par_iter().map(|row| row.dot(query)).collect()
    }

    /// Best-matching entry.
    ///
    /// Ties go to the lowest index. A zero query scores 0 everywhere and
    /// therefore returns entry 0 with score 0.0; callers that need a
    /// confidence floor must check the score themselves.
    ///
    /// # Errors
    /// [`Error::EmptyIndex`] when the index has no rows.
    pub fn query(&self, query: &TfidfVector) -> Result<Hit<'_>> {
        let scores = self.scores(query);
        let mut best = 0;
        for (i, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = i;
            }
        }
        match scores.get(best) {
            Some(score) => Ok(self.hit(best, *score)),
            None => Err(Error::EmptyIndex),
        }
    }

    /// Up to `k` best entries, by score descending then index ascending.
    /// The first hit is always the one [`CorpusIndex::query`] returns.
    ///
    /// # Errors
    /// [`Error::EmptyIndex`] when the index has no rows.
    pub fn query_top_k(&self, query: &TfidfVector, k: usize) -> Result<Vec<Hit<'_>>> {
        if self.is_empty() {
            return Err(Error::EmptyIndex);
        }
        let scores = self.scores(query);
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then_with(|| a.cmp(&b)));
        order.truncate(k);
        Ok(order.into_iter().map(|i| self.hit(i, scores[i])).collect())
    }

    #[inline]
    fn hit(&self, index: usize, score: f64) -> Hit<'_> {
        Hit {
            index,
            entry: &self.entries[index],
            score,
        }
    }
}
