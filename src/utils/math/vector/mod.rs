pub mod math;
pub mod serde;

use std::fmt::Debug;

use num::Float;

/// SparseVec は 0 要素を疎として持つベクトルです
/// indices と values を並列に持ち、
/// indices は要素のインデックス、values は要素の値を保持します
///
/// 要素は indices の昇順でソートされていることを保証します
/// 0 の値は保持しません
#[derive(Clone, PartialEq)]
pub struct SparseVec<N>
where
    N: Float,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> SparseVec<N>
where
    N: Float,
{
    /// Create an all-zero vector of dimension `len`
    #[inline]
    pub fn zeros(len: usize) -> Self {
        Self {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    /// Build from `(index, value)` pairs in any order.
    /// Zero values are dropped. Indices must be unique and `< len`.
    pub fn from_pairs(len: usize, mut pairs: Vec<(u32, N)>) -> Self {
        pairs.retain(|(_, v)| !v.is_zero());
        pairs.sort_unstable_by_key(|(i, _)| *i);
        debug_assert!(
            pairs.windows(2).all(|w| w[0].0 < w[1].0),
            "duplicate index in sparse vector input"
        );
        debug_assert!(pairs.last().map_or(true, |(i, _)| (*i as usize) < len));
        let (inds, vals) = pairs.into_iter().unzip();
        Self { inds, vals, len }
    }

    /// Dimension of the vector
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// `true` when every component is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// Component at `index`, zero when not stored.
    /// `None` when `index` is out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        let key = u32::try_from(index).ok()?;
        match self.inds.binary_search(&key) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate over the stored `(index, value)` pairs in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(i, v)| (*i as usize, *v))
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }
}

impl<N> Debug for SparseVec<N>
where
    N: Float + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "SparseVec {{ len: {}, nnz: {} }} [", self.len, self.nnz())?;
            for (i, v) in self.inds.iter().zip(self.vals.iter()) {
                writeln!(f, "    {}: {:?}", i, v)?;
            }
            write!(f, "]")
        } else {
            f.debug_struct("SparseVec")
                .field("len", &self.len)
                .field("entries", &self.inds.iter().zip(self.vals.iter()).collect::<Vec<_>>())
                .finish()
        }
    }
}
