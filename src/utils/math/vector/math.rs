use std::cmp::Ordering;

use num::Float;

use super::SparseVec;

impl<N> SparseVec<N>
where
    N: Float + Into<f64>,
{
    /// ドット積を計算するメソッド
    /// 積和は f64 で累積します
    ///
    /// # Arguments
    /// * `other` - 他のベクトル
    ///
    /// # Returns
    /// * `f64` - ドット積の結果
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = 0_f64;
        if self.is_zero() || other.is_zero() {
            return result;
        }

        let mut i = 0;
        let mut j = 0;
        while i < self.inds.len() && j < other.inds.len() {
            match self.inds[i].cmp(&other.inds[j]) {
                Ordering::Equal => {
                    result += self.vals[i].into() * other.vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    /// 二乗ノルム
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.vals
            .iter()
            .map(|v| {
                let v: f64 = (*v).into();
                v * v
            })
            .sum()
    }

    /// ユークリッドノルム
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// L2 正規化
    /// ゼロベクトルはそのまま (ゼロ除算しない)
    pub fn l2_normalize(&mut self) {
        let norm = self
            .vals
            .iter()
            .fold(N::zero(), |acc, v| acc + *v * *v)
            .sqrt();
        if norm.is_zero() {
            return;
        }
        for v in &mut self.vals {
            *v = *v / norm;
        }
    }
}
