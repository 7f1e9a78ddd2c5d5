use num::Float;
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SparseVec;

impl<N> Serialize for SparseVec<N>
where
    N: Float + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // len と entries (index, value) の組で出力する
        let mut state = serializer.serialize_struct("SparseVec", 2)?;
        state.serialize_field("len", &(self.len as u64))?;
        let entries: Vec<(u32, N)> = self
            .inds
            .iter()
            .copied()
            .zip(self.vals.iter().copied())
            .collect();
        state.serialize_field("entries", &entries)?;
        state.end()
    }
}

impl<'de, N> Deserialize<'de> for SparseVec<N>
where
    N: Float + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct SparseVecData<N> {
            len: u64,
            entries: Vec<(u32, N)>,
        }

        let data = SparseVecData::<N>::deserialize(deserializer)?;
        let len = usize::try_from(data.len).map_err(D::Error::custom)?;

        // 昇順かつ範囲内であることを検証する
        if !data.entries.windows(2).all(|w| w[0].0 < w[1].0) {
            return Err(D::Error::custom("sparse vector indices are not strictly ascending"));
        }
        if let Some((last, _)) = data.entries.last() {
            if *last as usize >= len {
                return Err(D::Error::custom(format!(
                    "sparse vector index {} out of range for length {}",
                    last, len
                )));
            }
        }

        let (inds, vals) = data.entries.into_iter().unzip();
        Ok(SparseVec { inds, vals, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cbor_preserves_entries() {
        let v = SparseVec::from_pairs(8, vec![(1, 0.25_f32), (6, 0.75)]);
        let bytes = serde_cbor::to_vec(&v).unwrap();
        let de: SparseVec<f32> = serde_cbor::from_slice(&bytes).unwrap();
        assert_eq!(de, v);
    }

    #[test]
    fn rejects_unsorted_entries() {
        let bad = serde_json::json!({ "len": 4, "entries": [[2, 1.0], [1, 1.0]] });
        assert!(serde_json::from_value::<SparseVec<f32>>(bad).is_err());
    }

    #[test]
    fn rejects_out_of_range_index() {
        let bad = serde_json::json!({ "len": 2, "entries": [[2, 1.0]] });
        assert!(serde_json::from_value::<SparseVec<f32>>(bad).is_err());
    }
}
