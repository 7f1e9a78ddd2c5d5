use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::vectorizer::TfidfMatrix;

use super::{CorpusIndex, SongEntry};

impl<'de> Deserialize<'de> for CorpusIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // 検証前の生データ
        #[derive(Deserialize)]
        struct CorpusIndexHelper {
            entries: Vec<SongEntry>,
            matrix: TfidfMatrix,
            dim: usize,
        }

        let helper = CorpusIndexHelper::deserialize(deserializer)?;
        CorpusIndex::new(helper.entries, helper.matrix, helper.dim).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::normalize;
    use crate::utils::math::vector::SparseVec;

    fn entry(name: &str) -> SongEntry {
        SongEntry {
            song_name: name.to_string(),
            artist: "Artist".to_string(),
            normalized_lyrics: normalize("some lyric words"),
        }
    }

    #[test]
    fn cbor_round_trip_keeps_pairing() {
        let rows = vec![
            SparseVec::from_pairs(3, vec![(0, 0.6), (2, 0.8)]),
            SparseVec::from_pairs(3, vec![(1, 1.0)]),
        ];
        let index = CorpusIndex::new(vec![entry("a"), entry("b")], rows, 3).unwrap();
        let bytes = serde_cbor::to_vec(&index).unwrap();
        let de: CorpusIndex = serde_cbor::from_slice(&bytes).unwrap();
        assert_eq!(de, index);
    }

    #[test]
    fn diverging_entries_and_rows_are_rejected() {
        let bad = serde_json::json!({
            "entries": [
                { "song_name": "a", "artist": "x", "normalized_lyrics": ["some"] },
                { "song_name": "b", "artist": "y", "normalized_lyrics": ["words"] }
            ],
            "matrix": [ { "len": 3, "entries": [[0, 1.0]] } ],
            "dim": 3
        });
        let err = serde_json::from_value::<CorpusIndex>(bad).unwrap_err();
        assert!(err.to_string().contains("matrix rows"));
    }
}
