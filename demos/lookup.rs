use std::sync::Arc;

use lyric_match::dataset::sample_records;
use lyric_match::{CorpusBuilder, LookupService, Result};

fn main() -> Result<()> {
    // build index from the built-in songs
    let (artifact, report) = CorpusBuilder::default().build(&sample_records())?;
    println!("indexed {} songs over {} terms", report.indexed, report.vocabulary_size);

    // look up a few snippets
    let service = LookupService::new(Arc::new(artifact));
    for snippet in ["tryna call on my own", "gonna find a lover at the bar", "glitters is gold"] {
        let prediction = service.predict(snippet)?;
        println!("{snippet:?} -> {} by {} ({})", prediction.song, prediction.artist, prediction.confidence);
    }

    // ranked results
    for (rank, prediction) in service.predict_top_k("desert highway wind in my hair", 3)?.iter().enumerate() {
        println!("{}. {} ({})", rank + 1, prediction.song, prediction.confidence);
    }
    Ok(())
}
