use std::fs;
use std::sync::Arc;

use lyric_match::dataset::{read_csv, sample_records};
use lyric_match::service::Health;
use lyric_match::{CorpusBuilder, Error, LookupService, TrainedArtifact, VectorizerConfig};

const DATASET: &str = "\
Track_Name,Artists,Lyrics,Genre
Blinding Lights,The Weeknd,\"I been tryna call, I been on my own for long enough\",synthwave
Blinding Lights,The Weeknd,\"I been tryna call, I been on my own for long enough\",synthwave
Imagine,John Lennon,\"Imagine there's no heaven, it's easy if you try\",rock
Imagine,John Lennon,\"Imagine there's no heaven, it's easy if you try\",rock
Hotel California,Eagles,\"On a dark desert highway, cool wind in my hair\",rock
Hotel California,Eagles,\"On a dark desert highway, cool wind in my hair\",rock
Instrumental,Nobody,,ambient
";

#[test]
fn csv_to_prediction_through_saved_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("songs.csv");
    let artifact_path = dir.path().join("models").join("lyric_index.cbor");
    fs::write(&csv_path, DATASET).unwrap();

    let records = read_csv(&csv_path).unwrap();
    assert_eq!(records.len(), 7);

    let builder: CorpusBuilder = CorpusBuilder::new(VectorizerConfig::default());
    let (artifact, report) = builder.build(&records).unwrap();
    assert_eq!(report.discarded, 1);
    assert_eq!(report.indexed, 6);
    artifact.save(&artifact_path).unwrap();

    let service = LookupService::from_load(TrainedArtifact::load(&artifact_path));
    assert_eq!(
        service.health(),
        Health {
            model_loaded: true,
            songs_available: 6
        }
    );

    let prediction = service.predict("tryna call").unwrap();
    assert_eq!(prediction.song, "Blinding Lights");
    assert_eq!(prediction.artist, "The Weeknd");
    assert!(prediction.confidence > 0.0);

    let prediction = service.predict("On a dark desert highway, cool wind in my hair").unwrap();
    assert_eq!(prediction.song, "Hotel California");
    assert_eq!(prediction.confidence, 1.0);

    assert!(matches!(service.predict("   "), Err(Error::EmptyQuery)));
}

#[test]
fn loaded_artifact_answers_like_the_built_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.cbor");
    let (artifact, _) = CorpusBuilder::default().build(&sample_records()).unwrap();
    artifact.save(&path).unwrap();

    let built = LookupService::new(Arc::new(artifact));
    let loaded = LookupService::from_load(TrainedArtifact::load(&path));
    for snippet in [
        "tryna call",
        "glitters is gold",
        "caught in a landslide",
        "imagine all the people",
        "completely unrelated words",
    ] {
        assert_eq!(built.predict(snippet).unwrap(), loaded.predict(snippet).unwrap());
        assert_eq!(
            built.predict_top_k(snippet, 5).unwrap(),
            loaded.predict_top_k(snippet, 5).unwrap()
        );
    }
}

#[test]
fn missing_artifact_degrades_the_service() {
    let dir = tempfile::tempdir().unwrap();
    let service = LookupService::from_load(TrainedArtifact::load(&dir.path().join("absent.cbor")));
    assert!(!service.health().model_loaded);
    assert!(matches!(
        service.predict("tryna call"),
        Err(Error::ArtifactNotLoaded { .. })
    ));
}

#[test]
fn dataset_without_lyrics_column_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "title,artist\nImagine,John Lennon\n").unwrap();
    match read_csv(&path) {
        Err(Error::MissingColumns { missing, .. }) => assert_eq!(missing, vec!["lyrics"]),
        other => panic!("unexpected result: {other:?}"),
    }
}
