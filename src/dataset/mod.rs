//! Dataset ingestion.
//!
//! Turns a headed CSV into [`LyricRecord`]s. The three required fields are
//! located by matching header names (case-insensitively) against a
//! prioritized candidate list; the first candidate present wins.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Candidate headers for the lyrics column, in priority order.
pub const LYRICS_COLUMNS: &[&str] = &["lyrics", "lyric", "text", "song_lyrics", "lyrics_text"];

/// Candidate headers for the song name column, in priority order.
pub const SONG_NAME_COLUMNS: &[&str] = &["song_name", "track_name", "name", "title", "song", "track", "song_title"];

/// Candidate headers for the artist column, in priority order.
pub const ARTIST_COLUMNS: &[&str] = &["artist", "artist_name", "artists", "artist_name(s)", "artist_names", "artist(s)"];

/// One training record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricRecord {
    pub lyrics: String,
    pub song_name: String,
    pub artist: String,
}

impl LyricRecord {
    pub fn new(lyrics: &str, song_name: &str, artist: &str) -> Self {
        Self {
            lyrics: lyrics.to_string(),
            song_name: song_name.to_string(),
            artist: artist.to_string(),
        }
    }
}

/// Positions of the required fields within a CSV row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub lyrics: usize,
    pub song_name: usize,
    pub artist: usize,
}

impl ColumnMapping {
    /// Resolve the required fields against `headers`.
    ///
    /// # Errors
    /// [`Error::MissingColumns`] listing every field with no matching header.
    pub fn detect<S>(headers: &[S]) -> Result<Self>
    where
        S: AsRef<str>,
    {
        let lowered: Vec<String> = headers.iter().map(|h| h.as_ref().trim().to_lowercase()).collect();
        let find = |candidates: &[&str]| {
            candidates
                .iter()
                .find_map(|candidate| lowered.iter().position(|h| h == candidate))
        };

        let lyrics = find(LYRICS_COLUMNS);
        let song_name = find(SONG_NAME_COLUMNS);
        let artist = find(ARTIST_COLUMNS);
        match (lyrics, song_name, artist) {
            (Some(lyrics), Some(song_name), Some(artist)) => Ok(Self { lyrics, song_name, artist }),
            _ => {
                let missing = [("lyrics", lyrics), ("song_name", song_name), ("artist", artist)]
                    .into_iter()
                    .filter(|(_, found)| found.is_none())
                    .map(|(field, _)| field)
                    .collect();
                Err(Error::MissingColumns {
                    missing,
                    available: headers.iter().map(|h| h.as_ref().to_string()).collect(),
                })
            }
        }
    }
}

/// Read every record of the CSV file at `path`.
pub fn read_csv(path: &Path) -> Result<Vec<LyricRecord>> {
    let file = std::fs::File::open(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_csv_from(file)?;
    info!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(records)
}

/// Read every record of a CSV stream.
///
/// Short rows read their missing cells as empty strings.
pub fn read_csv_from<R>(reader: R) -> Result<Vec<LyricRecord>>
where
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mapping = ColumnMapping::detect(&headers)?;
    info!(
        lyrics = %headers[mapping.lyrics],
        song_name = %headers[mapping.song_name],
        artist = %headers[mapping.artist],
        "column mapping detected"
    );

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |i: usize| row.get(i).unwrap_or_default().to_string();
        records.push(LyricRecord {
            lyrics: cell(mapping.lyrics),
            song_name: cell(mapping.song_name),
            artist: cell(mapping.artist),
        });
    }
    Ok(records)
}

/// Write `records` as a headed CSV (`lyrics,song_name,artist`) that
/// [`read_csv`] reads back, creating parent directories.
pub fn write_csv(path: &Path, records: &[LyricRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Read the dataset at `path`, first writing [`sample_records`] there when
/// no file exists, so later runs train on the same file.
pub fn read_csv_or_create_sample(path: &Path) -> Result<Vec<LyricRecord>> {
    if !path.exists() {
        warn!(path = %path.display(), "dataset not found, writing the built-in sample songs");
        write_csv(path, &sample_records())?;
    }
    read_csv(path)
}

/// Built-in sample corpus: ten well-known songs, each repeated five times.
///
/// Repetition gives every term a document frequency of at least 5 out of
/// 50, so the default document-frequency window keeps the songs' vocabulary.
pub fn sample_records() -> Vec<LyricRecord> {
    const SONGS: &[(&str, &str, &str)] = &[
        ("Blinding Lights", "The Weeknd", "I been tryna call I been on my own for long enough Maybe you can show me how to love maybe"),
        ("Shape of You", "Ed Sheeran", "The club isnt the best place to find a lover So the bar is where I go Me and my friends at the table doing shots"),
        ("Someone Like You", "Adele", "I heard that you settled down That you found a girl and youre married now I heard that your dreams came true"),
        ("Bohemian Rhapsody", "Queen", "Is this the real life Is this just fantasy Caught in a landslide No escape from reality"),
        ("Hotel California", "Eagles", "On a dark desert highway cool wind in my hair Warm smell of colitas rising up through the air"),
        ("Stairway to Heaven", "Led Zeppelin", "Theres a lady whos sure all that glitters is gold And shes buying a stairway to heaven"),
        ("Billie Jean", "Michael Jackson", "She was more like a beauty queen from a movie scene I said dont mind but what do you mean I am the one"),
        ("Sweet Child O Mine", "Guns N' Roses", "She has a smile that it seems to me Reminds me of childhood memories Where everything was as fresh as the bright blue sky"),
        ("Imagine", "John Lennon", "Imagine theres no heaven Its easy if you try No hell below us Above us only sky"),
        ("Like a Rolling Stone", "Bob Dylan", "Once upon a time you dressed so fine You threw the bums a dime in your prime didnt you"),
    ];

    (0..5)
        .flat_map(|_| SONGS.iter())
        .map(|(song_name, artist, lyrics)| LyricRecord::new(lyrics, song_name, artist))
        .collect()
}
