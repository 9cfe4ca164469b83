//! Quiz export file parsing
//!
//! Deserializes the quiz client's JSON export: a `songs` array where each
//! entry records one play (song, artist, show, vintage, media URL). Every
//! field is optional on the wire and defaults to an empty string; an absent
//! `songs` array is an empty run, not an error.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Top-level export document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizExport {
    /// Quiz room name (informational only)
    #[serde(rename = "roomName", default)]
    pub room_name: String,

    /// One entry per quiz play event
    #[serde(default)]
    pub songs: Vec<SongEntry>,
}

/// One played song in the export
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongEntry {
    #[serde(rename = "songNumber", default)]
    pub song_number: u32,

    #[serde(rename = "songInfo", default)]
    pub song_info: SongInfo,

    /// Media locator for the played clip
    #[serde(rename = "videoUrl", default)]
    pub video_url: String,
}

/// Song metadata nested under each entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongInfo {
    #[serde(default)]
    pub artist: String,

    #[serde(rename = "songName", default)]
    pub song_name: String,

    #[serde(rename = "animeNames", default)]
    pub anime_names: AnimeNames,

    /// Free-text season/year label, e.g. "Summer 2016"
    #[serde(default)]
    pub vintage: String,
}

/// Show names in both display forms
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimeNames {
    #[serde(default)]
    pub english: String,

    #[serde(default)]
    pub romaji: String,
}

/// Flattened view of one export entry, as consumed by the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayRecord {
    pub artist: String,
    pub song: String,
    /// Show display name (matching key, together with vintage)
    pub show: String,
    /// Transliterated show name; carried through but never matched on
    pub show_alt: String,
    pub vintage: String,
    pub media_url: String,
}

impl PlayRecord {
    /// Short human label for progress output and per-record reporting
    pub fn label(&self) -> String {
        format!("\"{}\" by {}", self.song, self.artist)
    }
}

impl QuizExport {
    /// Read and parse an export file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Flatten export entries into play records, preserving file order
    pub fn records(&self) -> Vec<PlayRecord> {
        self.songs
            .iter()
            .map(|entry| PlayRecord {
                artist: entry.song_info.artist.clone(),
                song: entry.song_info.song_name.clone(),
                show: entry.song_info.anime_names.english.clone(),
                show_alt: entry.song_info.anime_names.romaji.clone(),
                vintage: entry.song_info.vintage.clone(),
                media_url: entry.video_url.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_entry() {
        let json = r#"{
            "roomName": "Ranked",
            "songs": [{
                "songNumber": 1,
                "songInfo": {
                    "animeNames": {"english": "Your Name.", "romaji": "Kimi no Na wa."},
                    "artist": "RADWIMPS",
                    "songName": "Zen Zen Zense movie ver.",
                    "vintage": "Summer 2016"
                },
                "videoUrl": "https://example.com/zzz.webm"
            }]
        }"#;

        let export: QuizExport = serde_json::from_str(json).unwrap();
        let records = export.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].artist, "RADWIMPS");
        assert_eq!(records[0].show, "Your Name.");
        assert_eq!(records[0].show_alt, "Kimi no Na wa.");
        assert_eq!(records[0].vintage, "Summer 2016");
        assert_eq!(records[0].media_url, "https://example.com/zzz.webm");
    }

    #[test]
    fn test_missing_fields_default_empty() {
        let json = r#"{"songs": [{"songInfo": {"songName": "Hitohira"}}]}"#;
        let export: QuizExport = serde_json::from_str(json).unwrap();
        let records = export.records();
        assert_eq!(records[0].song, "Hitohira");
        assert_eq!(records[0].artist, "");
        assert_eq!(records[0].show, "");
        assert_eq!(records[0].media_url, "");
    }

    #[test]
    fn test_absent_songs_yields_zero_records() {
        let export: QuizExport = serde_json::from_str(r#"{"roomName": "Empty"}"#).unwrap();
        assert!(export.records().is_empty());
    }

    #[test]
    fn test_record_label() {
        let record = PlayRecord {
            song: "snowspring".to_string(),
            artist: "ChoQMay".to_string(),
            ..Default::default()
        };
        assert_eq!(record.label(), "\"snowspring\" by ChoQMay");
    }
}
