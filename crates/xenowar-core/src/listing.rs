//! Save-slot listing for the load/save browser.
//!
//! Scans the codec's folder for `.sav` files and reads only the summary
//! document of each. A file that cannot be read or parsed is logged and
//! skipped so one corrupt save never hides the rest.

use std::collections::BTreeMap;
use std::path::Path;

use crate::persistence::SaveCodec;
use crate::time::GameTime;

/// A minimal string table. Lookup falls back to the key itself so a
/// missing translation degrades visibly instead of failing.
#[derive(Debug, Clone, Default)]
pub struct Localization {
    strings: BTreeMap<String, String>,
}

impl Localization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.strings.insert(key.to_string(), value.to_string());
    }

    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }
}

/// One row of the save browser: slot name plus the saved in-game date,
/// already localized for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveListRow {
    pub slot: String,
    pub time: String,
    pub day: String,
    pub month: String,
    pub year: String,
}

/// Receives rows as the listing produces them. The browser screen
/// implements this over its table widget; tests collect into a `Vec`.
pub trait RowSink {
    fn push_row(&mut self, row: SaveListRow);
}

impl RowSink for Vec<SaveListRow> {
    fn push_row(&mut self, row: SaveListRow) {
        self.push(row);
    }
}

/// List every readable save in the codec's folder, in file-name order.
/// Returns the number of rows pushed.
pub fn list_saves(
    codec: &SaveCodec,
    lang: &Localization,
    sink: &mut dyn RowSink,
) -> Result<usize, std::io::Error> {
    let mut paths: Vec<_> = std::fs::read_dir(codec.dir())?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().map(|ext| ext == "sav").unwrap_or(false))
        .collect();
    paths.sort();

    let mut rows = 0;
    for path in &paths {
        match codec.read_summary(path) {
            Ok(summary) => {
                sink.push_row(make_row(path, &summary.time, lang));
                rows += 1;
            }
            Err(err) => {
                log::warn!("skipping unreadable save {}: {}", path.display(), err);
            }
        }
    }
    Ok(rows)
}

fn make_row(path: &Path, time: &GameTime, lang: &Localization) -> SaveListRow {
    let slot = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    SaveListRow {
        slot,
        time: time.time_string(),
        day: format!("{}{}", time.day, lang.get(time.day_suffix_key())),
        month: lang.get(time.month_key()).to_string(),
        year: time.year.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{CampaignState, Difficulty};
    use std::fs;

    fn english() -> Localization {
        let mut lang = Localization::new();
        lang.insert("STR_ST", "st");
        lang.insert("STR_JAN", "Jan");
        lang.insert("STR_FEB", "Feb");
        lang
    }

    #[test]
    fn lists_valid_saves_and_skips_corrupt_ones() {
        let dir = tempfile::tempdir().unwrap();
        let codec = SaveCodec::new(dir.path(), "0.9");
        let state = CampaignState::new(Difficulty::Beginner, 7);
        codec.save(&state, "alpha").unwrap();
        fs::write(dir.path().join("broken.sav"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a save").unwrap();

        let mut rows: Vec<SaveListRow> = Vec::new();
        let count = list_saves(&codec, &english(), &mut rows).unwrap();

        assert_eq!(count, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].slot, "alpha");
        assert_eq!(rows[0].time, "12:00");
        assert_eq!(rows[0].day, "1st");
        assert_eq!(rows[0].month, "Jan");
        assert_eq!(rows[0].year, "1999");
    }

    #[test]
    fn mismatched_version_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let old = SaveCodec::new(dir.path(), "0.8");
        let new = SaveCodec::new(dir.path(), "0.9");
        let state = CampaignState::new(Difficulty::Beginner, 7);
        old.save(&state, "legacy").unwrap();
        new.save(&state, "current").unwrap();

        let mut rows: Vec<SaveListRow> = Vec::new();
        let count = list_saves(&new, &english(), &mut rows).unwrap();

        assert_eq!(count, 1);
        assert_eq!(rows[0].slot, "current");
    }

    #[test]
    fn missing_translation_falls_back_to_the_key() {
        let lang = Localization::new();
        assert_eq!(lang.get("STR_MAR"), "STR_MAR");
    }
}
