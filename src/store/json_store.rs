use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::store::history::ScoreTable;

const SCORES_FILE: &str = "scores.json";

/// Durable home of the score table, one JSON file under the platform data
/// dir. Loading never fails the caller; saving is atomic.
pub struct ScoreStore {
    base_dir: PathBuf,
}

impl ScoreStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typrate");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self) -> PathBuf {
        self.base_dir.join(SCORES_FILE)
    }

    /// Missing or unreadable files yield an empty table; history must never
    /// block a test from starting.
    pub fn load_scores(&self) -> ScoreTable {
        let path = self.file_path();
        if !path.exists() {
            return ScoreTable::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(table) => table,
                Err(e) => {
                    log::warn!(
                        "score file {} did not parse, starting empty: {e}",
                        path.display()
                    );
                    ScoreTable::default()
                }
            },
            Err(e) => {
                log::warn!("could not read score file {}: {e}", path.display());
                ScoreTable::default()
            }
        }
    }

    /// Write-to-tmp then rename, so a crash mid-save leaves the previous
    /// file intact.
    pub fn save_scores(&self, table: &ScoreTable) -> Result<()> {
        let path = self.file_path();
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(table)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    use crate::session::result::ScoreRecord;

    fn make_test_store() -> (TempDir, ScoreStore) {
        let dir = TempDir::new().unwrap();
        let store = ScoreStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    fn record(wpm: u32) -> ScoreRecord {
        ScoreRecord {
            wpm,
            accuracy: 90.0,
            difficulty: "easy".to_string(),
            mode: "time_limit".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_load_missing_file_returns_empty_table() {
        let (_dir, store) = make_test_store();
        assert!(store.load_scores().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_returns_empty_table() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(), "{ not json ]").unwrap();
        assert!(store.load_scores().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_dir, store) = make_test_store();
        let mut table = ScoreTable::default();
        table.insert("easy_time_limit".to_string(), vec![record(40), record(30)]);
        store.save_scores(&table).unwrap();

        let loaded = store.load_scores();
        let records = &loaded["easy_time_limit"];
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].wpm, 40);
        assert_eq!(records[1].wpm, 30);
    }

    #[test]
    fn test_save_leaves_no_tmp_residue() {
        let (dir, store) = make_test_store();
        let mut table = ScoreTable::default();
        table.insert("easy_infinite".to_string(), vec![record(25)]);
        store.save_scores(&table).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(leftovers.is_empty());
        assert!(store.file_path().exists());
    }

    #[test]
    fn test_save_overwrites_previous_table() {
        let (_dir, store) = make_test_store();
        let mut table = ScoreTable::default();
        table.insert("hard_custom".to_string(), vec![record(10)]);
        store.save_scores(&table).unwrap();

        table.get_mut("hard_custom").unwrap()[0].wpm = 55;
        store.save_scores(&table).unwrap();

        assert_eq!(store.load_scores()["hard_custom"][0].wpm, 55);
    }
}
