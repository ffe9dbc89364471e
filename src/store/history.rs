use std::collections::BTreeMap;

use crate::session::result::ScoreRecord;
use crate::store::json_store::ScoreStore;

/// On-disk shape of the history: score-key -> records, best first.
pub type ScoreTable = BTreeMap<String, Vec<ScoreRecord>>;

pub const MAX_RECORDS_PER_KEY: usize = 10;

#[derive(Clone, Copy, Debug)]
pub struct RecordOutcome {
    /// Strictly beat the best wpm the key held before this insert.
    pub new_best: bool,
    /// The table reached disk. False with no store attached or on a failed
    /// save; the in-memory insert stands either way.
    pub persisted: bool,
}

/// Ranked best-score table keyed by `<difficulty>_<mode>`. Loaded once at
/// startup, re-persisted after every recorded result.
pub struct ScoreHistory {
    table: ScoreTable,
    store: Option<ScoreStore>,
}

impl ScoreHistory {
    /// Reads the table through the store when one is given. Each key is
    /// re-sorted and capped on the way in, so a hand-edited file cannot
    /// break the ranking invariant.
    pub fn load(store: Option<ScoreStore>) -> Self {
        let mut table = store
            .as_ref()
            .map(ScoreStore::load_scores)
            .unwrap_or_default();
        for records in table.values_mut() {
            records.sort_by(|a, b| b.wpm.cmp(&a.wpm));
            records.truncate(MAX_RECORDS_PER_KEY);
        }
        Self { table, store }
    }

    pub fn in_memory() -> Self {
        Self {
            table: ScoreTable::default(),
            store: None,
        }
    }

    /// Inserts a finished test's record, re-ranks its key, drops anything
    /// beyond the cap, and persists the whole table. Ties keep the older
    /// record ahead, so a tying insert is never a new best and is the first
    /// evicted from a full key.
    pub fn record(&mut self, entry: ScoreRecord) -> RecordOutcome {
        let key = entry.key();
        let new_best = entry.wpm > self.best_for_key(&key);

        let records = self.table.entry(key).or_default();
        records.push(entry);
        records.sort_by(|a, b| b.wpm.cmp(&a.wpm));
        records.truncate(MAX_RECORDS_PER_KEY);

        let persisted = match &self.store {
            Some(store) => match store.save_scores(&self.table) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("could not persist scores: {e}");
                    false
                }
            },
            None => false,
        };

        RecordOutcome { new_best, persisted }
    }

    pub fn best_for(&self, difficulty: &str, mode: &str) -> u32 {
        self.best_for_key(&format!("{difficulty}_{mode}"))
    }

    fn best_for_key(&self, key: &str) -> u32 {
        self.table
            .get(key)
            .and_then(|records| records.first())
            .map(|record| record.wpm)
            .unwrap_or(0)
    }

    /// Formatted rows for every key, keys in lexical order, records best
    /// first within each key.
    pub fn leaderboard_rows(&self) -> Vec<String> {
        self.table
            .iter()
            .flat_map(|(key, records)| records.iter().map(move |r| Self::row(key, r)))
            .collect()
    }

    pub fn rows_for(&self, difficulty: &str, mode: &str) -> Vec<String> {
        let key = format!("{difficulty}_{mode}");
        self.table
            .get(&key)
            .map(|records| records.iter().map(|r| Self::row(&key, r)).collect())
            .unwrap_or_default()
    }

    fn row(key: &str, record: &ScoreRecord) -> String {
        format!(
            "{key}: {} WPM, {:.1}%, {}, {}",
            record.wpm,
            record.accuracy,
            record.mode,
            record.timestamp.to_rfc3339()
        )
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(wpm: u32) -> ScoreRecord {
        keyed_record(wpm, "easy", "time_limit")
    }

    fn keyed_record(wpm: u32, difficulty: &str, mode: &str) -> ScoreRecord {
        ScoreRecord {
            wpm,
            accuracy: 88.0,
            difficulty: difficulty.to_string(),
            mode: mode.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_first_record_with_positive_wpm_is_a_best() {
        let mut history = ScoreHistory::in_memory();
        assert!(history.record(record(30)).new_best);
        assert_eq!(history.best_for("easy", "time_limit"), 30);
    }

    #[test]
    fn test_new_best_requires_strict_improvement() {
        let mut history = ScoreHistory::in_memory();
        history.record(record(30));
        assert!(!history.record(record(30)).new_best);
        assert!(!history.record(record(29)).new_best);
        assert!(history.record(record(31)).new_best);
    }

    #[test]
    fn test_records_stay_sorted_descending() {
        let mut history = ScoreHistory::in_memory();
        for wpm in [20, 45, 31] {
            history.record(record(wpm));
        }
        let wpms: Vec<u32> = history.table()["easy_time_limit"]
            .iter()
            .map(|r| r.wpm)
            .collect();
        assert_eq!(wpms, vec![45, 31, 20]);
    }

    #[test]
    fn test_cap_evicts_the_lowest() {
        let mut history = ScoreHistory::in_memory();
        for wpm in 1..=10 {
            history.record(record(wpm));
        }
        history.record(record(25));
        let records = &history.table()["easy_time_limit"];
        assert_eq!(records.len(), MAX_RECORDS_PER_KEY);
        assert_eq!(records[0].wpm, 25);
        // The previous lowest (1 wpm) is gone.
        assert!(records.iter().all(|r| r.wpm != 1));
    }

    #[test]
    fn test_tying_insert_into_full_key_is_the_one_evicted() {
        let mut history = ScoreHistory::in_memory();
        let mut marked = keyed_record(5, "easy", "time_limit");
        marked.accuracy = 55.5;
        history.record(marked);
        for wpm in [5, 6, 7, 8, 9, 10, 11, 12, 13] {
            history.record(record(wpm));
        }
        assert_eq!(history.table()["easy_time_limit"].len(), 10);

        // An eleventh record tying the lowest wpm sorts after the older ones
        // and falls off the end.
        let outcome = history.record(record(5));
        assert!(!outcome.new_best);
        let records = &history.table()["easy_time_limit"];
        assert_eq!(records.len(), 10);
        let fives: Vec<f64> = records
            .iter()
            .filter(|r| r.wpm == 5)
            .map(|r| r.accuracy)
            .collect();
        assert_eq!(fives, vec![55.5, 88.0]);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut history = ScoreHistory::in_memory();
        history.record(keyed_record(40, "easy", "time_limit"));
        history.record(keyed_record(20, "hard", "word_count"));
        assert_eq!(history.best_for("easy", "time_limit"), 40);
        assert_eq!(history.best_for("hard", "word_count"), 20);
        assert_eq!(history.best_for("medium", "infinite"), 0);
    }

    #[test]
    fn test_in_memory_history_reports_unpersisted() {
        let mut history = ScoreHistory::in_memory();
        let outcome = history.record(record(15));
        assert!(!outcome.persisted);
    }

    #[test]
    fn test_round_trip_through_a_store() {
        let dir = TempDir::new().unwrap();

        let store = ScoreStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut history = ScoreHistory::load(Some(store));
        assert!(history.is_empty());
        assert!(history.record(keyed_record(33, "medium", "infinite")).persisted);
        history.record(keyed_record(27, "medium", "infinite"));

        let store = ScoreStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let reloaded = ScoreHistory::load(Some(store));
        let records = &reloaded.table()["medium_infinite"];
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].wpm, 33);
        assert_eq!(records[1].wpm, 27);
        assert_eq!(reloaded.best_for("medium", "infinite"), 33);
    }

    #[test]
    fn test_load_normalizes_a_hand_edited_table() {
        let dir = TempDir::new().unwrap();
        let store = ScoreStore::with_base_dir(dir.path().to_path_buf()).unwrap();

        // Unsorted and over the cap, as a tampered file might be.
        let mut table = ScoreTable::default();
        table.insert(
            "easy_infinite".to_string(),
            (1..=12).map(record).map(|mut r| {
                r.mode = "infinite".to_string();
                r
            }).collect(),
        );
        store.save_scores(&table).unwrap();

        let history = ScoreHistory::load(Some(store));
        let records = &history.table()["easy_infinite"];
        assert_eq!(records.len(), MAX_RECORDS_PER_KEY);
        assert_eq!(records[0].wpm, 12);
        assert!(records.windows(2).all(|w| w[0].wpm >= w[1].wpm));
    }

    #[test]
    fn test_leaderboard_rows_cover_all_keys_in_order() {
        let mut history = ScoreHistory::in_memory();
        history.record(keyed_record(12, "medium", "word_count"));
        history.record(keyed_record(44, "easy", "time_limit"));
        history.record(keyed_record(50, "easy", "time_limit"));

        let rows = history.leaderboard_rows();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("easy_time_limit: 50 WPM, 88.0%"));
        assert!(rows[1].starts_with("easy_time_limit: 44 WPM"));
        assert!(rows[2].starts_with("medium_word_count: 12 WPM"));
    }

    #[test]
    fn test_rows_for_unknown_key_is_empty() {
        let history = ScoreHistory::in_memory();
        assert!(history.rows_for("easy", "custom").is_empty());
    }
}
