use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::state::TestSession;
use crate::session::stats;

/// Immutable snapshot taken at test completion; the only thing the score
/// history ever stores.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub wpm: u32,
    pub accuracy: f64,
    pub difficulty: String,
    pub mode: String,
    pub timestamp: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn from_session(session: &TestSession) -> Self {
        Self {
            wpm: stats::wpm(session),
            accuracy: stats::accuracy_percent(session),
            difficulty: session.config.difficulty.label().to_string(),
            mode: session.config.mode.label(),
            timestamp: Utc::now(),
        }
    }

    /// History key; difficulty and mode label joined the way the score file
    /// spells it.
    pub fn key(&self) -> String {
        format!("{}_{}", self.difficulty, self.mode)
    }
}
