use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::EngineError;
use crate::prompt::Prompt;
use crate::session::matcher::{self, CharVerdict, WordComparison};
use crate::session::result::ScoreRecord;
use crate::session::{Mode, Status, TestConfig};

#[derive(Clone, Debug)]
pub enum SubmitOutcome {
    /// Submission was blank after trimming; nothing advanced.
    Ignored,
    Advanced(WordComparison),
    Finished(WordComparison, ScoreRecord),
}

#[derive(Clone, Debug)]
pub enum TickOutcome {
    Running,
    Finished(ScoreRecord),
}

/// One typing test. Owns every counter for its lifetime; `start` replaces
/// the whole aggregate rather than patching fields, so no stale state can
/// leak between runs.
///
/// Timing is tick-count based: `elapsed_secs` only moves when the host calls
/// `tick`, which keeps every completion and stats path deterministic.
/// `started_at` is a wall-clock label for display, never an input to timing.
pub struct TestSession {
    pub prompt: Prompt,
    pub config: TestConfig,
    pub word_index: usize,
    pub elapsed_secs: u32,
    pub total_correct_chars: usize,
    pub total_typed_chars: usize,
    pub correct_words: usize,
    /// Elapsed seconds at each fully-correct submission, in order.
    pub word_times: Vec<u32>,
    /// Target characters the user got wrong, tallied across the session.
    pub char_errors: HashMap<char, u32>,
    pub status: Status,
    pub started_at: Option<DateTime<Utc>>,
    pub final_record: Option<ScoreRecord>,
}

impl TestSession {
    pub fn new() -> Self {
        Self {
            prompt: Prompt::default(),
            config: TestConfig::default(),
            word_index: 0,
            elapsed_secs: 0,
            total_correct_chars: 0,
            total_typed_chars: 0,
            correct_words: 0,
            word_times: Vec::new(),
            char_errors: HashMap::new(),
            status: Status::Idle,
            started_at: None,
            final_record: None,
        }
    }

    /// Idle -> Running. Rejects configurations that could never finish a
    /// word: an empty prompt, blank custom text, or a zero limit.
    pub fn start(&mut self, prompt: Prompt, config: TestConfig) -> Result<(), EngineError> {
        if self.status != Status::Idle {
            return Err(EngineError::InvalidState("start"));
        }
        if let Mode::Custom(text) = &config.mode {
            if text.trim().is_empty() {
                return Err(EngineError::InvalidConfiguration(
                    "custom text is blank".to_string(),
                ));
            }
        }
        if prompt.is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "prompt has no words".to_string(),
            ));
        }
        match config.mode {
            Mode::TimeLimit(0) => {
                return Err(EngineError::InvalidConfiguration(
                    "time limit must be at least 1 second".to_string(),
                ));
            }
            Mode::WordCount(0) => {
                return Err(EngineError::InvalidConfiguration(
                    "word limit must be at least 1 word".to_string(),
                ));
            }
            _ => {}
        }

        *self = Self {
            prompt,
            config,
            status: Status::Running,
            started_at: Some(Utc::now()),
            ..Self::new()
        };
        Ok(())
    }

    /// Scores one submitted word against the current target and advances.
    /// Trims the input first; a submission that is blank after trimming is
    /// ignored rather than consuming a word.
    pub fn submit_word(&mut self, typed: &str) -> Result<SubmitOutcome, EngineError> {
        if self.status != Status::Running {
            return Err(EngineError::InvalidState("submit_word"));
        }
        let typed = typed.trim();
        if typed.is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        let comparison = matcher::compare(&self.prompt.words()[self.word_index], typed);

        self.total_correct_chars += comparison.correct_chars;
        self.total_typed_chars += comparison.compared_chars;
        for check in &comparison.chars {
            // Incorrect and Missing both point at a target character; Extra
            // has none to blame and only widens the denominator.
            if matches!(check.verdict, CharVerdict::Incorrect | CharVerdict::Missing) {
                *self.char_errors.entry(check.ch).or_insert(0) += 1;
            }
        }
        if comparison.full_match {
            self.correct_words += 1;
            self.word_times.push(self.elapsed_secs);
        }

        self.word_index += 1;

        let finished = match &self.config.mode {
            Mode::TimeLimit(_) => {
                // The prompt repeats; only the tick counter can finish this mode.
                if self.word_index >= self.prompt.len() {
                    self.word_index = 0;
                }
                false
            }
            Mode::WordCount(limit) => {
                self.word_index >= *limit || self.word_index >= self.prompt.len()
            }
            Mode::Infinite | Mode::Practice(_) | Mode::Custom(_) => {
                self.word_index >= self.prompt.len()
            }
        };

        if finished {
            let record = self.finish();
            Ok(SubmitOutcome::Finished(comparison, record))
        } else {
            Ok(SubmitOutcome::Advanced(comparison))
        }
    }

    /// Advances the session clock by one second. Time-limited tests finish
    /// here and nowhere else.
    pub fn tick(&mut self) -> Result<TickOutcome, EngineError> {
        if self.status != Status::Running {
            return Err(EngineError::InvalidState("tick"));
        }
        self.elapsed_secs += 1;
        if let Mode::TimeLimit(limit) = self.config.mode {
            if self.elapsed_secs >= limit {
                return Ok(TickOutcome::Finished(self.finish()));
            }
        }
        Ok(TickOutcome::Running)
    }

    /// Per-character verdicts for a partially typed word. Pure query for
    /// live highlighting; no counter moves.
    pub fn live_preview(&self, partial: &str) -> Result<WordComparison, EngineError> {
        if self.status != Status::Running {
            return Err(EngineError::InvalidState("live_preview"));
        }
        Ok(matcher::compare(
            &self.prompt.words()[self.word_index],
            partial.trim(),
        ))
    }

    /// Forces Finished without producing a record. Idempotent; the host may
    /// call it on teardown regardless of state.
    pub fn abort(&mut self) {
        self.status = Status::Finished;
    }

    /// Discards the session wholesale and returns to Idle.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }

    pub fn current_word(&self) -> Option<&str> {
        self.prompt.word(self.word_index)
    }

    /// Preview of the upcoming word. Does not wrap, so the last word of a
    /// time-limited prompt previews nothing.
    pub fn next_word(&self) -> Option<&str> {
        self.prompt.word(self.word_index + 1)
    }

    pub fn progress_fraction(&self) -> f64 {
        if self.status == Status::Idle {
            return 0.0;
        }
        let progress = match &self.config.mode {
            Mode::TimeLimit(limit) => f64::from(self.elapsed_secs) / f64::from(*limit),
            Mode::WordCount(limit) => self.word_index as f64 / *limit as f64,
            _ => {
                if self.prompt.is_empty() {
                    0.0
                } else {
                    self.word_index as f64 / self.prompt.len() as f64
                }
            }
        };
        progress.clamp(0.0, 1.0)
    }

    fn finish(&mut self) -> ScoreRecord {
        self.status = Status::Finished;
        let record = ScoreRecord::from_session(self);
        self.final_record = Some(record.clone());
        record
    }
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}
