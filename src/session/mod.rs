pub mod matcher;
pub mod result;
pub mod state;
pub mod stats;

pub use state::TestSession;

use crate::prompt::{Difficulty, PracticeFocus};

/// Closed set of test modes. The payload is the completion limit where one
/// applies, the prompt source where the mode brings its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Finishes when the tick counter reaches the limit; the prompt repeats.
    TimeLimit(u32),
    /// Finishes after the given number of submitted words.
    WordCount(usize),
    /// Finishes when the prompt runs out.
    Infinite,
    /// Like Infinite, over a fixed focus pool instead of a difficulty text.
    Practice(PracticeFocus),
    /// Like Infinite, over user-supplied text.
    Custom(String),
}

impl Mode {
    pub fn label(&self) -> String {
        match self {
            Mode::TimeLimit(_) => "time_limit".to_string(),
            Mode::WordCount(_) => "word_count".to_string(),
            Mode::Infinite => "infinite".to_string(),
            Mode::Practice(focus) => format!("practice_{}", focus.label()),
            Mode::Custom(_) => "custom".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Finished,
}

#[derive(Clone, Debug)]
pub struct TestConfig {
    pub mode: Mode,
    pub difficulty: Difficulty,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Infinite,
            difficulty: Difficulty::Easy,
        }
    }
}
