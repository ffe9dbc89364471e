pub mod pools;

use crate::session::{Mode, TestConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Difficulty::Easy => pools::EASY_TEXT,
            Difficulty::Medium => pools::MEDIUM_TEXT,
            Difficulty::Hard => pools::HARD_TEXT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PracticeFocus {
    Numbers,
    Symbols,
    Uppercase,
    Lowercase,
    CommonWords,
}

impl PracticeFocus {
    pub fn label(&self) -> &'static str {
        match self {
            PracticeFocus::Numbers => "numbers",
            PracticeFocus::Symbols => "symbols",
            PracticeFocus::Uppercase => "uppercase",
            PracticeFocus::Lowercase => "lowercase",
            PracticeFocus::CommonWords => "common_words",
        }
    }

    /// Accepts both hyphenated (CLI) and underscored (score key) spellings.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "numbers" => Some(PracticeFocus::Numbers),
            "symbols" => Some(PracticeFocus::Symbols),
            "uppercase" => Some(PracticeFocus::Uppercase),
            "lowercase" => Some(PracticeFocus::Lowercase),
            "common-words" | "common_words" => Some(PracticeFocus::CommonWords),
            _ => None,
        }
    }

    pub fn pool(&self) -> &'static [&'static str] {
        match self {
            PracticeFocus::Numbers => pools::NUMBER_POOL,
            PracticeFocus::Symbols => pools::SYMBOL_POOL,
            PracticeFocus::Uppercase => pools::UPPERCASE_POOL,
            PracticeFocus::Lowercase => pools::LOWERCASE_POOL,
            PracticeFocus::CommonWords => pools::COMMON_WORD_POOL,
        }
    }
}

/// Ordered word sequence a session measures typing against. Immutable once
/// a test starts.
#[derive(Clone, Debug, Default)]
pub struct Prompt {
    words: Vec<String>,
}

impl Prompt {
    pub fn from_text(text: &str) -> Self {
        Self {
            words: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn from_pool(pool: &[&str]) -> Self {
        Self {
            words: pool.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Picks the word source for a test: custom text and practice pools win
    /// over the difficulty paragraph.
    pub fn resolve(config: &TestConfig) -> Self {
        match &config.mode {
            Mode::Custom(text) => Self::from_text(text),
            Mode::Practice(focus) => Self::from_pool(focus.pool()),
            _ => Self::from_text(config.difficulty.text()),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}
