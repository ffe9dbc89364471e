pub mod config;
pub mod error;
pub mod event;
pub mod prompt;
pub mod session;
pub mod store;

pub use error::EngineError;
pub use prompt::{Difficulty, PracticeFocus, Prompt};
pub use session::{Mode, Status, TestConfig, TestSession};
pub use store::{ScoreHistory, ScoreStore};
