pub mod history;
pub mod json_store;

pub use history::ScoreHistory;
pub use json_store::ScoreStore;
