use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Operation arrived outside the Running state. Hosts may race UI events
    /// against test completion, so this is safe to log and drop.
    #[error("`{0}` requires a running test")]
    InvalidState(&'static str),
}
