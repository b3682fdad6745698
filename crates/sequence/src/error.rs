use thiserror::Error;

/// Configuration mistakes reported by the engine.
///
/// Layout passes themselves never fail on malformed attributes; these errors
/// only cover values handed to the engine by its host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("invalid attribute prefix {0:?}: must be non-empty and contain no whitespace")]
    InvalidPrefix(String),
    #[error("invalid breakpoint {0:?}: expected a non-negative integer width")]
    InvalidBreakpoint(String),
    #[error("invalid event name {0:?}: expected \"update\" or a breakpoint width")]
    InvalidEventName(String),
}
