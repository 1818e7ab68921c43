use thiserror::Error;

/// Raised when an identifier cannot be parsed from text (CLI flags, env vars, DOM values).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse {kind} from {raw:?}")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub raw: String,
}
