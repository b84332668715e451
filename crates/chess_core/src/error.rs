use thiserror::Error;

/// Errors reported by the rules adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },
    #[error("cannot parse move `{0}`")]
    InvalidMove(String),
    #[error("illegal move {0} in this position")]
    IllegalMove(String),
}
