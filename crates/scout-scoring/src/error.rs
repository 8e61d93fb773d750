use thiserror::Error;

/// Errors raised on input supplied from outside (query strings, CLI flags,
/// imported signals). Scoring itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("unknown {kind} code: '{value}'")]
    UnknownCode { kind: &'static str, value: String },

    #[error("invalid signal: {0}")]
    InvalidSignal(&'static str),
}

impl ScoringError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        ScoringError::UnknownCode {
            kind,
            value: value.to_string(),
        }
    }
}
