use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timestamp {input:?}: {reason}")]
pub struct ParseError {
    pub input: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
