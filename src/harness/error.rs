use std::path::PathBuf;

use thiserror::Error;

use crate::propagate::PropagationError;
use crate::timescale::ParseError;
use crate::visibility::{Stage, VisibilityError};

#[derive(Debug, Error)]
pub enum CaseError {
    #[error("test data directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("test case not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid step {0}: must be a positive whole number of seconds")]
    InvalidStep(i64),
    #[error(transparent)]
    Visibility(#[from] VisibilityError),
}

impl From<ParseError> for CaseError {
    fn from(err: ParseError) -> Self {
        CaseError::Visibility(err.into())
    }
}

impl From<PropagationError> for CaseError {
    fn from(err: PropagationError) -> Self {
        CaseError::Visibility(err.into())
    }
}

impl CaseError {
    /// The computation stage that failed, if the failure came from the core.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            CaseError::Visibility(e) => Some(e.stage()),
            _ => None,
        }
    }
}
