use thiserror::Error;

use super::MinutesSinceEpoch;

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("invalid tle format: expected 2 or 3 non-empty lines, got {0}")]
    InvalidTleFormat(usize),
    #[error("invalid tle: {0}")]
    InvalidTle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
    #[error("propagation failed at {} min since epoch: {message}", .minutes.0)]
    Propagation {
        minutes: MinutesSinceEpoch,
        message: String,
    },
}
