use thiserror::Error;

use crate::geometry::GeometryError;
use crate::propagate::PropagationError;
use crate::timescale::ParseError;

/// Pipeline stage a case failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Time,
    Geometry,
    Propagation,
}

#[derive(Debug, Error)]
pub enum VisibilityError {
    #[error("time: {0}")]
    Parse(#[from] ParseError),
    #[error("geometry: {0}")]
    Geometry(#[from] GeometryError),
    #[error("propagation: {0}")]
    Propagation(#[from] PropagationError),
}

impl VisibilityError {
    pub fn stage(&self) -> Stage {
        match self {
            VisibilityError::Parse(_) => Stage::Time,
            VisibilityError::Geometry(_) => Stage::Geometry,
            VisibilityError::Propagation(_) => Stage::Propagation,
        }
    }
}
