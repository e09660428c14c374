mod error;
mod sample;
mod sampler;
mod window;

pub use error::{Stage, VisibilityError};
pub use sample::Sample;
pub use sampler::{sample_span, SampleSpan, RANGE_RATE_OFFSET_S};
pub use window::{find_windows, VisibilityWindow, WindowDetector};

use crate::geometry::ObserverLocation;
use crate::propagate::Propagator;
use crate::units::Degrees;

/// Samples `span` and segments the result into windows at or above `min_elevation`.
/// Either the full window list is returned or the first failure; never a partial list.
pub fn compute_windows<P: Propagator + ?Sized>(
    propagator: &P,
    observer: &ObserverLocation,
    span: &SampleSpan,
    min_elevation: Degrees,
) -> Result<Vec<VisibilityWindow>, VisibilityError> {
    let samples = sample_span(propagator, observer, span)?;
    Ok(find_windows(&samples, min_elevation))
}
