use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use chrono::Utc;

use super::case::TestCase;
use super::error::CaseError;
use super::report::{Metadata, TestResult};
use crate::config::ImplementationConfig;
use crate::geometry::ObserverLocation;
use crate::propagate::{Sgp4Mode, Sgp4Propagator};
use crate::units::{round_to, Degrees};
use crate::visibility::{compute_windows, SampleSpan};

/// Everything a case needs before the first propagation.
pub struct PreparedCase {
    pub propagator: Sgp4Propagator,
    pub observer: ObserverLocation,
    pub span: SampleSpan,
    pub min_elevation: Degrees,
}

pub struct VisibilityCalculator {
    implementation: ImplementationConfig,
    mode: Sgp4Mode,
    step_override: Option<NonZeroU32>,
}

impl VisibilityCalculator {
    pub fn new(
        implementation: ImplementationConfig,
        mode: Sgp4Mode,
        step_override: Option<NonZeroU32>,
    ) -> Self {
        Self {
            implementation,
            mode,
            step_override,
        }
    }

    /// Parses elements, observer and time window without propagating.
    pub fn prepare(&self, case: &TestCase) -> Result<PreparedCase, CaseError> {
        let propagator = Sgp4Propagator::from_tle(&case.satellite.tle, self.mode)?;
        let span = case.time_window.span(self.step_override)?;
        Ok(PreparedCase {
            propagator,
            observer: case.observer.location(),
            span,
            min_elevation: case.min_elevation(),
        })
    }

    pub fn calculate(&self, case: &TestCase) -> Result<TestResult, CaseError> {
        let started = Instant::now();
        let prepared = self.prepare(case)?;
        log::debug!(
            "{}: {} over {} samples",
            case.name,
            prepared.propagator.name(),
            prepared.span.len()
        );

        let windows = compute_windows(
            &prepared.propagator,
            &prepared.observer,
            &prepared.span,
            prepared.min_elevation,
        )?;
        let elapsed = started.elapsed();
        log::info!(
            "{}: {} window(s) in {}",
            case.name,
            windows.len(),
            humantime::format_duration(truncate_to_micros(elapsed))
        );

        Ok(TestResult {
            test_case: case.name.clone(),
            implementation: self.implementation.name.clone(),
            version: self.implementation.version.clone(),
            visibility_windows: windows,
            execution_time: round_to(elapsed.as_secs_f64(), 3),
            generated_at: Utc::now(),
            metadata: Metadata::default(),
        })
    }
}

fn truncate_to_micros(d: Duration) -> Duration {
    Duration::from_micros(d.as_micros() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::case::tests::ISS_CASE;
    use crate::visibility::Stage;

    fn calculator() -> VisibilityCalculator {
        VisibilityCalculator::new(ImplementationConfig::default(), Sgp4Mode::Standard, None)
    }

    #[test]
    fn iss_case_produces_consistent_windows() {
        let case: TestCase = serde_json::from_str(ISS_CASE).unwrap();
        let result = calculator().calculate(&case).unwrap();
        assert_eq!(result.test_case, "iss_zurich");
        assert_eq!(result.implementation, "sat-visibility");

        // a full day over a mid-latitude site always includes ISS passes
        assert!(!result.visibility_windows.is_empty());
        for window in &result.visibility_windows {
            assert!(!window.points.is_empty());
            assert!(window.max_elevation_deg >= 10.0);
            assert!(window.max_elevation_deg <= 90.0);
            assert_eq!(
                window.duration_s,
                60.0 * (window.points.len() - 1) as f64
            );
            for point in &window.points {
                assert!(point.elevation_deg >= 10.0);
                assert!((0.0..360.0).contains(&point.azimuth_deg));
                assert!((300.0..500.0).contains(&point.altitude_km));
                assert!(point.range_rate_km_s.abs() < 8.0);
            }
        }
        for pair in result.visibility_windows.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
    }

    #[test]
    fn identical_inputs_identical_windows() {
        let case: TestCase = serde_json::from_str(ISS_CASE).unwrap();
        let a = calculator().calculate(&case).unwrap();
        let b = calculator().calculate(&case).unwrap();
        assert_eq!(a.visibility_windows, b.visibility_windows);
    }

    #[test]
    fn broken_tle_fails_in_propagation_stage() {
        let mut case: TestCase = serde_json::from_str(ISS_CASE).unwrap();
        case.satellite.tle.truncate(1);
        let err = calculator().calculate(&case).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Propagation));
    }
}
