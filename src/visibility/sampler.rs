use std::num::NonZeroU32;

use super::error::VisibilityError;
use super::sample::Sample;
use crate::geometry::{norm, observe, ObserverLocation, MEAN_EARTH_RADIUS_KM};
use crate::propagate::Propagator;
use crate::timescale::{CalendarTime, JulianDate, ParseError};

/// Offset of the second propagation used for the finite-difference range-rate.
/// Independent of the sampling step.
pub const RANGE_RATE_OFFSET_S: f64 = 1.0;

/// A uniform sampling grid from `start` to `end`, inclusive of `end` when it
/// falls on a step boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSpan {
    start: JulianDate,
    step_s: NonZeroU32,
    span_s: i64,
}

impl SampleSpan {
    pub fn new(start: &CalendarTime, end: &CalendarTime, step_s: NonZeroU32) -> Self {
        let start = JulianDate::from_calendar(start);
        let end = JulianDate::from_calendar(end);
        Self {
            start,
            step_s,
            span_s: end.seconds_since(start).round() as i64,
        }
    }

    pub fn parse(start: &str, end: &str, step_s: NonZeroU32) -> Result<Self, ParseError> {
        Ok(Self::new(&start.parse()?, &end.parse()?, step_s))
    }

    pub fn start(&self) -> JulianDate {
        self.start
    }

    pub fn step_seconds(&self) -> u32 {
        self.step_s.get()
    }

    /// Seconds from `start` of every grid point. Empty when `end` precedes `start`.
    pub fn offsets(&self) -> impl Iterator<Item = i64> {
        let span_s = self.span_s;
        let step_s = i64::from(self.step_s.get());
        (0..)
            .map(move |i: i64| i * step_s)
            .take_while(move |offset| *offset <= span_s)
    }

    pub fn len(&self) -> usize {
        if self.span_s < 0 {
            0
        } else {
            (self.span_s / i64::from(self.step_s.get())) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_final(&self, offset: i64) -> bool {
        offset >= self.span_s
    }
}

/// Evaluates every grid point of `span`. Any propagation or geometry failure
/// aborts the whole run.
pub fn sample_span<P: Propagator + ?Sized>(
    propagator: &P,
    observer: &ObserverLocation,
    span: &SampleSpan,
) -> Result<Vec<Sample>, VisibilityError> {
    let mut samples = Vec::with_capacity(span.len());

    for offset in span.offsets() {
        let at = span.start().plus_seconds(offset as f64);
        let state = propagator.propagate(propagator.minutes_since_epoch(at))?;
        let observation = observe(state.position_km, at, observer)?;

        let range_rate_km_s = if span.is_final(offset) {
            0.0
        } else {
            let next_at = at.plus_seconds(RANGE_RATE_OFFSET_S);
            let next_state = propagator.propagate(propagator.minutes_since_epoch(next_at))?;
            let next = observe(next_state.position_km, next_at, observer)?;
            (next.range.0 - observation.range.0) / RANGE_RATE_OFFSET_S
        };

        let altitude_km = norm(state.position_km) - MEAN_EARTH_RADIUS_KM;
        let sample = Sample::rounded(at.to_calendar(), &observation, range_rate_km_s, altitude_km);
        log::trace!(
            "{} az {:.2} el {:.2} range {:.2} km",
            sample.time,
            sample.azimuth_deg,
            sample.elevation_deg,
            sample.range_km
        );
        samples.push(sample);
    }

    log::debug!(
        "sampled {} points every {} s",
        samples.len(),
        span.step_seconds()
    );
    Ok(samples)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::propagate::{MinutesSinceEpoch, PropagationError, StateVector};
    use crate::units::{round_to, Degrees, Meters};
    use crate::visibility::Stage;

    /// Test double returning positions from a closure of minutes since epoch.
    pub(crate) struct ScriptedPropagator<F> {
        pub epoch: JulianDate,
        pub script: F,
    }

    impl<F> ScriptedPropagator<F>
    where
        F: Fn(f64) -> Result<[f64; 3], PropagationError>,
    {
        pub(crate) fn new(epoch: JulianDate, script: F) -> Self {
            Self { epoch, script }
        }
    }

    impl<F> Propagator for ScriptedPropagator<F>
    where
        F: Fn(f64) -> Result<[f64; 3], PropagationError>,
    {
        fn epoch(&self) -> JulianDate {
            self.epoch
        }

        fn propagate(&self, t: MinutesSinceEpoch) -> Result<StateVector, PropagationError> {
            Ok(StateVector {
                position_km: (self.script)(t.0)?,
                velocity_km_s: [0.0; 3],
            })
        }
    }

    pub(crate) fn north_pole() -> ObserverLocation {
        ObserverLocation::from_degrees(Degrees(90.0), Degrees(0.0), Meters(0.0))
    }

    /// Position 1000 km off-axis from the pole observer at `height` km above it.
    /// Elevation at the pole does not depend on Earth rotation.
    pub(crate) fn above_pole(height: f64) -> [f64; 3] {
        [1000.0, 0.0, north_pole().position_ecef_km()[2] + height]
    }

    fn span(start: &str, end: &str, step: u32) -> SampleSpan {
        SampleSpan::parse(start, end, NonZeroU32::new(step).unwrap()).unwrap()
    }

    #[test]
    fn endpoint_included_on_step_boundary() {
        let s = span("2024-01-01T00:00:00Z", "2024-01-01T00:10:00Z", 60);
        assert_eq!(s.len(), 11);
        assert_eq!(s.offsets().last(), Some(600));

        let s = span("2024-01-01T00:00:00Z", "2024-01-01T00:09:50Z", 60);
        assert_eq!(s.len(), 10);
        assert_eq!(s.offsets().last(), Some(540));
    }

    #[test]
    fn reversed_span_is_empty() {
        let s = span("2024-01-01T01:00:00Z", "2024-01-01T00:00:00Z", 30);
        assert!(s.is_empty());
        assert_eq!(s.offsets().count(), 0);
    }

    #[test]
    fn samples_carry_grid_timestamps_and_geometry() {
        let s = span("2024-01-01T00:00:00Z", "2024-01-01T00:05:00Z", 60);
        let propagator = ScriptedPropagator::new(s.start(), |_| Ok(above_pole(1000.0)));
        let samples = sample_span(&propagator, &north_pole(), &s).unwrap();
        assert_eq!(samples.len(), 6);
        assert_eq!(samples[0].time.to_string(), "2024-01-01T00:00:00Z");
        assert_eq!(samples[5].time.to_string(), "2024-01-01T00:05:00Z");

        let expected_alt = round_to(crate::geometry::norm(above_pole(1000.0)) - 6371.0, 2);
        for sample in &samples {
            assert_eq!(sample.elevation_deg, 45.0);
            assert_eq!(sample.range_km, 1414.21);
            assert_eq!(sample.altitude_km, expected_alt);
            assert!(sample.range_rate_km_s.abs() < 1e-9);
        }
    }

    #[test]
    fn range_rate_is_one_second_difference() {
        let s = span("2024-01-01T00:00:00Z", "2024-01-01T00:02:00Z", 60);
        // climbing 2 km/s straight up
        let propagator = ScriptedPropagator::new(s.start(), |minutes: f64| {
            Ok(above_pole(1000.0 + 2.0 * minutes * 60.0))
        });
        let samples = sample_span(&propagator, &north_pole(), &s).unwrap();
        assert_eq!(samples.len(), 3);

        let range = |h: f64| (1000.0f64.powi(2) + h * h).sqrt();
        let expected = round_to(range(1002.0) - range(1000.0), 3);
        assert!((samples[0].range_rate_km_s - expected).abs() <= 0.001);
        assert!(samples[1].range_rate_km_s > 1.4);
        // no look-ahead at the final grid point
        assert_eq!(samples[2].range_rate_km_s, 0.0);
    }

    #[test]
    fn off_grid_end_keeps_range_rate_on_last_sample() {
        let s = span("2024-01-01T00:00:00Z", "2024-01-01T00:01:30Z", 60);
        let propagator = ScriptedPropagator::new(s.start(), |minutes: f64| {
            Ok(above_pole(1000.0 + 2.0 * minutes * 60.0))
        });
        let samples = sample_span(&propagator, &north_pole(), &s).unwrap();
        assert_eq!(samples.len(), 2);
        assert!(samples[1].range_rate_km_s > 1.0);
    }

    #[test]
    fn propagator_failure_aborts_the_run() {
        let s = span("2024-01-01T00:00:00Z", "2024-01-01T00:10:00Z", 60);
        let propagator = ScriptedPropagator::new(s.start(), |minutes: f64| {
            if minutes > 2.5 {
                Err(PropagationError::Propagation {
                    minutes: MinutesSinceEpoch(minutes),
                    message: "satellite decayed".into(),
                })
            } else {
                Ok(above_pole(1000.0))
            }
        });
        let err = sample_span(&propagator, &north_pole(), &s).unwrap_err();
        assert_eq!(err.stage(), Stage::Propagation);
        assert!(err.to_string().contains("decayed"));
    }

    #[test]
    fn deterministic_output() {
        let s = span("2024-05-01T10:00:00Z", "2024-05-01T10:30:00Z", 30);
        let observer =
            ObserverLocation::from_degrees(Degrees(47.3), Degrees(8.5), Meters(410.0));
        let propagator = ScriptedPropagator::new(JulianDate(2_460_431.0), |minutes: f64| {
            let w = minutes * 0.06;
            Ok([6900.0 * w.cos(), 6900.0 * w.sin() * 0.6, 6900.0 * w.sin() * 0.8])
        });
        let a = sample_span(&propagator, &observer, &s).unwrap();
        let b = sample_span(&propagator, &observer, &s).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|p| (0.0..360.0).contains(&p.azimuth_deg)));
    }
}
