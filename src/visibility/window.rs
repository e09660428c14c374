use std::mem;

use serde::Serialize;

use super::sample::Sample;
use crate::timescale::{CalendarTime, JulianDate};
use crate::units::{round_to, Degrees};

/// A maximal run of consecutive samples at or above the elevation threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibilityWindow {
    pub start: CalendarTime,
    pub end: CalendarTime,
    #[serde(rename = "maxElevation")]
    pub max_elevation_deg: f64,
    #[serde(rename = "maxElevationTime")]
    pub max_elevation_time: CalendarTime,
    #[serde(rename = "duration")]
    pub duration_s: f64,
    pub points: Vec<Sample>,
}

#[derive(Debug)]
struct OpenWindow {
    start: CalendarTime,
    last: CalendarTime,
    peak_deg: f64,
    peak_time: CalendarTime,
    points: Vec<Sample>,
}

impl OpenWindow {
    fn open(sample: &Sample) -> Self {
        Self {
            start: sample.time,
            last: sample.time,
            peak_deg: sample.elevation_deg,
            peak_time: sample.time,
            points: vec![sample.clone()],
        }
    }

    fn extend(&mut self, sample: &Sample) {
        if sample.elevation_deg > self.peak_deg {
            self.peak_deg = sample.elevation_deg;
            self.peak_time = sample.time;
        }
        self.last = sample.time;
        self.points.push(sample.clone());
    }

    fn close(self) -> VisibilityWindow {
        // Measured between the reported whole-second timestamps, not by counting steps.
        let duration_s = JulianDate::from_calendar(&self.last)
            .seconds_since(JulianDate::from_calendar(&self.start));
        VisibilityWindow {
            start: self.start,
            end: self.last,
            max_elevation_deg: round_to(self.peak_deg, 2),
            max_elevation_time: self.peak_time,
            duration_s: round_to(duration_s, 2),
            points: self.points,
        }
    }
}

#[derive(Debug, Default)]
enum DetectorState {
    #[default]
    Idle,
    InWindow(OpenWindow),
}

/// Streaming segmentation of time-ordered samples into visibility windows.
#[derive(Debug)]
pub struct WindowDetector {
    threshold: Degrees,
    state: DetectorState,
}

impl WindowDetector {
    pub fn new(threshold: Degrees) -> Self {
        Self {
            threshold,
            state: DetectorState::Idle,
        }
    }

    pub fn is_in_window(&self) -> bool {
        matches!(self.state, DetectorState::InWindow(_))
    }

    /// Feeds the next sample; returns a window when this sample closes one.
    pub fn push(&mut self, sample: &Sample) -> Option<VisibilityWindow> {
        let qualifies = sample.elevation_deg >= self.threshold.0;

        let (next, closed) = match (mem::take(&mut self.state), qualifies) {
            (DetectorState::Idle, false) => (DetectorState::Idle, None),
            (DetectorState::Idle, true) => {
                (DetectorState::InWindow(OpenWindow::open(sample)), None)
            }
            (DetectorState::InWindow(mut window), true) => {
                window.extend(sample);
                (DetectorState::InWindow(window), None)
            }
            (DetectorState::InWindow(window), false) => {
                (DetectorState::Idle, Some(window.close()))
            }
        };

        self.state = next;
        closed
    }

    /// Closes a window still open at the end of the stream.
    pub fn finish(self) -> Option<VisibilityWindow> {
        match self.state {
            DetectorState::Idle => None,
            DetectorState::InWindow(window) => Some(window.close()),
        }
    }
}

/// All windows in `samples`, in time order.
pub fn find_windows(samples: &[Sample], threshold: Degrees) -> Vec<VisibilityWindow> {
    let mut detector = WindowDetector::new(threshold);
    let mut windows: Vec<_> = samples
        .iter()
        .filter_map(|sample| detector.push(sample))
        .collect();
    windows.extend(detector.finish());
    log::debug!(
        "{} window(s) at or above {} deg in {} samples",
        windows.len(),
        threshold.0,
        samples.len()
    );
    windows
}
