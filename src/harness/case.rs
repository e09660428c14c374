use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::error::CaseError;
use crate::geometry::ObserverLocation;
use crate::units::{Degrees, Meters};
use crate::visibility::SampleSpan;

#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub satellite: SatelliteData,
    pub observer: ObserverData,
    #[serde(rename = "timeWindow")]
    pub time_window: TimeWindow,
    #[serde(rename = "minElevation")]
    pub min_elevation: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteData {
    pub tle: Vec<String>,
}

/// Observer as written in a test case: degrees and meters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ObserverData {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
    pub step: i64,
}

impl TestCase {
    pub fn from_file(path: &Path) -> Result<Self, CaseError> {
        let content = fs::read_to_string(path).map_err(|source| CaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CaseError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn min_elevation(&self) -> Degrees {
        Degrees(self.min_elevation)
    }
}

impl ObserverData {
    pub fn location(&self) -> ObserverLocation {
        ObserverLocation::from_degrees(
            Degrees(self.latitude),
            Degrees(self.longitude),
            Meters(self.altitude),
        )
    }
}

impl TimeWindow {
    /// Sampling grid of this window, optionally with a different step.
    pub fn span(&self, step_override: Option<NonZeroU32>) -> Result<SampleSpan, CaseError> {
        let step = match step_override {
            Some(step) => step,
            None => u32::try_from(self.step)
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or(CaseError::InvalidStep(self.step))?,
        };
        Ok(SampleSpan::parse(&self.start, &self.end, step)?)
    }
}

/// Paths of the cases to run: `<dir>/<name>.json` when `only` is given,
/// otherwise every `*.json` in `dir`, sorted.
pub fn discover_cases(dir: &Path, only: Option<&str>) -> Result<Vec<PathBuf>, CaseError> {
    if !dir.is_dir() {
        return Err(CaseError::DirectoryNotFound(dir.to_path_buf()));
    }

    if let Some(name) = only {
        let path = dir.join(format!("{}.json", name));
        if !path.is_file() {
            return Err(CaseError::NotFound(path));
        }
        return Ok(vec![path]);
    }

    let io_err = |source: std::io::Error| CaseError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        } else {
            log::debug!("skipping {}", path.display());
        }
    }
    files.sort();
    Ok(files)
}
