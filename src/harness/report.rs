use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::error::CaseError;
use crate::visibility::VisibilityWindow;

/// Result document for one test case.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    #[serde(rename = "testCase")]
    pub test_case: String,
    pub implementation: String,
    pub version: String,
    #[serde(rename = "visibilityWindows")]
    pub visibility_windows: Vec<VisibilityWindow>,
    /// Seconds, rounded to milliseconds.
    #[serde(rename = "executionTime")]
    pub execution_time: f64,
    #[serde(rename = "timestamp", serialize_with = "serialize_whole_seconds")]
    pub generated_at: DateTime<Utc>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    #[serde(rename = "libraryName")]
    pub library_name: String,
    #[serde(rename = "libraryVersion")]
    pub library_version: String,
    pub platform: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            library_name: "sgp4".to_string(),
            library_version: "2.3".to_string(),
            platform: "Rust".to_string(),
        }
    }
}

fn serialize_whole_seconds<S: Serializer>(
    dt: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&dt.format("%Y-%m-%dT%H:%M:%SZ"))
}

impl TestResult {
    /// `<implementation>_<testCase>_<YYYYmmdd_HHMMSS>.json`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.json",
            self.implementation,
            self.test_case,
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }

    /// Writes the pretty-printed document into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, CaseError> {
        fs::create_dir_all(dir).map_err(|source| CaseError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(self.file_name());
        let json = serde_json::to_string_pretty(self).map_err(|source| CaseError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json + "\n").map_err(|source| CaseError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::case::tests::scratch_dir;
    use chrono::TimeZone;

    fn result() -> TestResult {
        TestResult {
            test_case: "iss_zurich".into(),
            implementation: "sat-visibility".into(),
            version: "0.1.0".into(),
            visibility_windows: Vec::new(),
            execution_time: 0.012,
            generated_at: Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap(),
            metadata: Metadata::default(),
        }
    }

    #[test]
    fn file_name_is_timestamped() {
        assert_eq!(
            result().file_name(),
            "sat-visibility_iss_zurich_20240305_070809.json"
        );
    }

    #[test]
    fn document_shape() {
        let json = serde_json::to_value(result()).unwrap();
        assert_eq!(json["testCase"], "iss_zurich");
        assert_eq!(json["timestamp"], "2024-03-05T07:08:09Z");
        assert_eq!(json["executionTime"], 0.012);
        assert_eq!(json["metadata"]["libraryName"], "sgp4");
        assert!(json["visibilityWindows"].as_array().unwrap().is_empty());
    }

    #[test]
    fn writes_into_fresh_directory() {
        let dir = scratch_dir("report").join("nested");
        let path = result().write_to(&dir).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["implementation"], "sat-visibility");
        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }
}
