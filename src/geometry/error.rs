use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("satellite coincides with observer (range {range_km} km)")]
    DegenerateRange { range_km: f64 },
    #[error("non-finite geometry: range {range_km} km")]
    NonFinite { range_km: f64 },
}
