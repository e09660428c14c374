mod calculator;
mod case;
mod error;
mod report;

pub use calculator::{PreparedCase, VisibilityCalculator};
pub use case::{discover_cases, TestCase};
pub use error::CaseError;
pub use report::{Metadata, TestResult};
