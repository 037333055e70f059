//! Diagnostic analysis stages
//!
//! - ST-segment level and elevation/depression flags
//! - Infarction territory lookup from affected leads
//! - Clinical parameter validation

mod st_segment;
mod territory;
pub mod validation;

pub use st_segment::{StAnalysis, StSegmentAnalyzer};
pub use territory::{Territory, TerritoryClassifier};
pub use validation::{parse_heart_rate, validate};
