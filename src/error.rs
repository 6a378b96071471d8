//! Query error taxonomy.
//!
//! Parameter-validation errors abort a query before any computation.
//! Per-district data gaps are never errors; those districts are simply
//! excluded from (or zeroed in) the affected results.

use crate::data::{Grade, Subject};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("a grade must be provided to answer this question")]
    MissingGrade,

    #[error("{0} is not a known grade")]
    UnknownGrade(u32),

    #[error("unrecognized option combination: {0}")]
    UnsupportedOptions(String),

    #[error("no district named {0}")]
    UnknownDistrict(String),

    #[error("degenerate year span for {district} {subject:?} grade {grade:?}: single valid year {year}")]
    DegenerateSpan {
        district: String,
        subject: Subject,
        grade: Grade,
        year: u32,
    },
}
