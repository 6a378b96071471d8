//! Year-over-year growth between the two endpoint scores of a resolved
//! comparison range.

use crate::analyzers::year_range::{max_valid_year, min_valid_year};
use crate::data::{District, Grade, Subject};
use crate::error::QueryError;

/// Normalized growth between two endpoint scores.
///
/// Equal scores force the numerator to exactly 0 rather than trusting the
/// subtraction, so representation noise cannot leak into the ratio. A zero
/// numerator over a zero year span resolves to 0 (no growth, no span); a
/// nonzero numerator over a zero span has no defined value and yields `None`.
pub fn growth_ratio(max_score: f64, min_score: f64, max_year: u32, min_year: u32) -> Option<f64> {
    let numerator = if max_score == min_score {
        0.0
    } else {
        max_score - min_score
    };
    let denominator = (i64::from(max_year) - i64::from(min_year)) as f64;

    if denominator == 0.0 {
        if numerator == 0.0 { Some(0.0) } else { None }
    } else {
        Some(numerator / denominator)
    }
}

/// Raw (un-truncated) growth for one district/subject/grade.
///
/// Returns `Ok(None)` when the district has no valid comparison range for
/// the combination; such districts contribute no entry to per-subject
/// rankings. A zero span with differing endpoint scores cannot arise from
/// the resolvers, and is rejected as [`QueryError::DegenerateSpan`] rather
/// than propagated as infinity.
pub fn district_growth(
    district: &District,
    subject: Subject,
    grade: Grade,
) -> Result<Option<f64>, QueryError> {
    let test = &district.statewide_test;

    let (Some(max_year), Some(min_year)) = (
        max_valid_year(test, subject, grade),
        min_valid_year(test, subject, grade),
    ) else {
        return Ok(None);
    };

    let (Some(max_score), Some(min_score)) = (
        test.score(grade, max_year, subject).as_proficiency(),
        test.score(grade, min_year, subject).as_proficiency(),
    ) else {
        return Ok(None);
    };

    match growth_ratio(max_score, min_score, max_year, min_year) {
        Some(value) => Ok(Some(value)),
        None => Err(QueryError::DegenerateSpan {
            district: district.name.clone(),
            subject,
            grade,
            year: max_year,
        }),
    }
}
