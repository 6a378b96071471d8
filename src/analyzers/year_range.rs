//! Resolves the valid comparison year range for a district/subject/grade.
//!
//! The dataset covers the closed year range 2008–2014 and any cell inside it
//! may carry the missing marker. The resolvers scan the fixed range from one
//! boundary toward the other and stop at the first year holding a genuine
//! proficiency value; reaching the far boundary with the marker still in
//! place means no valid year exists for that combination.

use crate::data::{Grade, StatewideTest, Subject, year_range};

/// Latest year with a numeric score, scanning backward from 2014.
pub fn max_valid_year(test: &StatewideTest, subject: Subject, grade: Grade) -> Option<u32> {
    year_range()
        .rev()
        .find(|&year| test.score(grade, year, subject).as_proficiency().is_some())
}

/// Earliest year with a numeric score, scanning forward from 2008.
pub fn min_valid_year(test: &StatewideTest, subject: Subject, grade: Grade) -> Option<u32> {
    year_range().find(|&year| test.score(grade, year, subject).as_proficiency().is_some())
}
