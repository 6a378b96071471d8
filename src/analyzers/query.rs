//! Growth query dispatch.
//!
//! A caller supplies an option set; the dispatcher validates the grade
//! before any computation runs, then routes the four recognized option
//! shapes to the growth pipeline. Answers are always in descending growth
//! order; single-top shapes yield one entry.

use crate::analyzers::aggregate::{composite_ranking, subject_ranking};
use crate::analyzers::rank::top_n;
use crate::data::{DistrictGrowth, Grade, Subject, Weighting};
use crate::error::QueryError;
use crate::repository::DistrictRepository;
use tracing::info;

/// Options for a top-statewide growth query. `grade` is the raw grade
/// number as supplied by the caller; it is validated at dispatch time.
#[derive(Debug, Clone, Default)]
pub struct GrowthQuery {
    pub grade: Option<u32>,
    pub subject: Option<Subject>,
    pub top: Option<usize>,
    pub weighting: Option<Weighting>,
}

/// Answers a growth query over the repository.
///
/// Recognized option shapes:
///
/// | options supplied        | answer                                      |
/// |-------------------------|---------------------------------------------|
/// | grade, subject          | single top-growth district for that subject |
/// | grade, subject, top(N)  | N highest-growth districts for that subject |
/// | grade                   | top composite-growth district, equal weights|
/// | grade, weighting        | top composite-growth district, custom weights|
pub fn top_statewide_growth(
    repo: &DistrictRepository,
    query: &GrowthQuery,
) -> Result<Vec<DistrictGrowth>, QueryError> {
    let grade = validate_grade(query)?;

    let answer = match (query.subject, query.top, query.weighting) {
        (Some(subject), None, None) => {
            let ranked = subject_ranking(repo, grade, subject)?;
            top_n(ranked, 1)
        }
        (Some(subject), Some(n), None) => {
            let ranked = subject_ranking(repo, grade, subject)?;
            top_n(ranked, n)
        }
        (None, None, None) => {
            let ranked = composite_ranking(repo, grade, &Weighting::default())?;
            top_n(ranked, 1)
        }
        (None, None, Some(weighting)) => {
            let ranked = composite_ranking(repo, grade, &weighting)?;
            top_n(ranked, 1)
        }
        _ => {
            return Err(QueryError::UnsupportedOptions(describe_options(query)));
        }
    };

    info!(?grade, answers = answer.len(), "Growth query answered");
    Ok(answer)
}

fn validate_grade(query: &GrowthQuery) -> Result<Grade, QueryError> {
    let number = query.grade.ok_or(QueryError::MissingGrade)?;
    Grade::from_number(number).ok_or(QueryError::UnknownGrade(number))
}

fn describe_options(query: &GrowthQuery) -> String {
    let mut names = vec!["grade"];
    if query.subject.is_some() {
        names.push("subject");
    }
    if query.top.is_some() {
        names.push("top");
    }
    if query.weighting.is_some() {
        names.push("weighting");
    }
    names.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{District, Score, SubjectScores};

    fn fixture_repo() -> DistrictRepository {
        let mut districts = Vec::new();
        for (name, start, end) in [
            ("ADAMS 12", 10.0, 13.0),
            ("BOULDER RE2", 10.0, 22.0),
            ("CHERRY CREEK 5", 10.0, 16.0),
        ] {
            let mut district = District::new(name);
            for (year, value) in [(2008, start), (2014, end)] {
                district
                    .statewide_test
                    .third_grade
                    .entry(year)
                    .or_insert_with(SubjectScores::default)
                    .math = Score::Proficiency(value);
            }
            districts.push(district);
        }
        DistrictRepository::from_districts(districts)
    }

    #[test]
    fn test_missing_grade_rejected_first() {
        let repo = fixture_repo();
        let query = GrowthQuery { subject: Some(Subject::Math), ..Default::default() };
        assert_eq!(
            top_statewide_growth(&repo, &query).unwrap_err(),
            QueryError::MissingGrade
        );
    }

    #[test]
    fn test_unknown_grade_rejected() {
        let repo = fixture_repo();
        let query = GrowthQuery { grade: Some(5), subject: Some(Subject::Math), ..Default::default() };
        assert_eq!(
            top_statewide_growth(&repo, &query).unwrap_err(),
            QueryError::UnknownGrade(5)
        );
    }

    #[test]
    fn test_grade_and_subject_yields_single_top() {
        let repo = fixture_repo();
        let query = GrowthQuery { grade: Some(3), subject: Some(Subject::Math), ..Default::default() };
        let answer = top_statewide_growth(&repo, &query).unwrap();
        assert_eq!(answer.len(), 1);
        assert_eq!(answer[0].name, "BOULDER RE2");
        assert_eq!(answer[0].growth, 2.0);
    }

    #[test]
    fn test_top_n_descending() {
        let repo = fixture_repo();
        let query = GrowthQuery {
            grade: Some(3),
            subject: Some(Subject::Math),
            top: Some(2),
            ..Default::default()
        };
        let answer = top_statewide_growth(&repo, &query).unwrap();
        let names: Vec<_> = answer.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["BOULDER RE2", "CHERRY CREEK 5"]);
    }

    #[test]
    fn test_top_n_excluded_districts_rank_below_answer() {
        let repo = fixture_repo();
        let query = GrowthQuery {
            grade: Some(3),
            subject: Some(Subject::Math),
            top: Some(2),
            ..Default::default()
        };
        let answer = top_statewide_growth(&repo, &query).unwrap();
        let lowest_included = answer.last().unwrap().growth;
        // ADAMS 12 (0.5/yr) was excluded and must not out-grow the answer
        assert!(lowest_included >= 0.5);
    }

    #[test]
    fn test_grade_only_composite_default_weighting() {
        let repo = fixture_repo();
        let query = GrowthQuery { grade: Some(3), ..Default::default() };
        let answer = top_statewide_growth(&repo, &query).unwrap();
        assert_eq!(answer.len(), 1);
        assert_eq!(answer[0].name, "BOULDER RE2");
        // math-only data: 2.0 * 0.333 = 0.666
        assert_eq!(answer[0].growth, 0.666);
    }

    #[test]
    fn test_grade_and_weighting_composite() {
        let repo = fixture_repo();
        let query = GrowthQuery {
            grade: Some(3),
            weighting: Some(Weighting { math: 1.0, reading: 0.0, writing: 0.0 }),
            ..Default::default()
        };
        let answer = top_statewide_growth(&repo, &query).unwrap();
        assert_eq!(answer[0].growth, 2.0);
    }

    #[test]
    fn test_unrecognized_combination_rejected() {
        let repo = fixture_repo();
        let query = GrowthQuery {
            grade: Some(3),
            subject: Some(Subject::Math),
            weighting: Some(Weighting::default()),
            ..Default::default()
        };
        match top_statewide_growth(&repo, &query).unwrap_err() {
            QueryError::UnsupportedOptions(desc) => {
                assert_eq!(desc, "grade+subject+weighting");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
