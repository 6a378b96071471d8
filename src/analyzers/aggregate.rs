//! Growth aggregation across districts and subjects.
//!
//! Per-subject rankings carry only districts with a valid comparison range.
//! The composite ranking keeps every district: a subject with no valid range
//! contributes 0 to that district's growth vector instead of dropping the
//! district. Composite sums run over raw growth values; truncation to 3
//! decimals happens once, at finalization.

use crate::analyzers::growth::district_growth;
use crate::analyzers::rank::rank;
use crate::analyzers::utility::three_truncate;
use crate::data::{DistrictGrowth, Grade, Subject, Weighting};
use crate::error::QueryError;
use crate::repository::DistrictRepository;
use std::collections::BTreeMap;
use tracing::debug;

/// Raw growth per district for one subject/grade. Districts with no valid
/// comparison range have no entry.
pub fn growth_by_district(
    repo: &DistrictRepository,
    grade: Grade,
    subject: Subject,
) -> Result<BTreeMap<String, f64>, QueryError> {
    let mut growths = BTreeMap::new();
    for district in repo.districts() {
        if let Some(value) = district_growth(district, subject, grade)? {
            growths.insert(district.name.clone(), value);
        }
    }
    Ok(growths)
}

/// Ascending ranking of districts by growth for one subject/grade, with
/// values truncated to 3 decimals.
pub fn subject_ranking(
    repo: &DistrictRepository,
    grade: Grade,
    subject: Subject,
) -> Result<Vec<DistrictGrowth>, QueryError> {
    let growths = growth_by_district(repo, grade, subject)?;
    debug!(
        ?grade,
        ?subject,
        ranked = growths.len(),
        excluded = repo.len() - growths.len(),
        "Subject growth computed"
    );

    let pairs = growths
        .into_iter()
        .map(|(name, value)| DistrictGrowth::new(name, three_truncate(value)))
        .collect();
    Ok(rank(pairs))
}

/// Ascending ranking of every district by weighted composite growth across
/// the three subjects.
pub fn composite_ranking(
    repo: &DistrictRepository,
    grade: Grade,
    weighting: &Weighting,
) -> Result<Vec<DistrictGrowth>, QueryError> {
    let per_subject: Vec<(Subject, BTreeMap<String, f64>)> = Subject::ALL
        .iter()
        .map(|&subject| Ok((subject, growth_by_district(repo, grade, subject)?)))
        .collect::<Result<_, QueryError>>()?;

    let pairs = repo
        .districts()
        .map(|district| {
            let composite: f64 = per_subject
                .iter()
                .map(|(subject, growths)| {
                    let growth = growths.get(&district.name).copied().unwrap_or(0.0);
                    growth * weighting.weight(*subject)
                })
                .sum();
            DistrictGrowth::new(district.name.clone(), three_truncate(composite))
        })
        .collect();

    Ok(rank(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{District, Score, SubjectScores};

    fn set_score(district: &mut District, year: u32, subject: Subject, value: f64) {
        district
            .statewide_test
            .third_grade
            .entry(year)
            .or_insert_with(SubjectScores::default)
            .set(subject, Score::Proficiency(value));
    }

    fn fixture_repo() -> DistrictRepository {
        // ACADEMY: math 1.0/yr, reading 0.5/yr, no writing data
        let mut academy = District::new("ACADEMY 20");
        set_score(&mut academy, 2008, Subject::Math, 10.0);
        set_score(&mut academy, 2014, Subject::Math, 16.0);
        set_score(&mut academy, 2008, Subject::Reading, 10.0);
        set_score(&mut academy, 2014, Subject::Reading, 13.0);

        // WIDEFIELD: math 2.0/yr only
        let mut widefield = District::new("WIDEFIELD 3");
        set_score(&mut widefield, 2008, Subject::Math, 10.0);
        set_score(&mut widefield, 2014, Subject::Math, 22.0);

        DistrictRepository::from_districts(vec![academy, widefield])
    }

    #[test]
    fn test_subject_ranking_excludes_missing_districts() {
        let repo = fixture_repo();
        let ranked = subject_ranking(&repo, Grade::Third, Subject::Reading).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "ACADEMY 20");
        assert_eq!(ranked[0].growth, 0.5);
    }

    #[test]
    fn test_subject_ranking_ascending() {
        let repo = fixture_repo();
        let ranked = subject_ranking(&repo, Grade::Third, Subject::Math).unwrap();
        let names: Vec<_> = ranked.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ACADEMY 20", "WIDEFIELD 3"]);
    }

    #[test]
    fn test_composite_keeps_all_districts() {
        let repo = fixture_repo();
        let ranked = composite_ranking(&repo, Grade::Third, &Weighting::default()).unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_composite_zeroes_missing_subjects() {
        let repo = fixture_repo();
        let ranked = composite_ranking(&repo, Grade::Third, &Weighting::default()).unwrap();
        // WIDEFIELD: 2.0 * 0.333 + 0 + 0 = 0.666
        let widefield = ranked.iter().find(|p| p.name == "WIDEFIELD 3").unwrap();
        assert_eq!(widefield.growth, 0.666);
    }

    #[test]
    fn test_math_only_weighting_matches_pure_math_growth() {
        let repo = fixture_repo();
        let weighting = Weighting { math: 1.0, reading: 0.0, writing: 0.0 };
        let composite = composite_ranking(&repo, Grade::Third, &weighting).unwrap();
        let math = growth_by_district(&repo, Grade::Third, Subject::Math).unwrap();

        for pair in &composite {
            let expected = three_truncate(math.get(&pair.name).copied().unwrap_or(0.0));
            assert_eq!(pair.growth, expected, "district {}", pair.name);
        }
    }

    #[test]
    fn test_composite_sums_untruncated_values() {
        // Each subject grows 0.0005/yr; truncating per subject first would
        // zero everything, summing raw values gives 0.0015 -> 0.001.
        let mut district = District::new("SMALL");
        for subject in Subject::ALL {
            set_score(&mut district, 2008, subject, 0.100);
            set_score(&mut district, 2014, subject, 0.103);
        }
        let repo = DistrictRepository::from_districts(vec![district]);
        let weighting = Weighting { math: 1.0, reading: 1.0, writing: 1.0 };
        let ranked = composite_ranking(&repo, Grade::Third, &weighting).unwrap();
        assert_eq!(ranked[0].growth, 0.001);
    }
}
