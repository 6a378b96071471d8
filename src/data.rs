//! Domain types for district test and enrollment records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// First school year covered by the dataset.
pub const FIRST_YEAR: u32 = 2008;
/// Last school year covered by the dataset.
pub const LAST_YEAR: u32 = 2014;

/// Name of the statewide aggregate record present in the dataset.
pub const STATEWIDE_RECORD: &str = "COLORADO";
/// Sentinel a caller passes to request a statewide (all-district) answer.
pub const STATEWIDE_QUERY: &str = "STATEWIDE";

/// The closed range of school years any record may carry scores for.
pub fn year_range() -> RangeInclusive<u32> {
    FIRST_YEAR..=LAST_YEAR
}

/// Grade levels with statewide test data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Third,
    Eighth,
}

impl Grade {
    /// Maps a raw grade number onto a supported grade level.
    pub fn from_number(n: u32) -> Option<Grade> {
        match n {
            3 => Some(Grade::Third),
            8 => Some(Grade::Eighth),
            _ => None,
        }
    }
}

/// Tested subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Reading,
    Writing,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Math, Subject::Reading, Subject::Writing];
}

/// Enrollment metrics tracked per district.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    KindergartenParticipation,
    HighSchoolGraduation,
}

/// A single test score cell: either a genuine proficiency value or the
/// dataset's missing marker ("N/A").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Score {
    Proficiency(f64),
    Missing,
}

impl Score {
    /// Returns the numeric value, or `None` for the missing marker.
    pub fn as_proficiency(self) -> Option<f64> {
        match self {
            Score::Proficiency(v) => Some(v),
            Score::Missing => None,
        }
    }
}

/// Per-year scores for the three tested subjects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubjectScores {
    pub math: Score,
    pub reading: Score,
    pub writing: Score,
}

impl SubjectScores {
    pub fn get(&self, subject: Subject) -> Score {
        match subject {
            Subject::Math => self.math,
            Subject::Reading => self.reading,
            Subject::Writing => self.writing,
        }
    }

    pub fn set(&mut self, subject: Subject, score: Score) {
        match subject {
            Subject::Math => self.math = score,
            Subject::Reading => self.reading = score,
            Subject::Writing => self.writing = score,
        }
    }
}

impl Default for SubjectScores {
    fn default() -> Self {
        SubjectScores {
            math: Score::Missing,
            reading: Score::Missing,
            writing: Score::Missing,
        }
    }
}

/// Statewide test results for one district, keyed by grade then year.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatewideTest {
    pub third_grade: BTreeMap<u32, SubjectScores>,
    pub eighth_grade: BTreeMap<u32, SubjectScores>,
}

impl StatewideTest {
    pub fn by_grade(&self, grade: Grade) -> &BTreeMap<u32, SubjectScores> {
        match grade {
            Grade::Third => &self.third_grade,
            Grade::Eighth => &self.eighth_grade,
        }
    }

    pub fn by_grade_mut(&mut self, grade: Grade) -> &mut BTreeMap<u32, SubjectScores> {
        match grade {
            Grade::Third => &mut self.third_grade,
            Grade::Eighth => &mut self.eighth_grade,
        }
    }

    /// Looks up one score cell. A year with no row at all reads as missing.
    pub fn score(&self, grade: Grade, year: u32, subject: Subject) -> Score {
        self.by_grade(grade)
            .get(&year)
            .map(|scores| scores.get(subject))
            .unwrap_or(Score::Missing)
    }
}

/// Yearly enrollment rates for one district.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enrollment {
    pub kindergarten_participation: BTreeMap<u32, f64>,
    pub high_school_graduation: BTreeMap<u32, f64>,
}

impl Enrollment {
    pub fn by_metric(&self, metric: Metric) -> &BTreeMap<u32, f64> {
        match metric {
            Metric::KindergartenParticipation => &self.kindergarten_participation,
            Metric::HighSchoolGraduation => &self.high_school_graduation,
        }
    }

    pub fn by_metric_mut(&mut self, metric: Metric) -> &mut BTreeMap<u32, f64> {
        match metric {
            Metric::KindergartenParticipation => &mut self.kindergarten_participation,
            Metric::HighSchoolGraduation => &mut self.high_school_graduation,
        }
    }
}

/// One district's complete record. Constructed once at load time and
/// immutable for the duration of any analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct District {
    pub name: String,
    pub statewide_test: StatewideTest,
    pub enrollment: Enrollment,
}

impl District {
    pub fn new(name: impl Into<String>) -> Self {
        District {
            name: name.into(),
            statewide_test: StatewideTest::default(),
            enrollment: Enrollment::default(),
        }
    }
}

/// Per-subject weights applied when reducing a growth vector to a single
/// composite score. Weights are non-negative and need not sum to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weighting {
    pub math: f64,
    pub reading: f64,
    pub writing: f64,
}

impl Weighting {
    pub fn weight(&self, subject: Subject) -> f64 {
        match subject {
            Subject::Math => self.math,
            Subject::Reading => self.reading,
            Subject::Writing => self.writing,
        }
    }
}

impl Default for Weighting {
    fn default() -> Self {
        Weighting {
            math: 0.333,
            reading: 0.333,
            writing: 0.333,
        }
    }
}

/// A district paired with its computed growth value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictGrowth {
    pub name: String,
    pub growth: f64,
}

impl DistrictGrowth {
    pub fn new(name: impl Into<String>, growth: f64) -> Self {
        DistrictGrowth {
            name: name.into(),
            growth,
        }
    }
}
