//! District repository: loads the four source CSVs into an indexed,
//! read-only map of districts.
//!
//! Loading is tolerant of the dataset's "N/A" markers; a score cell that
//! does not parse as a number is stored as [`Score::Missing`]. Rows outside
//! the known year range or with an unknown subject are skipped with a
//! warning rather than failing the load.

use crate::data::{District, Grade, Metric, Score, Subject, SubjectScores, year_range};
use crate::error::QueryError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Locations of the four source CSV files, relative to a data directory.
#[derive(Debug, Clone)]
pub struct DataSources {
    pub third_grade: PathBuf,
    pub eighth_grade: PathBuf,
    pub kindergarten: PathBuf,
    pub graduation: PathBuf,
}

impl DataSources {
    /// Conventional file names under a single data directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        DataSources {
            third_grade: dir.join("third_grade.csv"),
            eighth_grade: dir.join("eighth_grade.csv"),
            kindergarten: dir.join("kindergarten_participation.csv"),
            graduation: dir.join("high_school_graduation.csv"),
        }
    }
}

/// A row of a statewide test CSV (one score cell per row).
#[derive(Debug, Deserialize)]
struct TestRow {
    location: String,
    subject: String,
    year: u32,
    proficiency: String,
}

/// A row of an enrollment CSV (one rate per row).
#[derive(Debug, Deserialize)]
struct EnrollmentRow {
    location: String,
    year: u32,
    rate: String,
}

/// Name-indexed collection of districts. Built once at load time; all
/// analysis reads from it without mutation.
#[derive(Debug, Default)]
pub struct DistrictRepository {
    districts: BTreeMap<String, District>,
}

impl DistrictRepository {
    /// Loads all four sources and indexes the resulting districts by name.
    pub fn load(sources: &DataSources) -> Result<Self> {
        let mut repo = DistrictRepository::default();

        repo.load_test_csv(&sources.third_grade, Grade::Third)?;
        repo.load_test_csv(&sources.eighth_grade, Grade::Eighth)?;
        repo.load_enrollment_csv(&sources.kindergarten, Metric::KindergartenParticipation)?;
        repo.load_enrollment_csv(&sources.graduation, Metric::HighSchoolGraduation)?;

        info!(districts = repo.len(), "District repository loaded");
        Ok(repo)
    }

    /// Builds a repository directly from districts, bypassing CSV loading.
    pub fn from_districts(districts: impl IntoIterator<Item = District>) -> Self {
        let districts = districts
            .into_iter()
            .map(|d| (d.name.clone(), d))
            .collect();
        DistrictRepository { districts }
    }

    /// Looks up a district by its exact (case-sensitive) name.
    pub fn find_by_name(&self, name: &str) -> Result<&District, QueryError> {
        self.districts
            .get(name)
            .ok_or_else(|| QueryError::UnknownDistrict(name.to_string()))
    }

    /// Iterates all districts in name order.
    pub fn districts(&self) -> impl Iterator<Item = &District> {
        self.districts.values()
    }

    pub fn len(&self) -> usize {
        self.districts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    fn district_entry(&mut self, name: &str) -> &mut District {
        self.districts
            .entry(name.to_string())
            .or_insert_with(|| District::new(name))
    }

    fn load_test_csv(&mut self, path: &Path, grade: Grade) -> Result<()> {
        let file = File::open(path)
            .with_context(|| format!("opening test data {}", path.display()))?;
        let mut rdr = csv::Reader::from_reader(file);

        let mut rows = 0usize;
        for result in rdr.deserialize() {
            let row: TestRow = result?;
            rows += 1;

            let Some(subject) = parse_subject(&row.subject) else {
                warn!(subject = %row.subject, location = %row.location, "Unknown subject, skipping row");
                continue;
            };
            if !year_range().contains(&row.year) {
                warn!(year = row.year, location = %row.location, "Year outside dataset range, skipping row");
                continue;
            }

            let score = parse_score(&row.proficiency);
            let district = self.district_entry(&row.location);
            district
                .statewide_test
                .by_grade_mut(grade)
                .entry(row.year)
                .or_insert_with(SubjectScores::default)
                .set(subject, score);
        }

        debug!(path = %path.display(), rows, ?grade, "Test CSV loaded");
        Ok(())
    }

    fn load_enrollment_csv(&mut self, path: &Path, metric: Metric) -> Result<()> {
        let file = File::open(path)
            .with_context(|| format!("opening enrollment data {}", path.display()))?;
        let mut rdr = csv::Reader::from_reader(file);

        let mut rows = 0usize;
        for result in rdr.deserialize() {
            let row: EnrollmentRow = result?;
            rows += 1;

            let Ok(rate) = row.rate.trim().parse::<f64>() else {
                warn!(rate = %row.rate, location = %row.location, "Non-numeric enrollment rate, skipping row");
                continue;
            };

            let district = self.district_entry(&row.location);
            district
                .enrollment
                .by_metric_mut(metric)
                .insert(row.year, rate);
        }

        debug!(path = %path.display(), rows, ?metric, "Enrollment CSV loaded");
        Ok(())
    }
}

fn parse_subject(raw: &str) -> Option<Subject> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "math" => Some(Subject::Math),
        "reading" => Some(Subject::Reading),
        "writing" => Some(Subject::Writing),
        _ => None,
    }
}

fn parse_score(raw: &str) -> Score {
    match raw.trim().parse::<f64>() {
        Ok(v) => Score::Proficiency(v),
        Err(_) => Score::Missing,
    }
}
