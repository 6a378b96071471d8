//! Variation ratios between enrollment metrics and the threshold rules
//! that classify them as correlated.
//!
//! The key derived signal is the participation/graduation variation: the
//! district-to-statewide ratio of average kindergarten participation,
//! divided by the district-to-statewide ratio of average high-school
//! graduation. A district counts as correlated when that signal lands in
//! [0.6, 1.5]; a group counts as correlated when at least 70% of its
//! members do.

use crate::analyzers::utility::{mean, three_round, three_truncate};
use crate::data::{Metric, STATEWIDE_QUERY, STATEWIDE_RECORD};
use crate::error::QueryError;
use crate::repository::DistrictRepository;
use std::collections::BTreeMap;
use tracing::debug;

/// True when a single district's variation ratio is within [0.6, 1.5].
pub fn validator(variation: f64) -> bool {
    (0.6..=1.5).contains(&variation)
}

/// True when at least 70% of a group's districts are individually correlated.
pub fn group_validator(fraction: f64) -> bool {
    fraction >= 0.70
}

/// Correlation queries over a read-only repository snapshot.
pub struct CorrelationEngine<'a> {
    repo: &'a DistrictRepository,
}

impl<'a> CorrelationEngine<'a> {
    pub fn new(repo: &'a DistrictRepository) -> Self {
        CorrelationEngine { repo }
    }

    /// Mean of a district's yearly values for one enrollment metric,
    /// truncated to 3 decimals.
    pub fn average(&self, name: &str, metric: Metric) -> Result<f64, QueryError> {
        let years = self.repo.find_by_name(name)?.enrollment.by_metric(metric);
        let values: Vec<f64> = years.values().copied().collect();
        Ok(three_truncate(mean(&values)))
    }

    /// Ratio of a district's average kindergarten participation to a
    /// comparison district's, rounded to 3 decimals.
    pub fn participation_variation(&self, name: &str, against: &str) -> Result<f64, QueryError> {
        let numerator = self.average(name, Metric::KindergartenParticipation)?;
        let denominator = self.average(against, Metric::KindergartenParticipation)?;
        Ok(three_round(numerator / denominator))
    }

    /// Ratio of the statewide participation variation to the statewide
    /// graduation variation, rounded to 3 decimals.
    pub fn participation_graduation_correlation(&self, name: &str) -> Result<f64, QueryError> {
        let numerator = self.participation_variation(name, STATEWIDE_RECORD)?;
        let denominator = self.average(name, Metric::HighSchoolGraduation)?
            / self.average(STATEWIDE_RECORD, Metric::HighSchoolGraduation)?;
        Ok(three_round(numerator / denominator))
    }

    /// Answers a correlation question for a single district, or for every
    /// district at once when `name` is the statewide sentinel.
    pub fn correlates_for(&self, name: &str) -> Result<bool, QueryError> {
        if name == STATEWIDE_QUERY {
            self.statewide_correlation()
        } else {
            let variation = self.participation_graduation_correlation(name)?;
            Ok(validator(variation))
        }
    }

    /// Fraction-based correlation over an explicit district subset. An
    /// empty subset is not correlated.
    pub fn correlates_across(&self, names: &[&str]) -> Result<bool, QueryError> {
        if names.is_empty() {
            return Ok(false);
        }
        let mut correlated = 0usize;
        for name in names {
            let variation = self.participation_graduation_correlation(name)?;
            if validator(variation) {
                correlated += 1;
            }
        }
        let fraction = correlated as f64 / names.len() as f64;
        debug!(correlated, total = names.len(), fraction, "Subset correlation");
        Ok(group_validator(fraction))
    }

    /// Per-year participation variation against a comparison district,
    /// truncated to 3 decimals per year. Only years present in both
    /// districts' records appear in the result.
    pub fn variation_trend(
        &self,
        name: &str,
        against: &str,
    ) -> Result<BTreeMap<u32, f64>, QueryError> {
        let numerator = &self
            .repo
            .find_by_name(name)?
            .enrollment
            .kindergarten_participation;
        let denominator = &self
            .repo
            .find_by_name(against)?
            .enrollment
            .kindergarten_participation;

        let trend = numerator
            .iter()
            .filter_map(|(year, value)| {
                denominator
                    .get(year)
                    .map(|base| (*year, three_truncate(value / base)))
            })
            .collect();
        Ok(trend)
    }

    fn statewide_correlation(&self) -> Result<bool, QueryError> {
        let mut correlated = 0usize;
        for district in self.repo.districts() {
            let variation = self.participation_graduation_correlation(&district.name)?;
            if validator(variation) {
                correlated += 1;
            }
        }
        let fraction = correlated as f64 / self.repo.len() as f64;
        debug!(correlated, total = self.repo.len(), fraction, "Statewide correlation");
        Ok(group_validator(fraction))
    }
}
