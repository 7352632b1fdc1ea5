use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    IncompleteResultsError, MuscleGroup, NotFoundError, Percentile, PercentileTable,
    ProgressionLevel, ProgressionSchemes, RepBucket, TestingResults,
};

/// Read-only data the home strength test is evaluated against.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeTestConfig {
    pub percentiles: PercentileTable,
    pub progressions: ProgressionSchemes,
}

pub struct StrengthTest {
    config: HomeTestConfig,
}

impl StrengthTest {
    #[must_use]
    pub fn new(config: HomeTestConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &HomeTestConfig {
        &self.config
    }

    #[must_use]
    pub fn lookup(
        &self,
        group: MuscleGroup,
        progression: ProgressionLevel,
        reps: RepBucket,
    ) -> Percentile {
        self.config.percentiles.lookup(group, progression, reps)
    }

    /// Percentile of each muscle group.
    ///
    /// Results must be present for all muscle groups.
    pub fn score(
        &self,
        results: &TestingResults,
    ) -> Result<BTreeMap<MuscleGroup, Percentile>, IncompleteResultsError> {
        results.ensure_complete()?;
        Ok(results
            .iter()
            .map(|(group, result)| (group, self.lookup(group, result.progression, result.reps)))
            .collect())
    }

    pub fn resolve_exercise_name(
        &self,
        group: MuscleGroup,
        progression: u8,
    ) -> Result<&str, NotFoundError> {
        self.config
            .progressions
            .resolve_exercise_name(group, progression)
    }

    pub fn report(&self, results: &TestingResults) -> Result<StrengthReport, ReportError> {
        let percentiles = self.score(results)?;
        // Both maps share the same keys in the same order.
        let entries = results
            .iter()
            .zip(percentiles.into_values())
            .map(|((group, result), percentile)| {
                Ok(StrengthReportEntry {
                    group,
                    progression: result.progression,
                    reps: result.reps,
                    percentile,
                    exercise: self
                        .resolve_exercise_name(group, result.progression.value())?
                        .to_string(),
                })
            })
            .collect::<Result<Vec<_>, NotFoundError>>()?;
        Ok(StrengthReport { entries })
    }
}

impl Default for StrengthTest {
    fn default() -> Self {
        Self::new(HomeTestConfig::default())
    }
}

/// Outcome of a completed home strength test, in test order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthReport {
    pub entries: Vec<StrengthReportEntry>,
}

impl StrengthReport {
    #[must_use]
    pub fn get(&self, group: MuscleGroup) -> Option<&StrengthReportEntry> {
        self.entries.iter().find(|e| e.group == group)
    }

    #[must_use]
    pub fn percentiles(&self) -> BTreeMap<MuscleGroup, Percentile> {
        self.entries.iter().map(|e| (e.group, e.percentile)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthReportEntry {
    pub group: MuscleGroup,
    pub progression: ProgressionLevel,
    pub reps: RepBucket,
    pub percentile: Percentile,
    pub exercise: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error(transparent)]
    Incomplete(#[from] IncompleteResultsError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use crate::{ProgressionScheme, TestResult};

    use super::*;

    fn results() -> TestingResults {
        TestingResults::from([
            (
                MuscleGroup::FrontLegs,
                TestResult::new(ProgressionLevel::Two, RepBucket::High),
            ),
            (
                MuscleGroup::BackLegs,
                TestResult::new(ProgressionLevel::One, RepBucket::Low),
            ),
            (
                MuscleGroup::Chest,
                TestResult::new(ProgressionLevel::Three, RepBucket::Intermediate),
            ),
            (
                MuscleGroup::Back,
                TestResult::new(ProgressionLevel::Four, RepBucket::High),
            ),
        ])
    }

    #[test]
    fn test_score() {
        assert_eq!(
            StrengthTest::default()
                .score(&results())
                .map(|percentiles| percentiles
                    .into_iter()
                    .map(|(group, percentile)| (group, *percentile))
                    .collect::<Vec<_>>()),
            Ok(vec![
                (MuscleGroup::FrontLegs, 75),
                (MuscleGroup::BackLegs, 10),
                (MuscleGroup::Chest, 70),
                (MuscleGroup::Back, 90),
            ])
        );
    }

    #[test]
    fn test_score_is_total_over_all_results() {
        let strength_test = StrengthTest::default();
        for progression in ProgressionLevel::iter() {
            for reps in RepBucket::iter() {
                let result = TestResult::new(progression, reps);
                let results = TestingResults::from([
                    (MuscleGroup::FrontLegs, result),
                    (MuscleGroup::BackLegs, result),
                    (MuscleGroup::Chest, result),
                    (MuscleGroup::Back, result),
                ]);

                let percentiles = strength_test.score(&results).unwrap();

                assert_eq!(
                    percentiles.keys().copied().collect::<Vec<_>>(),
                    MuscleGroup::iter().collect::<Vec<_>>()
                );
                assert!(percentiles.values().all(|p| **p <= 100));
            }
        }
    }

    #[test]
    fn test_score_is_deterministic() {
        let strength_test = StrengthTest::default();
        assert_eq!(
            strength_test.score(&results()),
            strength_test.score(&results())
        );
    }

    #[test]
    fn test_score_incomplete() {
        let mut results = results();
        results.remove(MuscleGroup::BackLegs);

        assert_eq!(
            StrengthTest::default().score(&results),
            Err(IncompleteResultsError {
                missing: vec![MuscleGroup::BackLegs]
            })
        );
    }

    #[test]
    fn test_score_with_injected_table() {
        let mut json = serde_json::to_value(PercentileTable::default()).unwrap();
        json["Back"]["4"]["high"] = serde_json::json!(99);
        let strength_test = StrengthTest::new(HomeTestConfig {
            percentiles: serde_json::from_value(json).unwrap(),
            ..HomeTestConfig::default()
        });

        assert_eq!(
            strength_test.score(&results()).unwrap()[&MuscleGroup::Back],
            Percentile::new(99).unwrap()
        );
    }

    #[test]
    fn test_report() {
        let report = StrengthTest::default().report(&results()).unwrap();

        assert_eq!(
            report
                .entries
                .iter()
                .map(|e| (e.group, *e.percentile, e.exercise.as_str()))
                .collect::<Vec<_>>(),
            vec![
                (MuscleGroup::FrontLegs, 75, "Bodyweight Squat"),
                (MuscleGroup::BackLegs, 10, "Glute Bridge"),
                (MuscleGroup::Chest, 70, "Decline Push Up"),
                (MuscleGroup::Back, 90, "Pull Up"),
            ]
        );
        assert_eq!(
            report.get(MuscleGroup::Chest).map(|e| e.reps),
            Some(RepBucket::Intermediate)
        );
        assert_eq!(
            report.percentiles(),
            StrengthTest::default().score(&results()).unwrap()
        );
    }

    #[test]
    fn test_report_incomplete() {
        assert_eq!(
            StrengthTest::default().report(&TestingResults::new()),
            Err(ReportError::Incomplete(IncompleteResultsError {
                missing: MuscleGroup::iter().collect()
            }))
        );
    }

    #[test]
    fn test_report_missing_exercise() {
        let strength_test = StrengthTest::new(HomeTestConfig {
            progressions: ProgressionSchemes::new(BTreeMap::from([
                (
                    MuscleGroup::FrontLegs,
                    ProgressionScheme::new(["A", "B", "C", "D"]),
                ),
                (
                    MuscleGroup::BackLegs,
                    ProgressionScheme::new(["A", "B", "C", "D"]),
                ),
                (
                    MuscleGroup::Chest,
                    ProgressionScheme::new(["A", "B", "C", "D"]),
                ),
                (MuscleGroup::Back, ProgressionScheme::new(["A", "B", "C"])),
            ])),
            ..HomeTestConfig::default()
        });

        assert_eq!(
            strength_test.report(&results()),
            Err(ReportError::NotFound(NotFoundError::Level {
                group: MuscleGroup::Back,
                level: 4,
                levels: 3
            }))
        );
    }

    #[test]
    fn test_config_deserialize_defaults() {
        assert_eq!(
            serde_json::from_str::<HomeTestConfig>("{}").unwrap(),
            HomeTestConfig::default()
        );
    }
}
