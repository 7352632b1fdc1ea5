use std::collections::BTreeMap;

use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

use crate::{MuscleGroup, OutOfDomainError, ProgressionLevel, RepBucket};

/// Relative strength standing between 0 and 100.
#[derive(
    Deref,
    Display,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct Percentile(u8);

impl Percentile {
    pub fn new(value: u32) -> Result<Self, PercentileError> {
        match u8::try_from(value) {
            Ok(value) if value <= 100 => Ok(Self(value)),
            _ => Err(PercentileError::OutOfRange(value)),
        }
    }
}

impl TryFrom<u32> for Percentile {
    type Error = PercentileError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentile> for u32 {
    fn from(value: Percentile) -> Self {
        u32::from(value.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PercentileError {
    #[error("Percentile must be 100 or less ({0} > 100)")]
    OutOfRange(u32),
}

type Cells = [[[u8; RepBucket::COUNT]; ProgressionLevel::COUNT]; MuscleGroup::COUNT];

/// Percentile for every combination of muscle group, progression level and rep bucket.
///
/// The table is total, so a lookup with typed keys cannot fail. Tables
/// loaded from configuration are validated on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableEntries", into = "TableEntries")]
pub struct PercentileTable {
    cells: Cells,
}

impl PercentileTable {
    #[must_use]
    pub fn lookup(
        &self,
        group: MuscleGroup,
        progression: ProgressionLevel,
        reps: RepBucket,
    ) -> Percentile {
        Percentile(self.cells[group.index()][progression.index()][reps.index()])
    }

    /// Lookup with unvalidated keys.
    pub fn try_lookup(
        &self,
        group: &str,
        progression: u8,
        reps: &str,
    ) -> Result<Percentile, OutOfDomainError> {
        Ok(self.lookup(
            group.parse()?,
            ProgressionLevel::try_from(progression)?,
            reps.parse()?,
        ))
    }
}

impl Default for PercentileTable {
    fn default() -> Self {
        Self {
            cells: DEFAULT_PERCENTILES,
        }
    }
}

// Rows are progression levels, columns are the low, intermediate and high rep buckets.
const DEFAULT_PERCENTILES: Cells = [
    // FrontLegs
    [[10, 25, 40], [45, 60, 75], [70, 80, 88], [85, 90, 95]],
    // BackLegs
    [[10, 20, 35], [40, 52, 65], [60, 72, 80], [82, 88, 95]],
    // Chest
    [[10, 25, 40], [45, 60, 75], [55, 70, 80], [80, 88, 95]],
    // Back
    [[10, 20, 30], [35, 50, 60], [55, 70, 78], [80, 85, 90]],
];

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct TableEntries(BTreeMap<MuscleGroup, BTreeMap<ProgressionLevel, BTreeMap<RepBucket, u32>>>);

impl TryFrom<TableEntries> for PercentileTable {
    type Error = PercentileTableError;

    fn try_from(value: TableEntries) -> Result<Self, Self::Error> {
        let mut cells = [[[0; RepBucket::COUNT]; ProgressionLevel::COUNT]; MuscleGroup::COUNT];
        for group in MuscleGroup::iter() {
            for progression in ProgressionLevel::iter() {
                for reps in RepBucket::iter() {
                    let cell = value
                        .0
                        .get(&group)
                        .and_then(|levels| levels.get(&progression))
                        .and_then(|buckets| buckets.get(&reps))
                        .ok_or(PercentileTableError::MissingCell {
                            group,
                            progression,
                            reps,
                        })?;
                    let percentile = Percentile::new(*cell).map_err(|source| {
                        PercentileTableError::InvalidCell {
                            group,
                            progression,
                            reps,
                            source,
                        }
                    })?;
                    cells[group.index()][progression.index()][reps.index()] = *percentile;
                }
            }
        }
        Ok(Self { cells })
    }
}

impl From<PercentileTable> for TableEntries {
    fn from(value: PercentileTable) -> Self {
        Self(
            MuscleGroup::iter()
                .map(|group| {
                    (
                        group,
                        ProgressionLevel::iter()
                            .map(|progression| {
                                (
                                    progression,
                                    RepBucket::iter()
                                        .map(|reps| {
                                            (
                                                reps,
                                                u32::from(value.lookup(group, progression, reps)),
                                            )
                                        })
                                        .collect(),
                                )
                            })
                            .collect(),
                    )
                })
                .collect(),
        )
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PercentileTableError {
    #[error("Missing percentile for {group} level {progression} with {reps} reps")]
    MissingCell {
        group: MuscleGroup,
        progression: ProgressionLevel,
        reps: RepBucket,
    },
    #[error("Invalid percentile for {group} level {progression} with {reps} reps: {source}")]
    InvalidCell {
        group: MuscleGroup,
        progression: ProgressionLevel,
        reps: RepBucket,
        source: PercentileError,
    },
}
