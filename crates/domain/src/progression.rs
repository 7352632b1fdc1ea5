use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{MuscleGroup, OutOfDomainError};

/// Variant of an exercise progression, ordered by difficulty.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumCount,
    strum::EnumIter,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum ProgressionLevel {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl ProgressionLevel {
    #[must_use]
    pub fn value(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.value() - 1)
    }
}

impl TryFrom<u8> for ProgressionLevel {
    type Error = OutOfDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ProgressionLevel::One),
            2 => Ok(ProgressionLevel::Two),
            3 => Ok(ProgressionLevel::Three),
            4 => Ok(ProgressionLevel::Four),
            _ => Err(OutOfDomainError::ProgressionLevel(value)),
        }
    }
}

impl From<ProgressionLevel> for u8 {
    fn from(value: ProgressionLevel) -> Self {
        value.value()
    }
}

impl fmt::Display for ProgressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Exercises of a muscle group, easiest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionScheme {
    pub exercises: Vec<String>,
}

impl ProgressionScheme {
    pub fn new<I, S>(exercises: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exercises: exercises.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// The exercise of a 1-based level.
    #[must_use]
    pub fn exercise(&self, level: u8) -> Option<&str> {
        let index = usize::from(level).checked_sub(1)?;
        self.exercises.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressionSchemes(BTreeMap<MuscleGroup, ProgressionScheme>);

impl ProgressionSchemes {
    #[must_use]
    pub fn new(schemes: BTreeMap<MuscleGroup, ProgressionScheme>) -> Self {
        Self(schemes)
    }

    #[must_use]
    pub fn get(&self, group: MuscleGroup) -> Option<&ProgressionScheme> {
        self.0.get(&group)
    }

    pub fn resolve_exercise_name(
        &self,
        group: MuscleGroup,
        level: u8,
    ) -> Result<&str, NotFoundError> {
        let scheme = self.get(group).ok_or(NotFoundError::Scheme(group))?;
        scheme.exercise(level).ok_or(NotFoundError::Level {
            group,
            level,
            levels: scheme.len(),
        })
    }
}

impl Default for ProgressionSchemes {
    fn default() -> Self {
        Self(
            DEFAULT_PROGRESSIONS
                .iter()
                .map(|(group, exercises)| {
                    (*group, ProgressionScheme::new(exercises.iter().copied()))
                })
                .collect(),
        )
    }
}

static DEFAULT_PROGRESSIONS: [(MuscleGroup, [&str; 4]); 4] = [
    (
        MuscleGroup::FrontLegs,
        [
            "Assisted Squat",
            "Bodyweight Squat",
            "Bulgarian Split Squat",
            "Pistol Squat",
        ],
    ),
    (
        MuscleGroup::BackLegs,
        [
            "Glute Bridge",
            "Single Leg Glute Bridge",
            "Single Leg Romanian Deadlift",
            "Nordic Hamstring Curl",
        ],
    ),
    (
        MuscleGroup::Chest,
        [
            "Incline Push Up",
            "Push Up",
            "Decline Push Up",
            "Archer Push Up",
        ],
    ),
    (
        MuscleGroup::Back,
        ["Towel Row", "Inverted Row", "Chin Up", "Pull Up"],
    ),
];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("No progression configured for {}", .0.name())]
    Scheme(MuscleGroup),
    #[error("No level {level} exercise for {} ({levels} levels)", .group.name())]
    Level {
        group: MuscleGroup,
        level: u8,
        levels: usize,
    },
}
