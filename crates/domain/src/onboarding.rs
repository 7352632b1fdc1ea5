use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{MuscleGroup, Percentile, ReadError, StrengthReport, UpdateError};

#[allow(async_fn_in_trait)]
pub trait OnboardingService {
    async fn get_onboarding_status(&self) -> Result<OnboardingStatus, ReadError>;
    async fn skip_home_test(&self) -> Result<OnboardingStatus, UpdateError>;
    async fn complete_home_test(
        &self,
        report: &StrengthReport,
    ) -> Result<OnboardingStatus, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait OnboardingRepository {
    async fn read_onboarding_status(&self) -> Result<OnboardingStatus, ReadError>;
    async fn write_onboarding_status(
        &self,
        status: OnboardingStatus,
    ) -> Result<OnboardingStatus, UpdateError>;
}

/// Whether the user has taken the home strength test.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnboardingStatus {
    #[default]
    Pending,
    Skipped,
    Completed {
        percentiles: BTreeMap<MuscleGroup, Percentile>,
    },
}

impl OnboardingStatus {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, OnboardingStatus::Pending)
    }
}

impl From<&StrengthReport> for OnboardingStatus {
    fn from(value: &StrengthReport) -> Self {
        OnboardingStatus::Completed {
            percentiles: value.percentiles(),
        }
    }
}
