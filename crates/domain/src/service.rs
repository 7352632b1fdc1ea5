use log::{debug, error, info, warn};

use crate::{
    OnboardingRepository, OnboardingService, OnboardingStatus, ReadError, StorageError,
    StrengthReport, UpdateError,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

trait RepositoryError: std::fmt::Display {
    fn is_offline(&self) -> bool;
}

impl RepositoryError for ReadError {
    fn is_offline(&self) -> bool {
        matches!(self, ReadError::Storage(StorageError::NoConnection))
    }
}

impl RepositoryError for UpdateError {
    fn is_offline(&self) -> bool {
        matches!(self, UpdateError::Storage(StorageError::NoConnection))
    }
}

/// Missing connectivity is expected and only logged for debugging.
fn logged<T, E: RepositoryError>(result: Result<T, E>, action: &str) -> Result<T, E> {
    match &result {
        Err(err) if err.is_offline() => debug!("failed to {action}: {err}"),
        Err(err) => error!("failed to {action}: {err}"),
        Ok(_) => {}
    }
    result
}

impl<R: OnboardingRepository> OnboardingService for Service<R> {
    async fn get_onboarding_status(&self) -> Result<OnboardingStatus, ReadError> {
        logged(
            self.repository.read_onboarding_status().await,
            "get onboarding status",
        )
    }

    async fn skip_home_test(&self) -> Result<OnboardingStatus, UpdateError> {
        if let OnboardingStatus::Completed { .. } = self.get_onboarding_status().await? {
            warn!("home test already completed, keeping its results");
            return Err(UpdateError::AlreadyCompleted);
        }
        info!("home test skipped");
        logged(
            self.repository
                .write_onboarding_status(OnboardingStatus::Skipped)
                .await,
            "store skipped home test",
        )
    }

    async fn complete_home_test(
        &self,
        report: &StrengthReport,
    ) -> Result<OnboardingStatus, UpdateError> {
        info!("home test completed");
        logged(
            self.repository.write_onboarding_status(report.into()).await,
            "store home test results",
        )
    }
}
