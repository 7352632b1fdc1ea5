use ascent_domain::{
    FlowError, FlowState, HomeTestConfig, HomeTestFlow, MuscleGroup, OnboardingService,
    OnboardingStatus, OutOfDomainError, ProgressionScheme, ReadError, StrengthTest, TestResult,
};
use log::warn;

/// Drives the home strength test of a single interactive session.
///
/// Storing the outcome is left to the onboarding service. A failure to store it does not
/// affect the flow, as the service already reports it.
pub struct HomeTestSession<S> {
    strength_test: StrengthTest,
    flow: HomeTestFlow,
    service: S,
}

impl<S: OnboardingService> HomeTestSession<S> {
    pub fn new(config: HomeTestConfig, service: S) -> Self {
        Self {
            strength_test: StrengthTest::new(config),
            flow: HomeTestFlow::new(),
            service,
        }
    }

    pub fn state(&self) -> &FlowState {
        self.flow.state()
    }

    pub fn strength_test(&self) -> &StrengthTest {
        &self.strength_test
    }

    /// Exercises offered for the muscle group currently tested.
    pub fn current_progression(&self) -> Option<(MuscleGroup, &ProgressionScheme)> {
        let group = self.flow.current_group()?;
        self.strength_test
            .config()
            .progressions
            .get(group)
            .map(|scheme| (group, scheme))
    }

    pub async fn onboarding_status(&self) -> Result<OnboardingStatus, ReadError> {
        self.service.get_onboarding_status().await
    }

    /// Whether the home test is still to be taken. It is offered if the status is unknown.
    pub async fn needs_home_test(&self) -> bool {
        match self.service.get_onboarding_status().await {
            Ok(status) => status.is_pending(),
            Err(_) => true,
        }
    }

    pub fn begin(&mut self) -> Result<&FlowState, SessionError> {
        Ok(self.flow.begin()?)
    }

    /// Records the result of the current muscle group as entered by the user.
    pub async fn record(
        &mut self,
        progression: u8,
        reps: &str,
    ) -> Result<&FlowState, SessionError> {
        let result = TestResult::parse(progression, reps)?;
        self.flow.advance(&self.strength_test, result)?;
        if let FlowState::Results(report) = self.flow.state() {
            if self.service.complete_home_test(report).await.is_err() {
                warn!("home test results are not stored");
            }
        }
        Ok(self.flow.state())
    }

    pub async fn skip(&mut self) -> Result<(), SessionError> {
        self.flow.skip()?;
        if self.service.skip_home_test().await.is_err() {
            warn!("skipping the home test is not stored");
        }
        Ok(())
    }

    /// Starts over after an interruption. Partial results are discarded.
    pub fn restart(&mut self) {
        self.flow.reset();
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] OutOfDomainError),
    #[error(transparent)]
    Flow(#[from] FlowError),
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use ascent_domain::{Percentile, StorageError, StrengthReport, UpdateError};
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct Service {
        status: RefCell<OnboardingStatus>,
        offline: bool,
    }

    impl OnboardingService for Service {
        async fn get_onboarding_status(&self) -> Result<OnboardingStatus, ReadError> {
            Ok(self.status.borrow().clone())
        }

        async fn skip_home_test(&self) -> Result<OnboardingStatus, UpdateError> {
            if self.offline {
                return Err(StorageError::NoConnection.into());
            }
            *self.status.borrow_mut() = OnboardingStatus::Skipped;
            Ok(OnboardingStatus::Skipped)
        }

        async fn complete_home_test(
            &self,
            report: &StrengthReport,
        ) -> Result<OnboardingStatus, UpdateError> {
            if self.offline {
                return Err(StorageError::NoConnection.into());
            }
            *self.status.borrow_mut() = report.into();
            Ok(self.status.borrow().clone())
        }
    }

    #[tokio::test]
    async fn test_complete_home_test() {
        let mut session = HomeTestSession::new(HomeTestConfig::default(), Service::default());

        assert!(session.needs_home_test().await);

        session.begin().unwrap();
        assert_eq!(
            session.current_progression().map(|(group, scheme)| (group, scheme.len())),
            Some((MuscleGroup::FrontLegs, 4))
        );

        for (progression, reps) in [(2, "high"), (1, "low"), (3, "intermediate"), (4, "high")] {
            session.record(progression, reps).await.unwrap();
        }

        assert!(matches!(session.state(), FlowState::Results(_)));
        assert_eq!(session.current_progression(), None);
        assert!(!session.needs_home_test().await);
        assert_eq!(
            session.onboarding_status().await.unwrap(),
            OnboardingStatus::Completed {
                percentiles: [
                    (MuscleGroup::FrontLegs, 75),
                    (MuscleGroup::BackLegs, 10),
                    (MuscleGroup::Chest, 70),
                    (MuscleGroup::Back, 90),
                ]
                .into_iter()
                .map(|(group, value)| (group, Percentile::new(value).unwrap()))
                .collect()
            }
        );
    }

    #[tokio::test]
    async fn test_record_invalid_input() {
        let mut session = HomeTestSession::new(HomeTestConfig::default(), Service::default());
        session.begin().unwrap();

        assert_eq!(
            session.record(5, "high").await,
            Err(SessionError::Input(OutOfDomainError::ProgressionLevel(5)))
        );
        assert_eq!(
            session.record(2, "medium").await,
            Err(SessionError::Input(OutOfDomainError::RepBucket(
                "medium".to_string()
            )))
        );
        assert_eq!(session.state(), &FlowState::Testing(MuscleGroup::FrontLegs));
    }

    #[tokio::test]
    async fn test_skip() {
        let mut session = HomeTestSession::new(HomeTestConfig::default(), Service::default());

        session.skip().await.unwrap();

        assert_eq!(session.state(), &FlowState::Skipped);
        assert_eq!(
            session.onboarding_status().await.unwrap(),
            OnboardingStatus::Skipped
        );
        assert!(!session.needs_home_test().await);
        assert_eq!(
            session.skip().await,
            Err(SessionError::Flow(FlowError::Finished))
        );
    }

    #[tokio::test]
    async fn test_skip_offline() {
        let mut session = HomeTestSession::new(
            HomeTestConfig::default(),
            Service {
                offline: true,
                ..Service::default()
            },
        );

        assert_eq!(session.skip().await, Ok(()));
        assert_eq!(session.state(), &FlowState::Skipped);
    }

    #[tokio::test]
    async fn test_complete_home_test_offline() {
        let mut session = HomeTestSession::new(
            HomeTestConfig::default(),
            Service {
                offline: true,
                ..Service::default()
            },
        );

        for (progression, reps) in [(2, "high"), (1, "low"), (3, "intermediate"), (4, "high")] {
            session.record(progression, reps).await.unwrap();
        }

        let FlowState::Results(report) = session.state() else {
            panic!("expected results");
        };
        assert_eq!(report.get(MuscleGroup::Back).map(|e| *e.percentile), Some(90));
        assert!(session.needs_home_test().await);
        assert_eq!(
            session.record(2, "high").await,
            Err(SessionError::Flow(FlowError::Finished))
        );
    }

    #[tokio::test]
    async fn test_restart() {
        let mut session = HomeTestSession::new(HomeTestConfig::default(), Service::default());
        session.record(2, "high").await.unwrap();

        session.restart();

        assert_eq!(session.state(), &FlowState::Intro);
        assert_eq!(
            session.onboarding_status().await.unwrap(),
            OnboardingStatus::Pending
        );
    }
}
