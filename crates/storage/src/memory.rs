use std::{collections::VecDeque, sync::Mutex};

use ascent_app::log;
use ascent_domain::{OnboardingRepository, OnboardingStatus, ReadError, StorageError, UpdateError};

/// Store for sessions without a data directory. Nothing survives the process.
#[derive(Default)]
pub struct Memory {
    onboarding: Mutex<OnboardingStatus>,
    log: Mutex<VecDeque<log::Entry>>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> StorageError {
    StorageError::Other(err.to_string().into())
}

impl OnboardingRepository for Memory {
    async fn read_onboarding_status(&self) -> Result<OnboardingStatus, ReadError> {
        let status = self.onboarding.lock().map_err(poisoned)?;
        Ok(status.clone())
    }

    async fn write_onboarding_status(
        &self,
        status: OnboardingStatus,
    ) -> Result<OnboardingStatus, UpdateError> {
        *self.onboarding.lock().map_err(poisoned)? = status.clone();
        Ok(status)
    }
}

impl log::Repository for Memory {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.log
            .lock()
            .map(|entries| entries.clone())
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self
            .log
            .lock()
            .map_err(|err| log::Error::Unknown(err.to_string()))?;
        log::push_entry(&mut entries, entry);
        Ok(())
    }
}
