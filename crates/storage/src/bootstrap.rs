use std::{
    collections::VecDeque,
    path::Path,
    sync::{Arc, Mutex},
};

use ascent_app::{
    Config, HomeTestSession,
    log::{self, Repository as _},
};
use ascent_domain::{
    OnboardingRepository, OnboardingStatus, ReadError, Service, StorageError, UpdateError,
};

use crate::{local_storage::LocalStorage, memory::Memory};

/// Storage selected by the configured data directory.
pub enum Store {
    Local(LocalStorage),
    Memory(Memory),
}

impl Store {
    pub fn open(data_dir: Option<&Path>) -> Result<Self, StorageError> {
        Ok(match data_dir {
            Some(dir) => Store::Local(LocalStorage::new(dir)?),
            None => Store::Memory(Memory::new()),
        })
    }
}

impl OnboardingRepository for Store {
    async fn read_onboarding_status(&self) -> Result<OnboardingStatus, ReadError> {
        match self {
            Store::Local(storage) => storage.read_onboarding_status().await,
            Store::Memory(memory) => memory.read_onboarding_status().await,
        }
    }

    async fn write_onboarding_status(
        &self,
        status: OnboardingStatus,
    ) -> Result<OnboardingStatus, UpdateError> {
        match self {
            Store::Local(storage) => storage.write_onboarding_status(status).await,
            Store::Memory(memory) => memory.write_onboarding_status(status).await,
        }
    }
}

impl log::Repository for Store {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match self {
            Store::Local(storage) => storage.read_entries(),
            Store::Memory(memory) => memory.read_entries(),
        }
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        match self {
            Store::Local(storage) => storage.write_entry(entry),
            Store::Memory(memory) => memory.write_entry(entry),
        }
    }
}

/// Installs the logger and prepares a home test session, both backed by the configured
/// data directory, or by memory if none is configured.
pub fn start(config: Config) -> Result<HomeTestSession<Service<Store>>, StorageError> {
    let data_dir = config.data_dir.as_deref();
    let _ = log::init(Arc::new(Mutex::new(Store::open(data_dir)?)), config.log_level);
    let service = Service::new(Store::open(data_dir)?);
    Ok(HomeTestSession::new(config.home_test, service))
}
