use std::{
    collections::VecDeque,
    fs, io,
    path::{Path, PathBuf},
};

use ascent_app::log;
use ascent_domain::{OnboardingRepository, OnboardingStatus, ReadError, StorageError, UpdateError};
use serde::{Serialize, de::DeserializeOwned};

use crate::{KEY_LOG, KEY_ONBOARDING};

/// Key-value store keeping one JSON file per key in a data directory.
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|err| StorageError::Other(Box::new(err)))?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|_| StorageError::Corrupt(key.to_string())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Other(Box::new(err))),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(value).map_err(|err| StorageError::Other(Box::new(err)))?;
        fs::write(self.path(key), json).map_err(|err| StorageError::Other(Box::new(err)))
    }
}

impl OnboardingRepository for LocalStorage {
    async fn read_onboarding_status(&self) -> Result<OnboardingStatus, ReadError> {
        Ok(self
            .get::<OnboardingStatus>(KEY_ONBOARDING)?
            .unwrap_or_default())
    }

    async fn write_onboarding_status(
        &self,
        status: OnboardingStatus,
    ) -> Result<OnboardingStatus, UpdateError> {
        self.set(KEY_ONBOARDING, &status)?;
        Ok(status)
    }
}

impl log::Repository for LocalStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.get::<VecDeque<log::Entry>>(KEY_LOG)
            .map(Option::unwrap_or_default)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    /// A corrupt log is replaced by a log holding only the new entry.
    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = match self.get::<VecDeque<log::Entry>>(KEY_LOG) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(StorageError::Corrupt(_)) => VecDeque::new(),
            Err(err) => return Err(log::Error::Unknown(err.to_string())),
        };
        log::push_entry(&mut entries, entry);
        self.set(KEY_LOG, &entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
