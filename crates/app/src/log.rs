use std::{
    cell::Cell,
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

/// Number of entries kept by a log repository.
pub const MAX_ENTRIES: usize = 100;

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

impl Entry {
    #[must_use]
    pub fn new(level: Level, message: String) -> Self {
        Self {
            time: Local::now().format("%b %d %H:%M:%S").to_string(),
            level,
            message,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Adds an entry to the front of a list of entries, keeping at most [`MAX_ENTRIES`].
pub fn push_entry(entries: &mut VecDeque<Entry>, entry: Entry) {
    entries.push_front(entry);
    entries.truncate(MAX_ENTRIES);
}

static LOGGER: Logger = Logger;

/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(
    repository: Arc<Mutex<dyn Repository>>,
    level: LevelFilter,
) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(repository);
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

struct Logger;

thread_local! {
    // Set while a record is written. Records logged by the repository itself are dropped.
    static WRITING: Cell<bool> = const { Cell::new(false) };
}

impl Logger {
    fn write(repository: &Mutex<dyn Repository>, record: &Record) {
        let message = record.args().to_string();
        eprintln!("{} {}", record.level(), message);

        if let Ok(repository) = repository.lock() {
            let _ = repository.write_entry(Entry::new(record.level(), message));
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) || WRITING.get() {
            return;
        }
        let Some(repository) = LOG.lock().ok().and_then(|log| log.clone()) else {
            return;
        };
        WRITING.set(true);
        Logger::write(&repository, record);
        WRITING.set(false);
    }

    fn flush(&self) {}
}
