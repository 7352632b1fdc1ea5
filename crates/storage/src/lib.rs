#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod bootstrap;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;

pub use bootstrap::{Store, start};

const KEY_ONBOARDING: &str = "onboarding";
const KEY_LOG: &str = "log";
