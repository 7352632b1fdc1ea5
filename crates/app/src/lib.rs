#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod log;
pub mod session;

pub use config::{Config, ConfigError};
pub use session::{HomeTestSession, SessionError};
