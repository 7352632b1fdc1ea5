#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod flow;
mod onboarding;
mod percentile;
mod progression;
mod scoring;
mod service;

pub use error::*;
pub use flow::*;
pub use home_test::*;
pub use onboarding::*;
pub use percentile::*;
pub use progression::*;
pub use scoring::*;
pub use service::*;
