//! scanfleet: roll out CodeQL code-scanning workflows across a fleet of repositories.
//!
//! For every selected repository the tool checks CodeQL language coverage and
//! existing scanning configuration, then creates a working branch, commits the
//! workflow file through the contents API and raises a pull request against
//! the default branch. Per-repository failures never abort the run; they are
//! collected and reported in the end-of-run summary.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

pub use app::commands::directory::RepositorySource;
pub use app::commands::enable::EnableOptions;
pub use domain::{AppError, RolloutOutcome, RunSummary};
