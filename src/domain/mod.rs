pub mod error;
pub mod languages;
pub mod outcome;
pub mod repository;
pub mod rollout;

pub use error::AppError;
pub use outcome::{RolloutOutcome, RunSummary};
pub use repository::{DefaultSetupState, Repository};
pub use rollout::{NewPullRequest, WorkflowCommit};
