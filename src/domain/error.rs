use std::io;

use thiserror::Error;

/// Library-wide error type for scanfleet operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Transport-level HTTP failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON in an API response.
    #[error("Failed to decode API response: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed repository CSV file.
    #[error("Failed to read CSV file: {0}")]
    Csv(#[from] csv::Error),

    /// Listing endpoint returned 404 on the first page.
    #[error("Organization '{0}' does not exist")]
    OrganizationNotFound(String),

    /// Repository lookup returned 404.
    #[error("Repository '{0}' does not exist")]
    RepositoryNotFound(String),

    /// Default-setup endpoint returned 403.
    #[error("Repository '{0}' does not have Advanced Security enabled")]
    AdvancedSecurityDisabled(String),

    /// Branch lookup returned 404.
    #[error("Branch '{branch}' does not exist in repository '{repo}'")]
    BranchNotFound { repo: String, branch: String },

    /// Ref creation returned 422.
    #[error("Branch '{branch}' already exists in repository '{repo}'")]
    BranchAlreadyExists { repo: String, branch: String },

    /// Ref deletion returned 422.
    #[error("Branch '{branch}' does not exist in repository '{repo}', nothing to delete")]
    RefMissing { repo: String, branch: String },

    /// Contents PUT returned 422.
    #[error("File '{path}' conflicts with existing content in repository '{repo}'")]
    FileConflict { repo: String, path: String },

    /// Pull request creation returned 422.
    #[error("Pull request rejected for repository '{repo}': {message}")]
    PullRequestRejected { repo: String, message: String },

    /// Any other unexpected API status.
    #[error("Unexpected API response ({status}): {message}")]
    Api { status: u16, message: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
