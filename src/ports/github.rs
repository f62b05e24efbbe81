use std::collections::BTreeMap;

use crate::domain::{AppError, DefaultSetupState, NewPullRequest, Repository, WorkflowCommit};

/// Seam to the repository hosting platform's REST API.
///
/// Every call blocks until the response arrives or the transport fails; no
/// call is retried.
pub trait GitHubPort {
    /// List every repository of an organization, following pagination until
    /// exhausted. A missing organization is an error.
    fn list_org_repos(&self, org: &str) -> Result<Vec<Repository>, AppError>;

    /// Look up a single repository by `owner/name`.
    fn get_repo(&self, full_name: &str) -> Result<Repository, AppError>;

    /// Language breakdown of a repository: language name to byte count.
    fn list_languages(&self, full_name: &str) -> Result<BTreeMap<String, u64>, AppError>;

    /// Managed default-setup state for code scanning.
    fn default_setup_state(&self, full_name: &str) -> Result<DefaultSetupState, AppError>;

    /// Turn managed default setup off so an advanced-setup workflow can take
    /// over.
    fn disable_default_setup(&self, full_name: &str) -> Result<(), AppError>;

    /// Head commit sha of a branch.
    fn branch_head_sha(&self, full_name: &str, branch: &str) -> Result<String, AppError>;

    /// Create `refs/heads/<branch>` pointing at `sha`. Returns the created
    /// ref. An existing branch surfaces as [`AppError::BranchAlreadyExists`].
    fn create_ref(&self, full_name: &str, branch: &str, sha: &str) -> Result<String, AppError>;

    /// Delete `heads/<branch>`. A missing ref surfaces as
    /// [`AppError::RefMissing`].
    fn delete_ref(&self, full_name: &str, branch: &str) -> Result<(), AppError>;

    /// Blob sha of the file at `path` on the default branch, or `None` when
    /// the file does not exist.
    fn workflow_file_sha(&self, full_name: &str, path: &str)
    -> Result<Option<String>, AppError>;

    /// Commit the workflow file at `path` via the contents endpoint. Returns
    /// the created file name.
    fn put_workflow_file(
        &self,
        full_name: &str,
        path: &str,
        commit: &WorkflowCommit,
    ) -> Result<String, AppError>;

    /// Open a pull request and return its human-facing URL.
    fn create_pull_request(
        &self,
        full_name: &str,
        pr: &NewPullRequest,
    ) -> Result<String, AppError>;
}
