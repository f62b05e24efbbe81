//! Cleanup run: delete the rollout working branch across an organization.

use crate::domain::{AppError, RunSummary};
use crate::ports::GitHubPort;

/// Delete `branch` from every repository of `org`. Missing branches and
/// other per-repository failures are recorded on the summary; the run keeps
/// going.
pub fn execute(host: &dyn GitHubPort, org: &str, branch: &str) -> Result<RunSummary, AppError> {
    let repos = host.list_org_repos(org)?;
    tracing::info!("Deleting branch {} across {} repositories of {}", branch, repos.len(), org);

    let mut summary = RunSummary::new();
    for repo in &repos {
        match host.delete_ref(&repo.full_name, branch) {
            Ok(()) => {
                tracing::info!("{}: deleted branch {}", repo.full_name, branch);
                summary.record_deleted(&repo.full_name);
            }
            Err(e) => {
                tracing::error!("{}: {}", repo.full_name, e);
                summary.record_error(&repo.full_name, e.to_string());
            }
        }
    }

    summary.report();
    Ok(summary)
}
