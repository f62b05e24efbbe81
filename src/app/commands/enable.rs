//! The enable-scanning run: gate each repository, commit the workflow file
//! and raise the pull request.

use std::fs;
use std::path::PathBuf;

use crate::app::commands::directory::RepositorySource;
use crate::domain::{
    AppError, NewPullRequest, Repository, RolloutOutcome, RunSummary, WorkflowCommit, languages,
    rollout,
};
use crate::ports::GitHubPort;

/// Per-run settings of the enable-scanning command.
#[derive(Debug, Clone)]
pub struct EnableOptions {
    /// Local file committed as the workflow.
    pub workflow_file: PathBuf,
    /// Recreate the working branch, overwrite an existing workflow file and
    /// turn managed default setup off instead of skipping.
    pub force: bool,
}

/// Run the rollout over every resolved repository. Repository-level errors
/// are recorded on the summary; only run-level failures (an unreadable
/// workflow file, an unknown organization) abort.
pub fn execute(
    host: &dyn GitHubPort,
    source: RepositorySource,
    options: &EnableOptions,
) -> Result<RunSummary, AppError> {
    let content = fs::read(&options.workflow_file).map_err(|e| {
        AppError::config_error(format!(
            "Failed to read workflow file '{}': {}",
            options.workflow_file.display(),
            e
        ))
    })?;

    let mut summary = RunSummary::new();
    let repos = source.resolve(host, &mut summary)?;
    tracing::info!("Rolling out the workflow to {} repositories", repos.len());

    for repo in &repos {
        match rollout_repository(host, repo, &content, options.force) {
            Ok(outcome) => {
                log_outcome(&repo.full_name, &outcome);
                summary.record(&repo.full_name, outcome);
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

fn log_outcome(repo: &str, outcome: &RolloutOutcome) {
    match outcome {
        RolloutOutcome::PullRequestRaised { url } => {
            tracing::info!("{}: raised pull request {}", repo, url);
        }
        RolloutOutcome::NoSupportedLanguage => {
            tracing::info!("{}: no CodeQL-supported language, skipping", repo);
        }
        RolloutOutcome::DefaultSetupConfigured => {
            tracing::info!("{}: managed default setup already enabled, skipping", repo);
        }
        RolloutOutcome::WorkflowAlreadyPresent => {
            tracing::info!("{}: workflow file already exists, skipping", repo);
        }
    }
}

/// Drive one repository through the gates in order: language, default
/// setup, existing workflow file, then branch, commit and pull request.
fn rollout_repository(
    host: &dyn GitHubPort,
    repo: &Repository,
    content: &[u8],
    force: bool,
) -> Result<RolloutOutcome, AppError> {
    let breakdown = host.list_languages(&repo.full_name)?;
    let supported = languages::supported_languages(&breakdown);
    if supported.is_empty() {
        return Ok(RolloutOutcome::NoSupportedLanguage);
    }
    tracing::debug!("{}: supported languages {}", repo.full_name, supported.join(", "));

    if host.default_setup_state(&repo.full_name)?.is_configured() {
        if !force {
            return Ok(RolloutOutcome::DefaultSetupConfigured);
        }
        tracing::info!("{}: disabling managed default setup", repo.full_name);
        host.disable_default_setup(&repo.full_name)?;
    }

    let existing_sha = host.workflow_file_sha(&repo.full_name, rollout::WORKFLOW_PATH)?;
    if existing_sha.is_some() && !force {
        return Ok(RolloutOutcome::WorkflowAlreadyPresent);
    }

    create_rollout_branch(host, repo, force)?;

    let commit = WorkflowCommit {
        branch: rollout::WORKFLOW_BRANCH.to_string(),
        content: content.to_vec(),
        replaces_sha: existing_sha,
    };
    host.put_workflow_file(&repo.full_name, rollout::WORKFLOW_PATH, &commit)?;

    let pr = NewPullRequest::codeql_rollout(&repo.default_branch);
    let url = host.create_pull_request(&repo.full_name, &pr)?;

    Ok(RolloutOutcome::PullRequestRaised { url })
}

/// Branch the default branch head into the working branch. When forcing, a
/// leftover branch from a prior run is deleted and the creation retried
/// exactly once.
fn create_rollout_branch(
    host: &dyn GitHubPort,
    repo: &Repository,
    force: bool,
) -> Result<(), AppError> {
    let head = host.branch_head_sha(&repo.full_name, &repo.default_branch)?;

    match host.create_ref(&repo.full_name, rollout::WORKFLOW_BRANCH, &head) {
        Ok(_) => Ok(()),
        Err(AppError::BranchAlreadyExists { .. }) if force => {
            tracing::info!("{}: recreating existing branch {}", repo.full_name, rollout::WORKFLOW_BRANCH);
            host.delete_ref(&repo.full_name, rollout::WORKFLOW_BRANCH)?;
            host.create_ref(&repo.full_name, rollout::WORKFLOW_BRANCH, &head)?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}
