//! Per-run aggregation of repository outcomes.

use std::collections::BTreeMap;

/// Terminal state of one repository's rollout. Each repository produces
/// exactly one outcome per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolloutOutcome {
    /// Workflow committed and pull request raised.
    PullRequestRaised { url: String },
    /// No CodeQL-supported language found; repository skipped.
    NoSupportedLanguage,
    /// Managed default setup already configured; repository skipped.
    DefaultSetupConfigured,
    /// Workflow file already committed on the default branch; repository
    /// skipped.
    WorkflowAlreadyPresent,
}

/// Accumulates outcomes across a run and reports the end-of-run summary.
///
/// Built from explicit per-repository results; errors never abort the run.
#[derive(Debug, Default)]
pub struct RunSummary {
    succeeded: Vec<(String, String)>,
    no_language: Vec<String>,
    default_setup: Vec<String>,
    workflow_exists: Vec<String>,
    deleted: Vec<String>,
    errors: BTreeMap<String, String>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, repo: &str, outcome: RolloutOutcome) {
        match outcome {
            RolloutOutcome::PullRequestRaised { url } => {
                self.succeeded.push((repo.to_string(), url));
            }
            RolloutOutcome::NoSupportedLanguage => self.no_language.push(repo.to_string()),
            RolloutOutcome::DefaultSetupConfigured => self.default_setup.push(repo.to_string()),
            RolloutOutcome::WorkflowAlreadyPresent => self.workflow_exists.push(repo.to_string()),
        }
    }

    pub fn record_error(&mut self, repo: &str, message: impl Into<String>) {
        self.errors.insert(repo.to_string(), message.into());
    }

    /// Record one successful branch deletion in a cleanup run.
    pub fn record_deleted(&mut self, repo: &str) {
        self.deleted.push(repo.to_string());
    }

    /// Total number of repositories that produced an outcome.
    pub fn processed(&self) -> usize {
        self.succeeded.len()
            + self.no_language.len()
            + self.default_setup.len()
            + self.workflow_exists.len()
            + self.deleted.len()
            + self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Process exit code for the run: 0 when every repository either
    /// succeeded or was skipped, 2 when at least one repository errored.
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() { 2 } else { 0 }
    }

    /// Emit one summary line per non-empty category plus the total count.
    pub fn report(&self) {
        tracing::info!("Processed {} repositories", self.processed());

        if !self.succeeded.is_empty() {
            tracing::info!("Raised {} pull request(s):", self.succeeded.len());
            for (repo, url) in &self.succeeded {
                tracing::info!("  {} -> {}", repo, url);
            }
        }
        if !self.no_language.is_empty() {
            tracing::info!(
                "Skipped {} repositories with no supported language: {}",
                self.no_language.len(),
                self.no_language.join(", ")
            );
        }
        if !self.default_setup.is_empty() {
            tracing::info!(
                "Skipped {} repositories with managed default setup enabled: {}",
                self.default_setup.len(),
                self.default_setup.join(", ")
            );
        }
        if !self.workflow_exists.is_empty() {
            tracing::info!(
                "Skipped {} repositories where the workflow file already exists: {}",
                self.workflow_exists.len(),
                self.workflow_exists.join(", ")
            );
        }
        if !self.deleted.is_empty() {
            tracing::info!(
                "Deleted {} branch(es): {}",
                self.deleted.len(),
                self.deleted.join(", ")
            );
        }
        if self.errors.is_empty() {
            tracing::info!("No errors were found during this run");
        } else {
            for (repo, message) in &self.errors {
                tracing::error!("Repository: [{}] Message: [{}]", repo, message);
            }
        }
    }
}
