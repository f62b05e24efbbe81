//! Resolving the target repository set from the CLI's three input modes.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, Repository, RunSummary};
use crate::ports::GitHubPort;

/// Where the run's target repositories come from. The three modes are
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositorySource {
    /// Every repository of one organization.
    Organization(String),
    /// Explicit `owner/name` pairs from the command line.
    Names(Vec<String>),
    /// `owner/name` pairs read from the first column of a CSV file.
    CsvFile(PathBuf),
}

impl RepositorySource {
    /// Map the parsed CLI arguments to a source. clap enforces mutual
    /// exclusivity; this rejects the empty case.
    pub fn from_cli(
        repos: Vec<String>,
        organization: Option<String>,
        csv_file: Option<PathBuf>,
    ) -> Result<Self, AppError> {
        if let Some(org) = organization {
            return Ok(RepositorySource::Organization(org));
        }
        if let Some(path) = csv_file {
            return Ok(RepositorySource::CsvFile(path));
        }
        if repos.is_empty() {
            return Err(AppError::config_error(
                "No repositories given; pass owner/name arguments, --organization, or --csv-file",
            ));
        }
        Ok(RepositorySource::Names(repos))
    }

    /// Resolve to concrete repositories. An unknown organization is fatal;
    /// an unknown repository in a name list is recorded on the summary and
    /// the rest of the list still resolves.
    pub fn resolve(
        self,
        host: &dyn GitHubPort,
        summary: &mut RunSummary,
    ) -> Result<Vec<Repository>, AppError> {
        match self {
            RepositorySource::Organization(org) => {
                tracing::info!("Listing repositories of organization {}", org);
                host.list_org_repos(&org)
            }
            RepositorySource::Names(names) => Ok(lookup_each(host, &names, summary)),
            RepositorySource::CsvFile(path) => {
                let names = read_repository_csv(&path)?;
                Ok(lookup_each(host, &names, summary))
            }
        }
    }
}

fn lookup_each(
    host: &dyn GitHubPort,
    names: &[String],
    summary: &mut RunSummary,
) -> Vec<Repository> {
    let mut repos = Vec::with_capacity(names.len());
    for name in names {
        match host.get_repo(name) {
            Ok(repo) => repos.push(repo),
            Err(e) => {
                tracing::error!("Skipping {}: {}", name, e);
                summary.record_error(name, e.to_string());
            }
        }
    }
    repos
}

/// First trimmed non-empty column of each CSV record. No header row is
/// expected; rows may have trailing columns.
fn read_repository_csv(path: &Path) -> Result<Vec<String>, AppError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(file);

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(name) = record.get(0).map(str::trim).filter(|name| !name.is_empty()) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
