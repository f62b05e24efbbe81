//! CLI Adapter.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use url::Url;

use crate::app::commands::directory::RepositorySource;
use crate::app::commands::enable::EnableOptions;
use crate::app::commands::{delete_branch, enable};
use crate::app::logging;
use crate::domain::{AppError, rollout};
use crate::services::GitHubRestClient;

#[derive(Parser)]
#[command(name = "scanfleet")]
#[command(version)]
#[command(
    about = "Roll out a CodeQL code-scanning workflow across GitHub repositories",
    long_about = None
)]
struct Cli {
    /// GitHub token used to authenticate every API call
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(
        long,
        global = true,
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com"
    )]
    api_url: Url,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit the workflow file and raise a pull request on each target repository
    #[clap(visible_alias = "enable")]
    #[clap(group(
        ArgGroup::new("source").required(true).multiple(false).args(["repos", "organization", "csv_file"])
    ))]
    EnableScanning {
        /// Target repositories as owner/name pairs
        repos: Vec<String>,

        /// Target every repository of an organization
        #[arg(short, long)]
        organization: Option<String>,

        /// CSV file whose first column lists owner/name pairs
        #[arg(short, long, value_name = "FILE")]
        csv_file: Option<PathBuf>,

        /// Local workflow file to commit
        #[arg(short = 'f', long, value_name = "FILE", default_value = "codeql.yml")]
        workflow_file: PathBuf,

        /// Append run output to this file
        #[arg(short, long, value_name = "FILE")]
        log_file: Option<PathBuf>,

        /// Recreate the working branch and overwrite managed default setup
        #[arg(long)]
        force: bool,
    },
    /// Delete the rollout working branch from every repository of an organization
    DeleteBranch {
        /// Organization whose repositories are cleaned up
        #[arg(short, long)]
        organization: String,

        /// Branch to delete
        #[arg(short, long, default_value = rollout::WORKFLOW_BRANCH)]
        branch: String,

        /// Append run output to this file
        #[arg(short, long, value_name = "FILE")]
        log_file: Option<PathBuf>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn execute(cli: Cli) -> Result<i32, AppError> {
    let token = cli
        .token
        .ok_or_else(|| AppError::config_error("A GitHub token is required; set GITHUB_TOKEN or pass --token"))?;
    let host = GitHubRestClient::new(token, cli.api_url)?;

    match cli.command {
        Commands::EnableScanning {
            repos,
            organization,
            csv_file,
            workflow_file,
            log_file,
            force,
        } => {
            logging::init(log_file.as_deref())?;
            let source = RepositorySource::from_cli(repos, organization, csv_file)?;
            let summary =
                enable::execute(&host, source, &EnableOptions { workflow_file, force })?;
            Ok(summary.exit_code())
        }
        Commands::DeleteBranch { organization, branch, log_file } => {
            logging::init(log_file.as_deref())?;
            let summary = delete_branch::execute(&host, &organization, &branch)?;
            Ok(summary.exit_code())
        }
    }
}
