//! Fixed identities of the rollout: branch, file path, commit and pull
//! request shapes.

/// Working branch the workflow file is committed to.
pub const WORKFLOW_BRANCH: &str = "gh-cli/codescanningworkflow";

/// Repository path of the committed workflow file.
pub const WORKFLOW_PATH: &str = ".github/workflows/codeql.yml";

/// Commit message used for every workflow-file commit.
pub const COMMIT_MESSAGE: &str = "AUTOMATED: commited CodeQL file";

/// Committer identity attached to workflow-file commits.
pub const COMMITTER_NAME: &str = "gh-cli add-files";
pub const COMMITTER_EMAIL: &str = "security@clsa";

const PR_TITLE: &str = "Automated PR: CodeQL workflow added";

const PR_BODY: &str = r#"## What does this PR do?

This is an automated PR created by your security team to enable GitHub Code Scanning on your repository. This will allow us to find and fix security vulnerabilities in your code.

For more information on Code Scanning, please see [here](https://docs.github.com/en/code-security/code-scanning).

## How do I merge this PR?

This PR should have triggered CodeQL scans for each [eligible](https://codeql.github.com/docs/codeql-overview/supported-languages-and-frameworks/) language in this repository. If these jobs have passed, you can merge this PR. If they have failed, please take a look at the logs to identify what went wrong and contact the security team if you require assistance.

The most common issue that will cause this PR to fail is if the autobuilder is unable to build your codebase (for compiled languages). We will need your help to feed in a build command that will allow your codebase to compile. Please see [here](https://docs.github.com/en/code-security/code-scanning/automatically-scanning-your-code-for-vulnerabilities-and-errors/configuring-code-scanning#building-your-code) for more information.

Another common issue is that the incorrect runner type may be used. By default we run our scans on Ubuntu. If your codebase requires a different runner type, please make the relevant changes to this PR to run on a different runner. Please contact the security team if you need assistance choosing a different runner.

## What happens after I merge this PR?

Once this PR is merged, CodeQL will be enabled on your repository. On every PR to your default branch, we will help you scan your code for security vulnerabilities.

If you require any further assistance, please contact the security team.
"#;

/// Payload for one workflow-file commit through the contents endpoint.
///
/// The content stays raw here; base64 encoding happens at the transport
/// boundary.
#[derive(Debug, Clone)]
pub struct WorkflowCommit {
    /// Branch the commit lands on.
    pub branch: String,
    /// Raw workflow file bytes.
    pub content: Vec<u8>,
    /// Prior blob sha, required by the platform when updating an existing
    /// file. `None` for a fresh create.
    pub replaces_sha: Option<String>,
}

/// Pull request proposed back to the default branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    pub title: String,
    pub head: String,
    pub base: String,
    pub body: String,
}

impl NewPullRequest {
    /// The fixed rollout pull request, from the working branch to the
    /// repository's default branch.
    pub fn codeql_rollout(default_branch: &str) -> Self {
        Self {
            title: PR_TITLE.to_string(),
            head: WORKFLOW_BRANCH.to_string(),
            base: default_branch.to_string(),
            body: PR_BODY.to_string(),
        }
    }
}
