//! Shared testing utilities for scanfleet CLI tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use mockito::{Matcher, Mock, ServerGuard};
use tempfile::TempDir;

pub const WORKFLOW_FIXTURE: &str = "name: CodeQL\non:\n  push:\n    branches: [ \"main\" ]\n";

/// Testing harness: a mock API server plus an isolated work directory that
/// holds the workflow fixture and any log files a test asks for.
#[allow(dead_code)]
pub struct TestContext {
    pub server: ServerGuard,
    root: TempDir,
    workflow_file: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let server = mockito::Server::new();
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let workflow_file = root.path().join("codeql.yml");
        fs::write(&workflow_file, WORKFLOW_FIXTURE).expect("Failed to write workflow fixture");

        Self { server, root, workflow_file }
    }

    /// Build a command for the compiled `scanfleet` binary, pointed at the
    /// mock server.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("scanfleet").expect("Failed to locate scanfleet binary");
        cmd.current_dir(self.root.path())
            .env("GITHUB_TOKEN", "test-token")
            .env("GITHUB_API_URL", self.server.url());
        cmd
    }

    pub fn workflow_file(&self) -> &std::path::Path {
        &self.workflow_file
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("Failed to read test file")
    }

    /// One repository object as the platform's listing endpoints render it.
    pub fn repo_json(&self, org: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "full_name": format!("{}/{}", org, name),
            "name": name,
            "default_branch": "main",
            "private": false,
        })
    }

    /// Single-page organization listing.
    pub fn mock_org_listing(&mut self, org: &str, names: &[&str]) -> Mock {
        let repos: Vec<_> = names.iter().map(|name| self.repo_json(org, name)).collect();
        self.server
            .mock("GET", format!("/orgs/{}/repos", org).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!(repos).to_string())
            .create()
    }

    pub fn mock_get_repo(&mut self, org: &str, name: &str) -> Mock {
        let body = self.repo_json(org, name).to_string();
        self.server
            .mock("GET", format!("/repos/{}/{}", org, name).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    pub fn mock_missing_repo(&mut self, org: &str, name: &str) -> Mock {
        self.server
            .mock("GET", format!("/repos/{}/{}", org, name).as_str())
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create()
    }

    pub fn mock_languages(&mut self, full_name: &str, languages: &[(&str, u64)]) -> Mock {
        let body: serde_json::Map<_, _> = languages
            .iter()
            .map(|(name, bytes)| (name.to_string(), serde_json::json!(bytes)))
            .collect();
        self.server
            .mock("GET", format!("/repos/{}/languages", full_name).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::Value::Object(body).to_string())
            .create()
    }

    pub fn mock_default_setup(&mut self, full_name: &str, state: &str) -> Mock {
        self.server
            .mock("GET", format!("/repos/{}/code-scanning/default-setup", full_name).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "state": state }).to_string())
            .create()
    }

    pub fn mock_workflow_absent(&mut self, full_name: &str) -> Mock {
        self.server
            .mock(
                "GET",
                format!("/repos/{}/contents/.github/workflows/codeql.yml", full_name).as_str(),
            )
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create()
    }

    pub fn mock_workflow_present(&mut self, full_name: &str, sha: &str) -> Mock {
        self.server
            .mock(
                "GET",
                format!("/repos/{}/contents/.github/workflows/codeql.yml", full_name).as_str(),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "name": "codeql.yml", "sha": sha }).to_string())
            .create()
    }

    /// Everything past the gates: branch head, ref creation, file commit,
    /// pull request. Returns the mocks so tests can assert each was hit.
    pub fn mock_rollout_success(&mut self, full_name: &str) -> Vec<Mock> {
        let head = self
            .server
            .mock("GET", format!("/repos/{}/branches/main", full_name).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "main", "commit": {"sha": "abc123"}}"#)
            .create();
        let create_ref = self
            .server
            .mock("POST", format!("/repos/{}/git/refs", full_name).as_str())
            .match_body(Matcher::PartialJson(serde_json::json!({
                "ref": "refs/heads/gh-cli/codescanningworkflow",
                "sha": "abc123",
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ref": "refs/heads/gh-cli/codescanningworkflow"}"#)
            .create();
        let put = self
            .server
            .mock(
                "PUT",
                format!("/repos/{}/contents/.github/workflows/codeql.yml", full_name).as_str(),
            )
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content": {"name": "codeql.yml"}, "commit": {"sha": "7638417"}}"#)
            .create();
        let pulls = self
            .server
            .mock("POST", format!("/repos/{}/pulls", full_name).as_str())
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "html_url": format!("https://github.com/{}/pull/1", full_name)
                })
                .to_string(),
            )
            .create();

        vec![head, create_ref, put, pulls]
    }

    /// Mocks that must never be hit for a repository that gets skipped.
    pub fn forbid_mutations(&mut self, full_name: &str) -> Vec<Mock> {
        let create_ref = self
            .server
            .mock("POST", format!("/repos/{}/git/refs", full_name).as_str())
            .expect(0)
            .create();
        let put = self
            .server
            .mock(
                "PUT",
                format!("/repos/{}/contents/.github/workflows/codeql.yml", full_name).as_str(),
            )
            .expect(0)
            .create();
        let pulls = self
            .server
            .mock("POST", format!("/repos/{}/pulls", full_name).as_str())
            .expect(0)
            .create();

        vec![create_ref, put, pulls]
    }
}
