//! GitHub REST API client implementation using reqwest.

use std::collections::BTreeMap;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use serde_json::{Value, json};
use url::Url;

use crate::domain::{
    AppError, DefaultSetupState, NewPullRequest, Repository, WorkflowCommit, rollout,
};
use crate::ports::GitHubPort;

const ACCEPT_JSON: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// Blocking HTTP client for the GitHub REST API.
#[derive(Clone)]
pub struct GitHubRestClient {
    token: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for GitHubRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubRestClient")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl GitHubRestClient {
    /// Create a new client for the given token and API base URL.
    pub fn new(token: String, api_url: Url) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { token, api_url, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.api_url
            .join(path)
            .map_err(|e| AppError::Configuration(format!("Invalid API path '{}': {}", path, e)))
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = request
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, ACCEPT_JSON)
            .header(USER_AGENT, concat!("scanfleet/", env!("CARGO_PKG_VERSION")))
            .header(API_VERSION_HEADER, API_VERSION)
            .send()?;
        Ok(response)
    }

    fn get(&self, path: &str) -> Result<Response, AppError> {
        self.send(self.client.get(self.endpoint(path)?))
    }
}

/// Read an unexpected response into the generic API error.
fn unexpected(status: StatusCode, response: Response) -> AppError {
    let message = response.text().unwrap_or_else(|_| "<unreadable body>".to_string());
    AppError::Api { status: status.as_u16(), message }
}

fn string_field<'a>(body: &'a Value, pointer: &str) -> Result<&'a str, AppError> {
    body.pointer(pointer).and_then(Value::as_str).ok_or_else(|| AppError::Api {
        status: 200,
        message: format!("Response is missing field '{}'", pointer),
    })
}

/// Extract the `rel="next"` target from a `Link` response header.
fn next_page_url(link: &str) -> Option<String> {
    for part in link.split(',') {
        let mut sections = part.trim().split(';');
        let target = sections.next()?.trim();
        let is_next = sections.any(|param| param.trim() == r#"rel="next""#);
        if is_next && target.starts_with('<') && target.ends_with('>') {
            return Some(target[1..target.len() - 1].to_string());
        }
    }
    None
}

impl GitHubPort for GitHubRestClient {
    fn list_org_repos(&self, org: &str) -> Result<Vec<Repository>, AppError> {
        let mut url = self.endpoint(&format!("orgs/{}/repos", org))?;
        let mut repos = Vec::new();
        let mut page = 1u32;

        loop {
            tracing::debug!("Fetching repository listing page {} for {}", page, org);
            let response = self.send(self.client.get(url.clone()))?;
            match response.status() {
                StatusCode::OK => {}
                StatusCode::NOT_FOUND => {
                    return Err(AppError::OrganizationNotFound(org.to_string()));
                }
                status => return Err(unexpected(status, response)),
            }

            let link = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let mut batch: Vec<Repository> = response.json()?;
            repos.append(&mut batch);

            match link.as_deref().and_then(next_page_url) {
                Some(next) => {
                    url = Url::parse(&next).map_err(|e| {
                        AppError::Configuration(format!("Invalid next-page URL '{}': {}", next, e))
                    })?;
                    page += 1;
                }
                None => break,
            }
        }

        Ok(repos)
    }

    fn get_repo(&self, full_name: &str) -> Result<Repository, AppError> {
        let response = self.get(&format!("repos/{}", full_name))?;
        match response.status() {
            StatusCode::OK => Ok(response.json()?),
            StatusCode::NOT_FOUND => Err(AppError::RepositoryNotFound(full_name.to_string())),
            status => Err(unexpected(status, response)),
        }
    }

    fn list_languages(&self, full_name: &str) -> Result<BTreeMap<String, u64>, AppError> {
        let response = self.get(&format!("repos/{}/languages", full_name))?;
        match response.status() {
            StatusCode::OK => Ok(response.json()?),
            StatusCode::NOT_FOUND => Err(AppError::RepositoryNotFound(full_name.to_string())),
            status => Err(unexpected(status, response)),
        }
    }

    fn default_setup_state(&self, full_name: &str) -> Result<DefaultSetupState, AppError> {
        let response = self.get(&format!("repos/{}/code-scanning/default-setup", full_name))?;
        match response.status() {
            StatusCode::OK => {
                let body: Value = response.json()?;
                if body["state"] == "configured" {
                    Ok(DefaultSetupState::Configured)
                } else {
                    Ok(DefaultSetupState::NotConfigured)
                }
            }
            StatusCode::FORBIDDEN => {
                Err(AppError::AdvancedSecurityDisabled(full_name.to_string()))
            }
            StatusCode::NOT_FOUND => Err(AppError::RepositoryNotFound(full_name.to_string())),
            status => Err(unexpected(status, response)),
        }
    }

    fn disable_default_setup(&self, full_name: &str) -> Result<(), AppError> {
        let url = self.endpoint(&format!("repos/{}/code-scanning/default-setup", full_name))?;
        let response = self.send(self.client.patch(url).json(&json!({ "state": "not-configured" })))?;
        match response.status() {
            StatusCode::OK | StatusCode::ACCEPTED => Ok(()),
            StatusCode::FORBIDDEN => {
                Err(AppError::AdvancedSecurityDisabled(full_name.to_string()))
            }
            StatusCode::NOT_FOUND => Err(AppError::RepositoryNotFound(full_name.to_string())),
            status => Err(unexpected(status, response)),
        }
    }

    fn branch_head_sha(&self, full_name: &str, branch: &str) -> Result<String, AppError> {
        let response = self.get(&format!("repos/{}/branches/{}", full_name, branch))?;
        match response.status() {
            StatusCode::OK => {
                let body: Value = response.json()?;
                Ok(string_field(&body, "/commit/sha")?.to_string())
            }
            StatusCode::NOT_FOUND => Err(AppError::BranchNotFound {
                repo: full_name.to_string(),
                branch: branch.to_string(),
            }),
            status => Err(unexpected(status, response)),
        }
    }

    fn create_ref(&self, full_name: &str, branch: &str, sha: &str) -> Result<String, AppError> {
        let url = self.endpoint(&format!("repos/{}/git/refs", full_name))?;
        let body = json!({ "ref": format!("refs/heads/{}", branch), "sha": sha });
        let response = self.send(self.client.post(url).json(&body))?;
        match response.status() {
            StatusCode::CREATED => {
                let body: Value = response.json()?;
                Ok(string_field(&body, "/ref")?.to_string())
            }
            StatusCode::UNPROCESSABLE_ENTITY => Err(AppError::BranchAlreadyExists {
                repo: full_name.to_string(),
                branch: branch.to_string(),
            }),
            status => Err(unexpected(status, response)),
        }
    }

    fn delete_ref(&self, full_name: &str, branch: &str) -> Result<(), AppError> {
        let url = self.endpoint(&format!("repos/{}/git/refs/heads/{}", full_name, branch))?;
        let response = self.send(self.client.delete(url))?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            StatusCode::UNPROCESSABLE_ENTITY => Err(AppError::RefMissing {
                repo: full_name.to_string(),
                branch: branch.to_string(),
            }),
            status => Err(unexpected(status, response)),
        }
    }

    fn workflow_file_sha(
        &self,
        full_name: &str,
        path: &str,
    ) -> Result<Option<String>, AppError> {
        let response = self.get(&format!("repos/{}/contents/{}", full_name, path))?;
        match response.status() {
            StatusCode::OK => {
                let body: Value = response.json()?;
                Ok(Some(string_field(&body, "/sha")?.to_string()))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(unexpected(status, response)),
        }
    }

    fn put_workflow_file(
        &self,
        full_name: &str,
        path: &str,
        commit: &WorkflowCommit,
    ) -> Result<String, AppError> {
        let url = self.endpoint(&format!("repos/{}/contents/{}", full_name, path))?;
        let mut body = json!({
            "message": rollout::COMMIT_MESSAGE,
            "committer": {
                "name": rollout::COMMITTER_NAME,
                "email": rollout::COMMITTER_EMAIL,
            },
            "branch": commit.branch,
            "content": BASE64.encode(&commit.content),
        });
        if let Some(sha) = &commit.replaces_sha {
            body["sha"] = json!(sha);
        }

        let response = self.send(self.client.put(url).json(&body))?;
        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let body: Value = response.json()?;
                Ok(string_field(&body, "/content/name")?.to_string())
            }
            StatusCode::NOT_FOUND => Err(AppError::BranchNotFound {
                repo: full_name.to_string(),
                branch: commit.branch.clone(),
            }),
            StatusCode::UNPROCESSABLE_ENTITY => Err(AppError::FileConflict {
                repo: full_name.to_string(),
                path: path.to_string(),
            }),
            status => Err(unexpected(status, response)),
        }
    }

    fn create_pull_request(
        &self,
        full_name: &str,
        pr: &NewPullRequest,
    ) -> Result<String, AppError> {
        let url = self.endpoint(&format!("repos/{}/pulls", full_name))?;
        let body = json!({
            "title": pr.title,
            "head": pr.head,
            "base": pr.base,
            "body": pr.body,
        });
        let response = self.send(self.client.post(url).json(&body))?;
        match response.status() {
            StatusCode::CREATED => {
                let body: Value = response.json()?;
                Ok(string_field(&body, "/html_url")?.to_string())
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                let message = response
                    .json::<Value>()
                    .ok()
                    .and_then(|body| body["message"].as_str().map(str::to_string))
                    .unwrap_or_else(|| "validation failed".to_string());
                Err(AppError::PullRequestRejected { repo: full_name.to_string(), message })
            }
            status => Err(unexpected(status, response)),
        }
    }
}
