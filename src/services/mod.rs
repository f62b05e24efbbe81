mod github_rest;

pub use github_rest::GitHubRestClient;
