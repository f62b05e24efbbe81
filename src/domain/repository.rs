use serde::Deserialize;

/// A repository as returned by the hosting platform's listing and lookup
/// endpoints. Re-fetched on every run, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// Globally unique `owner/name` identifier.
    pub full_name: String,
    /// Display name.
    pub name: String,
    /// Branch that pull requests are raised against.
    pub default_branch: String,
}

/// Managed default-setup state for code scanning on a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSetupState {
    Configured,
    NotConfigured,
}

impl DefaultSetupState {
    pub fn is_configured(self) -> bool {
        matches!(self, DefaultSetupState::Configured)
    }
}
