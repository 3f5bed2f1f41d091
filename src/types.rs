//! Core types for backport

use serde::{Deserialize, Serialize};

/// Invocation configuration for a backport run.
///
/// Immutable once a run starts. On `--continue` a fresh config is
/// reconstructed by merging the persisted one with the resuming
/// invocation (see [`BackportConfig::resumed_with`]); the config is never
/// mutated in place mid-run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackportConfig {
    /// Source pull request number
    pub change: u64,
    /// Commit ids to cherry-pick (resolved to the merge commit when the
    /// invocation gave none)
    pub commits: Vec<String>,
    /// Ordered target branches
    pub to_branches: Vec<String>,
    /// Branch the change was merged into
    pub from_branch: String,
    /// Remote to push temporary branches to (prompted when absent)
    pub remote: Option<String>,
    /// GitHub project as "owner/repo"
    pub project: String,
    /// Skip the destructive-reset confirmation prompt
    pub assume_yes: bool,
    /// Skip the version label on the original pull request
    pub skip_version: bool,
}

impl BackportConfig {
    /// Merge a persisted config with the flags of a resuming invocation.
    ///
    /// Everything comes from the saved run except the remote, which the
    /// operator may override (or supply for the first time) on the
    /// `--continue` command line.
    #[must_use]
    pub fn resumed_with(mut self, remote_override: Option<String>) -> Self {
        if remote_override.is_some() {
            self.remote = remote_override;
        }
        self
    }
}

/// The source pull request, fetched from the review host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedChange {
    /// Pull request number
    pub number: u64,
    /// Pull request title
    pub title: String,
    /// Pull request body (may be empty on the host)
    pub body: Option<String>,
    /// Whether the pull request has been merged
    pub merged: bool,
    /// Merge commit SHA, when the host recorded one
    pub merge_commit: Option<String>,
    /// Web URL of the pull request
    pub html_url: String,
}

/// A backport review request created on the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Pull request number
    pub number: u64,
    /// Web URL of the pull request
    pub html_url: String,
    /// Base branch (the backport target)
    pub base_ref: String,
    /// Head reference ("account:branch")
    pub head_ref: String,
    /// Pull request title
    pub title: String,
}
