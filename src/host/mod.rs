//! Review-host client
//!
//! Provides a narrow interface over the code-hosting API: fetch the
//! merged source change, open a backport review request, and manage
//! labels on both.

mod github;

pub use github::GitHubHost;

use crate::error::{Error, Result};
use crate::types::{MergedChange, ReviewRequest};
use async_trait::async_trait;

/// Repository coordinates on the review host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl HostConfig {
    /// Parse an "owner/repo" project identifier.
    pub fn parse(project: &str) -> Result<Self> {
        match project.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(Error::Config(format!(
                "project must be \"owner/repo\", got \"{project}\""
            ))),
        }
    }
}

/// Review-host operations the backport workflow needs.
///
/// Fetch and create failures are fatal to the run; the orchestrator
/// deliberately discards label add/remove results (fire-and-forget), so
/// implementations should report those errors but never need to make
/// them recoverable.
#[async_trait]
pub trait ReviewHost: Send + Sync {
    /// Fetch a pull request by number
    async fn merged_change(&self, number: u64) -> Result<MergedChange>;

    /// Open a review request proposing `head` be merged into `base`
    async fn create_review_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: Option<&str>,
    ) -> Result<ReviewRequest>;

    /// Add labels to a pull request
    async fn add_labels(&self, number: u64, labels: &[String]) -> Result<()>;

    /// Remove a single label from a pull request
    async fn remove_label(&self, number: u64, label: &str) -> Result<()>;

    /// Get the host configuration
    fn config(&self) -> &HostConfig;
}
