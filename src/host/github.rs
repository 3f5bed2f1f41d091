//! GitHub review-host implementation

use crate::error::{Error, Result};
use crate::host::{HostConfig, ReviewHost};
use crate::types::{MergedChange, ReviewRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::debug;

/// GitHub host using octocrab
pub struct GitHubHost {
    client: Octocrab,
    config: HostConfig,
}

impl GitHubHost {
    /// Create a new GitHub host for the given project.
    pub fn new(token: &str, config: HostConfig) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self { client, config })
    }
}

/// Helper to convert an octocrab PR to our `MergedChange` type
fn change_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> MergedChange {
    MergedChange {
        number: pr.number,
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        body: pr.body.clone(),
        // GitHub only stamps merged_at on merged PRs
        merged: pr.merged_at.is_some(),
        merge_commit: pr.merge_commit_sha.clone(),
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}

/// Helper to convert an octocrab PR to our `ReviewRequest` type
fn review_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> ReviewRequest {
    ReviewRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
    }
}

#[async_trait]
impl ReviewHost for GitHubHost {
    async fn merged_change(&self, number: u64) -> Result<MergedChange> {
        debug!(number, "fetching pull request");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(number)
            .await?;

        let change = change_from_octocrab(&pr);
        debug!(number, merged = change.merged, "fetched pull request");
        Ok(change)
    }

    async fn create_review_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: Option<&str>,
    ) -> Result<ReviewRequest> {
        debug!(head, base, "creating review request");
        let pulls = self.client.pulls(&self.config.owner, &self.config.repo);
        let mut builder = pulls.create(title, head, base);

        if let Some(body_text) = body {
            builder = builder.body(body_text);
        }

        let pr = builder.send().await?;

        let request = review_from_octocrab(&pr);
        debug!(number = request.number, "created review request");
        Ok(request)
    }

    async fn add_labels(&self, number: u64, labels: &[String]) -> Result<()> {
        debug!(number, ?labels, "adding labels");
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .add_labels(number, labels)
            .await?;
        Ok(())
    }

    async fn remove_label(&self, number: u64, label: &str) -> Result<()> {
        debug!(number, label, "removing label");
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .remove_label(number, label)
            .await?;
        Ok(())
    }

    fn config(&self) -> &HostConfig {
        &self.config
    }
}
