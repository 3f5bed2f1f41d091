//! Backport execution - effectful operations
//!
//! Drives the per-branch workflow: check out and update the target,
//! cherry-pick onto a fresh temporary branch, push it, and open the
//! review request. On a cherry-pick conflict the remaining branches are
//! persisted and the run stops; [`resume`] continues a saved run after
//! the operator finished the pick manually.

use crate::backport::plan;
use crate::error::{Error, Result};
use crate::host::ReviewHost;
use crate::state;
use crate::types::{BackportConfig, MergedChange, ReviewRequest};
use crate::vcs::Vcs;
use crate::version;
use std::path::PathBuf;
use tracing::{debug, warn};

/// External collaborators of one backport run.
pub struct BackportContext {
    /// Local working-copy driver
    pub vcs: Box<dyn Vcs>,
    /// Review-host client
    pub host: Box<dyn ReviewHost>,
    /// Working-tree root (state file and version file live here)
    pub root: PathBuf,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default)]
pub struct BackportReport {
    /// Review requests created, in target-branch order
    pub created: Vec<ReviewRequest>,
    /// Branches skipped because the pick produced no new commits
    pub skipped: Vec<String>,
}

/// Fetch the source pull request and require it to be merged.
///
/// Called before any VCS mutation: an unmerged PR aborts the run with
/// nothing touched.
pub async fn fetch_merged_change(host: &dyn ReviewHost, number: u64) -> Result<MergedChange> {
    let change = host.merged_change(number).await?;
    if !change.merged {
        return Err(Error::NotMerged(number));
    }
    Ok(change)
}

/// Determine the commits to cherry-pick.
///
/// Explicit ids win; otherwise the change's merge commit is used. A
/// merged PR without one (rare squash edge cases) needs explicit ids.
pub fn resolve_commits(explicit: &[String], change: &MergedChange) -> Result<Vec<String>> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }

    change
        .merge_commit
        .clone()
        .map(|sha| vec![sha])
        .ok_or_else(|| {
            Error::Config(format!(
                "pull request #{} has no merge commit; pass commit ids explicitly",
                change.number
            ))
        })
}

/// Run a fresh backport.
///
/// Discards local changes, updates the source branch, then processes
/// every configured target branch. The caller has already confirmed the
/// destructive reset.
pub async fn start(
    ctx: &BackportContext,
    config: &BackportConfig,
    remote: &str,
) -> Result<BackportReport> {
    ctx.vcs.reset_hard()?;
    ctx.vcs.clean()?;
    ctx.vcs.fetch()?;
    ctx.vcs.checkout(&config.from_branch)?;
    ctx.vcs.pull()?;

    process_branches(ctx, config, remote, &config.to_branches, false).await
}

/// Continue a run interrupted by a cherry-pick conflict.
///
/// The caller has verified the working tree is clean (i.e. the operator
/// ran `git cherry-pick --continue`). The first remaining branch's pick
/// is therefore already complete on the current temporary branch; it
/// goes straight to the push phase. On full success the state file is
/// removed.
pub async fn resume(
    ctx: &BackportContext,
    config: &BackportConfig,
    remaining: &[String],
    remote: &str,
) -> Result<BackportReport> {
    let report = process_branches(ctx, config, remote, remaining, true).await?;
    state::clear_state(&ctx.root);
    Ok(report)
}

async fn process_branches(
    ctx: &BackportContext,
    config: &BackportConfig,
    remote: &str,
    branches: &[String],
    mut pick_done: bool,
) -> Result<BackportReport> {
    let mut report = BackportReport::default();

    for (index, target) in branches.iter().enumerate() {
        let tmp = plan::temp_branch(config.change, target);

        if pick_done {
            // The operator already finished this branch's pick by hand.
            pick_done = false;
        } else {
            ctx.vcs.checkout(target)?;
            ctx.vcs.pull()?;

            ctx.vcs.delete_branch(&tmp);
            ctx.vcs.create_branch(&tmp)?;

            if !ctx.vcs.cherry_pick(&config.commits)? {
                // The single suspension point: persist the conflicted
                // branch and everything after it, then stop. Resumption
                // is a separate process invocation.
                state::save_state(&ctx.root, config, &branches[index..])?;
                return Err(Error::CherryPickConflict);
            }
        }

        if !ctx.vcs.commits_ahead(target)? {
            debug!(branch = %target, "no commits to push, skipping branch");
            report.skipped.push(target.clone());
            continue;
        }

        ctx.vcs.delete_remote_branch(remote, &tmp);
        ctx.vcs.push_upstream(remote, &tmp)?;

        // Re-fetch per branch: title and body may have changed since the
        // run began (or since the run was suspended).
        let original = ctx.host.merged_change(config.change).await?;

        let remote_url = ctx.vcs.remote_url(remote)?;
        let account = plan::account_from_remote_url(&remote_url)?;
        let head = format!("{account}:{tmp}");

        let title = plan::review_title(config.change, target, &original.title);
        let body = plan::review_body(config.change, target, original.body.as_deref());

        let request = ctx
            .host
            .create_review_request(&head, target, &title, Some(&body))
            .await?;

        // Label bookkeeping is fire-and-forget: a label failure never
        // aborts a run that already pushed and opened the PR.
        if let Err(e) = ctx
            .host
            .add_labels(
                request.number,
                &[
                    plan::LABEL_BACKPORT.to_string(),
                    plan::LABEL_REVIEW.to_string(),
                ],
            )
            .await
        {
            warn!(number = request.number, error = %e, "failed to label review request");
        }

        if let Err(e) = ctx
            .host
            .remove_label(config.change, plan::LABEL_NEEDS_BACKPORT)
            .await
        {
            debug!(change = config.change, error = %e, "failed to remove needs_backport label");
        }

        if !config.skip_version
            && let Some(release) = version::read_version(&ctx.root)
        {
            if let Err(e) = ctx
                .host
                .add_labels(config.change, &[plan::version_label(&release)])
                .await
            {
                debug!(change = config.change, error = %e, "failed to add version label");
            }
        }

        report.created.push(request);
    }

    Ok(report)
}
