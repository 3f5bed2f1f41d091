//! Backport planning - pure functions for naming and request content
//!
//! No I/O happens here - all data is passed in, making it easy to unit
//! test. The formats match what reviewers already expect on the host:
//! deterministic temporary branch names and a title/body pair that link
//! the backport PR back to its source.

use crate::error::{Error, Result};
use regex::Regex;

/// Label added to every created backport PR.
pub const LABEL_BACKPORT: &str = "backport";

/// Label added to every created backport PR.
pub const LABEL_REVIEW: &str = "review";

/// Label removed from the original PR once a backport PR exists.
pub const LABEL_NEEDS_BACKPORT: &str = "needs_backport";

/// Split a comma-separated branch list, dropping empty entries.
pub fn split_branches(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|branch| !branch.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Deterministic temporary branch name for one (change, target) pair.
///
/// Re-running the same backport reuses the name; stale local or remote
/// copies are deleted before the new branch is created.
pub fn temp_branch(change: u64, target: &str) -> String {
    format!("backport_{change}_{target}")
}

/// Title of the backport review request.
pub fn review_title(change: u64, target: &str, original_title: &str) -> String {
    format!("Cherry-pick #{change} to {target}: {original_title}")
}

/// Body of the backport review request, referencing the original change.
pub fn review_body(change: u64, target: &str, original_body: Option<&str>) -> String {
    format!(
        "Cherry-pick of PR #{change} to {target} branch. Original message: \n\n{}",
        original_body.unwrap_or_default()
    )
}

/// Version label attached to the original PR, e.g. `v7.1.0`.
pub fn version_label(version: &str) -> String {
    format!("v{version}")
}

/// Extract the account name from a remote URL.
///
/// Handles both ssh (`git@github.com:account/repo.git`) and https
/// (`https://github.com/account/repo.git`) remotes.
pub fn account_from_remote_url(url: &str) -> Result<String> {
    let url = url.trim();
    let pattern = Regex::new(r"github\.com[:/](?P<account>[^/:]+)/")
        .map_err(|e| Error::RemoteAccount(format!("invalid account pattern: {e}")))?;

    pattern
        .captures(url)
        .and_then(|caps| caps.name("account"))
        .map(|account| account.as_str().to_string())
        .ok_or_else(|| Error::RemoteAccount(url.to_string()))
}
