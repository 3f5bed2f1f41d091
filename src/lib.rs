//! backport - cherry-pick merged pull requests onto maintenance branches
//!
//! A thin orchestration layer over local `git` and the GitHub API: for a
//! merged pull request and a list of target branches, cherry-pick the
//! change onto a temporary branch per target, push it, and open a review
//! request. Cherry-pick conflicts pause the run; a later invocation with
//! `--continue` resumes it after the operator resolves them.

pub mod auth;
pub mod backport;
pub mod error;
pub mod host;
pub mod state;
pub mod types;
pub mod vcs;
pub mod version;
