//! Backport engine
//!
//! Two-phase pattern:
//! 1. Plan - naming, titles, bodies, remote parsing (pure, testable)
//! 2. Execute - drive git and the review host per target branch (effectful)
//!
//! The engine has two explicit entry points, [`start`] for a fresh run
//! and [`resume`] for continuing after a manually resolved cherry-pick
//! conflict; the caller dispatches, no mode flag is threaded through.

mod execute;
mod plan;

pub use execute::{
    BackportContext, BackportReport, fetch_merged_change, resolve_commits, resume, start,
};
pub use plan::{
    LABEL_BACKPORT, LABEL_NEEDS_BACKPORT, LABEL_REVIEW, account_from_remote_url, review_body,
    review_title, split_branches, temp_branch, version_label,
};
