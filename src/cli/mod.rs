//! CLI surface for the backport binary

pub mod backport;

use clap::Parser;

/// Cherry-pick a merged pull request onto maintenance branches and open
/// a backport PR for each.
#[derive(Debug, Parser)]
#[command(
    name = "backport",
    version,
    about = "Cherry-pick merged pull requests onto maintenance branches and open backport PRs",
    after_help = "In case of cherry-pick conflicts, fix them, then run:\n\n    \
                  git cherry-pick --continue\n    backport <change> --continue"
)]
pub struct Cli {
    /// The merged pull request number (e.g. 2345)
    pub change: u64,

    /// Commit ids to cherry-pick; defaults to the PR's merge commit.
    /// Take them from `git log` on the source branch - the ids shown on
    /// the host are wrong for squashed PRs.
    pub commits: Vec<String>,

    /// Comma-separated target branches (e.g. "6.x,6.4")
    #[arg(short = 'b', long = "to_branches", required_unless_present = "resume")]
    pub to_branches: Option<String>,

    /// Assume yes. Warning: discards local changes without asking.
    #[arg(long)]
    pub yes: bool,

    /// Continue after fixing cherry-pick conflicts
    #[arg(long = "continue")]
    pub resume: bool,

    /// Branch the pull request was merged into
    #[arg(long = "from_branch", default_value = "master")]
    pub from_branch: String,

    /// Remote to push temporary branches to (your fork)
    #[arg(short = 'r', long)]
    pub remote: Option<String>,

    /// The GitHub project
    #[arg(long, default_value = "elastic/beats")]
    pub project: String,

    /// Skip setting version labels
    #[arg(long = "no_version")]
    pub no_version: bool,
}
