//! Error types for backport

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All failure modes of a backport run.
///
/// Every variant here is fatal to the run (exit code 1) except where the
/// caller explicitly discards the result (label add/remove, best-effort
/// branch deletion, which never surface an `Error` at all).
#[derive(Debug, Error)]
pub enum Error {
    /// Credential token could not be loaded
    #[error("failed to load credentials: {0}")]
    Credentials(String),

    /// Invalid invocation configuration (project, branch list, commits)
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The source pull request has not been merged yet
    #[error("pull request #{0} is not merged")]
    NotMerged(u64),

    /// Resume was requested but the working tree has uncommitted changes
    #[error(
        "working tree is not clean; finish the conflict resolution first: git cherry-pick --continue"
    )]
    DirtyWorkTree,

    /// Cherry-pick stopped on conflicts; resume state has been saved
    #[error("cherry-pick failed with conflicts")]
    CherryPickConflict,

    /// A git command exited with a non-zero status
    #[error("git {command} failed: {detail}")]
    Git {
        /// The git subcommand that failed
        command: String,
        /// Trimmed stderr of the failed invocation
        detail: String,
    },

    /// Resume-state file could not be read, written, or parsed
    #[error("state error: {0}")]
    State(String),

    /// Remote URL did not match the expected account/repo pattern
    #[error("could not determine account from remote url: {0}")]
    RemoteAccount(String),

    /// GitHub API failure reported outside of octocrab's error type
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// GitHub API failure from octocrab (carries the response body)
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Interactive prompt could not be read
    #[error("failed to read prompt input: {0}")]
    Prompt(String),

    /// Operator declined the destructive-reset confirmation
    #[error("aborted by operator")]
    Aborted,
}
