//! Git driver
//!
//! Thin wrappers over blocking `git` child processes. Every operation the
//! tool issues is a [`GitCommand`] variant rendered to argv by
//! [`GitCommand::args`], so there is no string-built shell anywhere and
//! argument boundaries survive branch names with unusual characters.
//!
//! The [`Vcs`] trait is the seam the orchestrator drives; [`GitCli`] is
//! the real implementation, tests substitute a scripted mock.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// A single git operation, one variant per command the tool issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCommand {
    /// `git reset --hard`
    ResetHard,
    /// `git clean -df`
    Clean,
    /// `git fetch`
    Fetch,
    /// `git checkout <branch>`
    Checkout {
        /// Branch to check out
        branch: String,
    },
    /// `git pull`
    Pull,
    /// `git branch -D <name>`
    DeleteBranch {
        /// Branch to delete
        name: String,
    },
    /// `git checkout -b <name>`
    CreateBranch {
        /// Branch to create and switch to
        name: String,
    },
    /// `git cherry-pick -x <commits...>` - `-x` records the origin of each
    /// picked commit in its message
    CherryPick {
        /// Commits to apply, in order
        commits: Vec<String>,
    },
    /// `git log HEAD...<target>` - empty output means nothing to push
    LogAhead {
        /// Branch to compare HEAD against
        target: String,
    },
    /// `git push <remote> :<branch>` - delete a pre-existing remote branch
    PushDelete {
        /// Remote name
        remote: String,
        /// Branch to delete on the remote
        branch: String,
    },
    /// `git push --set-upstream <remote> <branch>`
    PushUpstream {
        /// Remote name
        remote: String,
        /// Branch to push
        branch: String,
    },
    /// `git remote get-url <remote>`
    RemoteUrl {
        /// Remote name
        remote: String,
    },
    /// `git status --porcelain` - any output means a dirty tree
    Status,
}

impl GitCommand {
    /// Render the argv passed to `git` (without the leading binary name).
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let owned = |items: &[&str]| items.iter().map(ToString::to_string).collect::<Vec<_>>();
        match self {
            Self::ResetHard => owned(&["reset", "--hard"]),
            Self::Clean => owned(&["clean", "-df"]),
            Self::Fetch => owned(&["fetch"]),
            Self::Checkout { branch } => owned(&["checkout", branch.as_str()]),
            Self::Pull => owned(&["pull"]),
            Self::DeleteBranch { name } => owned(&["branch", "-D", name.as_str()]),
            Self::CreateBranch { name } => owned(&["checkout", "-b", name.as_str()]),
            Self::CherryPick { commits } => {
                let mut args = owned(&["cherry-pick", "-x"]);
                args.extend(commits.iter().cloned());
                args
            }
            Self::LogAhead { target } => owned(&["log", &format!("HEAD...{target}")]),
            Self::PushDelete { remote, branch } => {
                owned(&["push", remote.as_str(), &format!(":{branch}")])
            }
            Self::PushUpstream { remote, branch } => {
                owned(&["push", "--set-upstream", remote.as_str(), branch.as_str()])
            }
            Self::RemoteUrl { remote } => owned(&["remote", "get-url", remote.as_str()]),
            Self::Status => owned(&["status", "--porcelain"]),
        }
    }

    /// Subcommand name, used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ResetHard => "reset",
            Self::Clean => "clean",
            Self::Fetch => "fetch",
            Self::Checkout { .. } | Self::CreateBranch { .. } => "checkout",
            Self::Pull => "pull",
            Self::DeleteBranch { .. } => "branch",
            Self::CherryPick { .. } => "cherry-pick",
            Self::LogAhead { .. } => "log",
            Self::PushDelete { .. } | Self::PushUpstream { .. } => "push",
            Self::RemoteUrl { .. } => "remote",
            Self::Status => "status",
        }
    }
}

/// Version-control operations the orchestrator needs.
///
/// All methods block until the underlying process exits. Failure
/// semantics follow the workflow: branch and remote-branch deletion are
/// best-effort and return nothing; `cherry_pick` reports conflicts as
/// `Ok(false)` rather than an error (the caller decides to save state);
/// everything else is fatal on non-zero exit.
pub trait Vcs {
    /// Discard all local modifications (`git reset --hard`)
    fn reset_hard(&self) -> Result<()>;
    /// Remove untracked files and directories (`git clean -df`)
    fn clean(&self) -> Result<()>;
    /// Update remote tracking refs (`git fetch`)
    fn fetch(&self) -> Result<()>;
    /// Switch to an existing branch
    fn checkout(&self, branch: &str) -> Result<()>;
    /// Fast-forward the current branch
    fn pull(&self) -> Result<()>;
    /// Delete a local branch; ignores failure (the branch may not exist)
    fn delete_branch(&self, name: &str);
    /// Create and switch to a new branch
    fn create_branch(&self, name: &str) -> Result<()>;
    /// Apply commits onto HEAD. `Ok(false)` means the pick stopped on
    /// conflicts and the operator has to finish it manually.
    fn cherry_pick(&self, commits: &[String]) -> Result<bool>;
    /// Whether HEAD has any commits the target branch does not
    fn commits_ahead(&self, target: &str) -> Result<bool>;
    /// Delete a branch on the remote; ignores failure
    fn delete_remote_branch(&self, remote: &str, branch: &str);
    /// Push a branch and set its upstream
    fn push_upstream(&self, remote: &str, branch: &str) -> Result<()>;
    /// URL of a configured remote
    fn remote_url(&self, remote: &str) -> Result<String>;
    /// Whether the working tree has no uncommitted changes
    fn is_clean(&self) -> Result<bool>;
}

/// [`Vcs`] implementation spawning `git -C <root>` child processes.
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    /// Create a driver for the repository at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn command(&self, cmd: &GitCommand) -> Command {
        let mut process = Command::new("git");
        process.arg("-C").arg(&self.root).args(cmd.args());
        process
    }

    /// Run a command whose output streams to the operator's terminal.
    /// Non-zero exit is fatal.
    fn run(&self, cmd: &GitCommand) -> Result<()> {
        debug!(command = ?cmd.args(), "running git");
        let status = self
            .command(cmd)
            .status()
            .map_err(|e| Error::Git {
                command: cmd.name().to_string(),
                detail: format!("failed to spawn git: {e}"),
            })?;

        if !status.success() {
            return Err(Error::Git {
                command: cmd.name().to_string(),
                detail: format!("exited with {status}"),
            });
        }
        Ok(())
    }

    /// Run a command and capture stdout. Non-zero exit is fatal and the
    /// error carries trimmed stderr.
    fn run_captured(&self, cmd: &GitCommand) -> Result<String> {
        debug!(command = ?cmd.args(), "running git (captured)");
        let output = self
            .command(cmd)
            .output()
            .map_err(|e| Error::Git {
                command: cmd.name().to_string(),
                detail: format!("failed to spawn git: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git {
                command: cmd.name().to_string(),
                detail: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a command whose failure is part of normal operation. Output is
    /// suppressed; the exit status is returned unless spawning failed.
    fn run_unchecked(&self, cmd: &GitCommand) -> bool {
        debug!(command = ?cmd.args(), "running git (best-effort)");
        self.command(cmd)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

impl Vcs for GitCli {
    fn reset_hard(&self) -> Result<()> {
        self.run(&GitCommand::ResetHard)
    }

    fn clean(&self) -> Result<()> {
        self.run(&GitCommand::Clean)
    }

    fn fetch(&self) -> Result<()> {
        self.run(&GitCommand::Fetch)
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.run(&GitCommand::Checkout {
            branch: branch.to_string(),
        })
    }

    fn pull(&self) -> Result<()> {
        self.run(&GitCommand::Pull)
    }

    fn delete_branch(&self, name: &str) {
        let deleted = self.run_unchecked(&GitCommand::DeleteBranch {
            name: name.to_string(),
        });
        debug!(name, deleted, "deleted stale local branch");
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.run(&GitCommand::CreateBranch {
            name: name.to_string(),
        })
    }

    fn cherry_pick(&self, commits: &[String]) -> Result<bool> {
        let cmd = GitCommand::CherryPick {
            commits: commits.to_vec(),
        };
        debug!(command = ?cmd.args(), "running git");
        // Conflicts are reported through the exit status, not an Err:
        // the operator resolves them and the run resumes later.
        let status = self.command(&cmd).status().map_err(|e| Error::Git {
            command: cmd.name().to_string(),
            detail: format!("failed to spawn git: {e}"),
        })?;
        Ok(status.success())
    }

    fn commits_ahead(&self, target: &str) -> Result<bool> {
        let output = self.run_captured(&GitCommand::LogAhead {
            target: target.to_string(),
        })?;
        Ok(!output.trim().is_empty())
    }

    fn delete_remote_branch(&self, remote: &str, branch: &str) {
        let deleted = self.run_unchecked(&GitCommand::PushDelete {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        debug!(remote, branch, deleted, "deleted stale remote branch");
    }

    fn push_upstream(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&GitCommand::PushUpstream {
            remote: remote.to_string(),
            branch: branch.to_string(),
        })
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        let output = self.run_captured(&GitCommand::RemoteUrl {
            remote: remote.to_string(),
        })?;
        Ok(output.trim().to_string())
    }

    fn is_clean(&self) -> Result<bool> {
        let output = self.run_captured(&GitCommand::Status)?;
        Ok(output.trim().is_empty())
    }
}
