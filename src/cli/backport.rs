//! Backport command - gather phase and dispatch
//!
//! Everything interactive lives here: credential loading, the
//! destructive-reset confirmation, the remote prompt, and result
//! reporting. The effectful per-branch loop is in the library
//! (`backport::backport`), driven through the `Vcs` and `ReviewHost`
//! seams.

use crate::cli::Cli;
use anstream::println;
use backport::auth;
use backport::backport::{
    self as engine, BackportContext, BackportReport, fetch_merged_change, resolve_commits,
    split_branches,
};
use backport::error::{Error, Result};
use backport::host::{GitHubHost, HostConfig};
use backport::state;
use backport::types::{BackportConfig, MergedChange};
use backport::vcs::{GitCli, Vcs};
use dialoguer::{Confirm, Input};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::debug;

/// Run the backport command
pub async fn run(args: Cli) -> Result<()> {
    let (token, source) = auth::load_token()?;
    debug!(?source, "loaded credentials");

    let host_config = HostConfig::parse(&args.project)?;
    let host = GitHubHost::new(&token, host_config)?;

    let root = std::env::current_dir()
        .map_err(|e| Error::Config(format!("could not determine working directory: {e}")))?;
    let vcs = GitCli::new(&root);

    // Validate the source change before anything touches the working
    // copy or the host: an unmerged PR aborts with no mutation at all.
    let change = fetch_merged_change(&host, args.change).await?;
    println!(
        "{} #{}: {}",
        "Backporting".bold(),
        change.number,
        change.title
    );

    if args.resume {
        run_resume(args, host, vcs, root).await
    } else {
        run_start(args, &change, host, vcs, root).await
    }
}

/// Fresh run: confirm the destructive reset, resolve the remote, go.
async fn run_start(
    args: Cli,
    change: &MergedChange,
    host: GitHubHost,
    vcs: GitCli,
    root: PathBuf,
) -> Result<()> {
    let to_branches = split_branches(args.to_branches.as_deref().unwrap_or_default());
    if to_branches.is_empty() {
        return Err(Error::Config("no target branches given".to_string()));
    }

    let commits = resolve_commits(&args.commits, change)?;

    let config = BackportConfig {
        change: args.change,
        commits,
        to_branches,
        from_branch: args.from_branch,
        remote: args.remote,
        project: args.project,
        assume_yes: args.yes,
        skip_version: args.no_version,
    };

    if !config.assume_yes {
        let confirmed = Confirm::new()
            .with_prompt("This will discard all local changes. Continue?")
            .default(false)
            .interact()
            .map_err(|e| Error::Prompt(e.to_string()))?;
        if !confirmed {
            println!("{}", "Aborted".dimmed());
            return Err(Error::Aborted);
        }
    }

    let remote = resolve_remote(config.remote.as_deref())?;

    let ctx = BackportContext {
        vcs: Box::new(vcs),
        host: Box::new(host),
        root,
    };

    finish(engine::start(&ctx, &config, &remote).await, config.change)
}

/// Resumed run: refuse on a dirty tree, then continue the saved branches.
async fn run_resume(args: Cli, host: GitHubHost, vcs: GitCli, root: PathBuf) -> Result<()> {
    if !vcs.is_clean()? {
        return Err(Error::DirtyWorkTree);
    }

    let saved = state::load_state(&root)?;
    let config = saved.config.clone().resumed_with(args.remote);
    let remote = resolve_remote(config.remote.as_deref())?;

    println!(
        "{} {} remaining branch(es): {}",
        "Resuming".bold(),
        saved.remaining_branches.len(),
        saved.remaining_branches.join(", ").cyan()
    );

    let ctx = BackportContext {
        vcs: Box::new(vcs),
        host: Box::new(host),
        root,
    };

    finish(
        engine::resume(&ctx, &config, &saved.remaining_branches, &remote).await,
        config.change,
    )
}

/// Use the configured remote or ask the operator for one.
fn resolve_remote(configured: Option<&str>) -> Result<String> {
    if let Some(remote) = configured
        && !remote.trim().is_empty()
    {
        return Ok(remote.trim().to_string());
    }

    let remote: String = Input::new()
        .with_prompt("Remote to push to (your fork)")
        .interact_text()
        .map_err(|e| Error::Prompt(e.to_string()))?;

    let remote = remote.trim().to_string();
    if remote.is_empty() {
        return Err(Error::Config("no remote given".to_string()));
    }
    Ok(remote)
}

/// Report the outcome; a conflict additionally prints the fix-then-resume
/// instructions before the error propagates to the exit code.
fn finish(result: Result<BackportReport>, change: u64) -> Result<()> {
    match result {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(Error::CherryPickConflict) => {
            print_conflict_help(change);
            Err(Error::CherryPickConflict)
        }
        Err(e) => Err(e),
    }
}

fn print_report(report: &BackportReport) {
    println!();
    for target in &report.skipped {
        println!(
            "{}",
            format!("No commits to push to {target}, skipped").dimmed()
        );
    }
    for request in &report.created {
        println!("{} {}", "Created:".green(), request.html_url);
    }
    if report.created.is_empty() {
        println!("{}", "No review requests were needed.".dimmed());
    } else {
        println!("Please go and check the review request(s) and add the review tags.");
    }
}

fn print_conflict_help(change: u64) {
    println!();
    println!("{}", "Looks like you have cherry-pick conflicts.".yellow());
    println!("Fix them, then run:");
    println!("    git cherry-pick --continue");
    println!("    backport {change} --continue");
}
