//! Shared test fixtures

#![allow(dead_code)]

pub mod mock_host;
pub mod mock_vcs;

pub use mock_host::MockReviewHost;
pub use mock_vcs::MockVcs;

use backport::backport::BackportContext;
use backport::host::HostConfig;
use backport::types::{BackportConfig, MergedChange};
use std::fs;
use std::path::Path;

pub fn host_config() -> HostConfig {
    HostConfig {
        owner: "elastic".to_string(),
        repo: "beats".to_string(),
    }
}

/// A merged change fixture for PR #2565
pub fn merged_change(number: u64) -> MergedChange {
    MergedChange {
        number,
        title: "Fix harvester shutdown".to_string(),
        body: Some("Details of the original fix".to_string()),
        merged: true,
        merge_commit: Some("6490604aa0cf7fa61932a90700e6ca988fc8a527".to_string()),
        html_url: format!("https://github.com/elastic/beats/pull/{number}"),
    }
}

pub fn unmerged_change(number: u64) -> MergedChange {
    MergedChange {
        merged: false,
        ..merged_change(number)
    }
}

/// Config for backporting #2565 to the given branches
pub fn test_config(change: u64, branches: &[&str]) -> BackportConfig {
    BackportConfig {
        change,
        commits: vec!["6490604aa0cf7fa61932a90700e6ca988fc8a527".to_string()],
        to_branches: branches.iter().map(ToString::to_string).collect(),
        from_branch: "master".to_string(),
        remote: Some("fork".to_string()),
        project: "elastic/beats".to_string(),
        assume_yes: true,
        skip_version: false,
    }
}

/// Bundle mock clones into a context rooted at `root`
pub fn make_ctx(vcs: &MockVcs, host: &MockReviewHost, root: &Path) -> BackportContext {
    BackportContext {
        vcs: Box::new(vcs.clone()),
        host: Box::new(host.clone()),
        root: root.to_path_buf(),
    }
}

/// Drop a version declaration file into the tree so the run attaches a
/// `v<version>` label
pub fn write_version_file(root: &Path, version: &str) {
    let dir = root.join("libbeat/version");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("version.go"),
        format!("package version\n\nconst defaultBeatVersion = \"{version}\"\n"),
    )
    .unwrap();
}
