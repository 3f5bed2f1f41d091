//! Scripted Vcs mock for testing
//!
//! Records every git operation the orchestrator issues, in order, as a
//! rendered command line; conflicts and empty picks are scripted per
//! target branch.

#![allow(dead_code)]

use backport::error::Result;
use backport::vcs::Vcs;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

struct Inner {
    calls: Mutex<Vec<String>>,
    /// Target branch of the most recent checkout; cherry-pick conflicts
    /// are scripted against it.
    current_target: Mutex<Option<String>>,
    conflict_branches: Mutex<HashSet<String>>,
    empty_branches: Mutex<HashSet<String>>,
    remote_url: Mutex<String>,
    clean: Mutex<bool>,
}

/// Call-recording mock `Vcs`. Clones share state, so tests can keep a
/// handle for assertions after moving a clone into the context.
#[derive(Clone)]
pub struct MockVcs {
    inner: Arc<Inner>,
}

impl MockVcs {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                calls: Mutex::new(Vec::new()),
                current_target: Mutex::new(None),
                conflict_branches: Mutex::new(HashSet::new()),
                empty_branches: Mutex::new(HashSet::new()),
                remote_url: Mutex::new("git@github.com:someuser/beats.git".to_string()),
                clean: Mutex::new(true),
            }),
        }
    }

    // === Scripting ===

    /// Make the cherry-pick onto `branch` stop on conflicts
    pub fn conflict_on(&self, branch: &str) {
        self.inner
            .conflict_branches
            .lock()
            .unwrap()
            .insert(branch.to_string());
    }

    /// Make the pick onto `branch` produce no commits ahead of it
    pub fn no_commits_ahead_of(&self, branch: &str) {
        self.inner
            .empty_branches
            .lock()
            .unwrap()
            .insert(branch.to_string());
    }

    pub fn set_remote_url(&self, url: &str) {
        *self.inner.remote_url.lock().unwrap() = url.to_string();
    }

    pub fn set_dirty(&self) {
        *self.inner.clean.lock().unwrap() = false;
    }

    // === Call verification ===

    /// All recorded operations, in order
    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }

    /// Count recorded operations starting with `prefix`
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn assert_called(&self, call: &str) {
        let calls = self.calls();
        assert!(
            calls.iter().any(|c| c == call),
            "Expected git call \"{call}\" but got: {calls:?}"
        );
    }

    pub fn assert_not_called(&self, call: &str) {
        let calls = self.calls();
        assert!(
            !calls.iter().any(|c| c == call),
            "Expected git call \"{call}\" NOT to happen but it did: {calls:?}"
        );
    }

    fn record(&self, call: impl Into<String>) {
        self.inner.calls.lock().unwrap().push(call.into());
    }
}

impl Vcs for MockVcs {
    fn reset_hard(&self) -> Result<()> {
        self.record("reset --hard");
        Ok(())
    }

    fn clean(&self) -> Result<()> {
        self.record("clean -df");
        Ok(())
    }

    fn fetch(&self) -> Result<()> {
        self.record("fetch");
        Ok(())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.record(format!("checkout {branch}"));
        *self.inner.current_target.lock().unwrap() = Some(branch.to_string());
        Ok(())
    }

    fn pull(&self) -> Result<()> {
        self.record("pull");
        Ok(())
    }

    fn delete_branch(&self, name: &str) {
        self.record(format!("branch -D {name}"));
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.record(format!("checkout -b {name}"));
        Ok(())
    }

    fn cherry_pick(&self, commits: &[String]) -> Result<bool> {
        self.record(format!("cherry-pick {}", commits.join(" ")));
        let target = self.inner.current_target.lock().unwrap().clone();
        let conflicted = target
            .map(|t| self.inner.conflict_branches.lock().unwrap().contains(&t))
            .unwrap_or(false);
        Ok(!conflicted)
    }

    fn commits_ahead(&self, target: &str) -> Result<bool> {
        self.record(format!("log HEAD...{target}"));
        Ok(!self.inner.empty_branches.lock().unwrap().contains(target))
    }

    fn delete_remote_branch(&self, remote: &str, branch: &str) {
        self.record(format!("push {remote} :{branch}"));
    }

    fn push_upstream(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push --set-upstream {remote} {branch}"));
        Ok(())
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        self.record(format!("remote get-url {remote}"));
        Ok(self.inner.remote_url.lock().unwrap().clone())
    }

    fn is_clean(&self) -> Result<bool> {
        self.record("status --porcelain");
        Ok(*self.inner.clean.lock().unwrap())
    }
}
