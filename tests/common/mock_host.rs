//! Mock review host for testing
//!
//! Manually implements `ReviewHost` with call tracking and error
//! injection, so orchestrator tests can verify exactly which requests
//! and labels were issued.

#![allow(dead_code)]

use async_trait::async_trait;
use backport::error::{Error, Result};
use backport::host::{HostConfig, ReviewHost};
use backport::types::{MergedChange, ReviewRequest};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Call record for `create_review_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReviewCall {
    pub head: String,
    pub base: String,
    pub title: String,
    pub body: Option<String>,
}

/// Call record for `add_labels`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLabelsCall {
    pub number: u64,
    pub labels: Vec<String>,
}

struct Inner {
    config: HostConfig,
    next_pr_number: AtomicU64,
    change_response: Mutex<Option<MergedChange>>,
    // Call tracking
    merged_change_calls: Mutex<Vec<u64>>,
    create_calls: Mutex<Vec<CreateReviewCall>>,
    add_labels_calls: Mutex<Vec<AddLabelsCall>>,
    remove_label_calls: Mutex<Vec<(u64, String)>>,
    // Error injection
    error_on_fetch: Mutex<Option<String>>,
    error_on_create: Mutex<Option<String>>,
    fail_labels: Mutex<bool>,
}

/// Call-recording mock `ReviewHost` with auto-incrementing PR numbers.
/// Clones share state.
#[derive(Clone)]
pub struct MockReviewHost {
    inner: Arc<Inner>,
}

impl MockReviewHost {
    /// Create a new mock with the given config
    pub fn with_config(config: HostConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                next_pr_number: AtomicU64::new(1),
                change_response: Mutex::new(None),
                merged_change_calls: Mutex::new(Vec::new()),
                create_calls: Mutex::new(Vec::new()),
                add_labels_calls: Mutex::new(Vec::new()),
                remove_label_calls: Mutex::new(Vec::new()),
                error_on_fetch: Mutex::new(None),
                error_on_create: Mutex::new(None),
                fail_labels: Mutex::new(false),
            }),
        }
    }

    // === Scripting ===

    /// Set the response for `merged_change`
    pub fn set_change(&self, change: MergedChange) {
        *self.inner.change_response.lock().unwrap() = Some(change);
    }

    /// Make `merged_change` return an error
    pub fn fail_fetch(&self, msg: &str) {
        *self.inner.error_on_fetch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_review_request` return an error
    pub fn fail_create(&self, msg: &str) {
        *self.inner.error_on_create.lock().unwrap() = Some(msg.to_string());
    }

    /// Make every label add/remove return an error
    pub fn fail_labels(&self) {
        *self.inner.fail_labels.lock().unwrap() = true;
    }

    // === Call verification ===

    pub fn merged_change_calls(&self) -> Vec<u64> {
        self.inner.merged_change_calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<CreateReviewCall> {
        self.inner.create_calls.lock().unwrap().clone()
    }

    pub fn add_labels_calls(&self) -> Vec<AddLabelsCall> {
        self.inner.add_labels_calls.lock().unwrap().clone()
    }

    pub fn remove_label_calls(&self) -> Vec<(u64, String)> {
        self.inner.remove_label_calls.lock().unwrap().clone()
    }

    /// Assert that a review request was created with specific head and base
    pub fn assert_create_called(&self, head: &str, base: &str) {
        let calls = self.create_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "Expected create_review_request({head}, {base}) but got: {calls:?}"
        );
    }

    /// Assert that `number` received every label in `labels` (possibly
    /// across several calls)
    pub fn assert_labeled(&self, number: u64, labels: &[&str]) {
        let calls = self.add_labels_calls();
        for label in labels {
            assert!(
                calls
                    .iter()
                    .any(|c| c.number == number && c.labels.iter().any(|l| l == label)),
                "Expected label \"{label}\" on #{number} but got: {calls:?}"
            );
        }
    }

    /// Assert that no `add_labels` call put `label` on `number`
    pub fn assert_not_labeled(&self, number: u64, label: &str) {
        let calls = self.add_labels_calls();
        assert!(
            !calls
                .iter()
                .any(|c| c.number == number && c.labels.iter().any(|l| l == label)),
            "Expected label \"{label}\" NOT on #{number} but got: {calls:?}"
        );
    }
}

#[async_trait]
impl ReviewHost for MockReviewHost {
    async fn merged_change(&self, number: u64) -> Result<MergedChange> {
        self.inner.merged_change_calls.lock().unwrap().push(number);

        if let Some(msg) = self.inner.error_on_fetch.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let response = self.inner.change_response.lock().unwrap().clone();
        response.ok_or_else(|| {
            Error::GitHubApi(format!("merged_change: no response configured for #{number}"))
        })
    }

    async fn create_review_request(
        &self,
        head: &str,
        base: &str,
        title: &str,
        body: Option<&str>,
    ) -> Result<ReviewRequest> {
        self.inner.create_calls.lock().unwrap().push(CreateReviewCall {
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: body.map(ToString::to_string),
        });

        if let Some(msg) = self.inner.error_on_create.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let number = self.inner.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(ReviewRequest {
            number,
            html_url: format!("https://github.com/test/repo/pull/{number}"),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
        })
    }

    async fn add_labels(&self, number: u64, labels: &[String]) -> Result<()> {
        self.inner.add_labels_calls.lock().unwrap().push(AddLabelsCall {
            number,
            labels: labels.to_vec(),
        });

        if *self.inner.fail_labels.lock().unwrap() {
            return Err(Error::GitHubApi("label add failed".to_string()));
        }
        Ok(())
    }

    async fn remove_label(&self, number: u64, label: &str) -> Result<()> {
        self.inner
            .remove_label_calls
            .lock()
            .unwrap()
            .push((number, label.to_string()));

        if *self.inner.fail_labels.lock().unwrap() {
            return Err(Error::GitHubApi("label remove failed".to_string()));
        }
        Ok(())
    }

    fn config(&self) -> &HostConfig {
        &self.inner.config
    }
}
