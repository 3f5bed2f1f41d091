//! Persistence for the conflict pause/resume state.
//!
//! When a cherry-pick stops on conflicts the run saves its invocation
//! config plus the branches still to process, then exits so the operator
//! can resolve the conflict in the shared working copy. `--continue`
//! reads the record back and picks up at the interrupted branch.
//!
//! Single local file, single operator, no locking.

use crate::error::{Error, Result};
use crate::types::BackportConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Filename for the resume state, at the working-tree root.
const STATE_FILE: &str = ".backport.state";

/// Bumped when the record layout changes.
pub const STATE_VERSION: u32 = 1;

/// Everything needed to resume an interrupted run.
///
/// `config` is last so the TOML table serializes after the scalar
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeState {
    /// Record layout version
    pub version: u32,
    /// When the state was saved
    pub saved_at: DateTime<Utc>,
    /// Branches not yet completed, starting with the conflicted one
    pub remaining_branches: Vec<String>,
    /// The interrupted run's invocation config
    pub config: BackportConfig,
}

/// Get path to the resume-state file.
pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

/// Save resume state to disk.
pub fn save_state(root: &Path, config: &BackportConfig, remaining: &[String]) -> Result<()> {
    let path = state_path(root);

    let state = ResumeState {
        version: STATE_VERSION,
        saved_at: Utc::now(),
        remaining_branches: remaining.to_vec(),
        config: config.clone(),
    };

    let content = toml::to_string_pretty(&state)
        .map_err(|e| Error::State(format!("failed to serialize resume state: {e}")))?;

    // Add header comment
    let content_with_header = format!(
        "# backport resume state\n# Auto-generated - manual edits may be overwritten\n\n{content}"
    );

    fs::write(&path, content_with_header)
        .map_err(|e| Error::State(format!("failed to write {}: {e}", path.display())))
}

/// Load resume state from disk.
///
/// A missing file is an error: there is nothing to continue.
pub fn load_state(root: &Path) -> Result<ResumeState> {
    let path = state_path(root);

    if !path.exists() {
        return Err(Error::State(format!(
            "no saved backport state at {}; run without --continue",
            path.display()
        )));
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| Error::State(format!("failed to read {}: {e}", path.display())))?;

    let state: ResumeState = toml::from_str(&content)
        .map_err(|e| Error::State(format!("failed to parse {}: {e}", path.display())))?;

    Ok(state)
}

/// Remove the resume-state file. Best-effort; a file that is already gone
/// is fine.
pub fn clear_state(root: &Path) {
    let _ = fs::remove_file(state_path(root));
}
