//! Authentication for the review host
//!
//! Supports a per-user token file and an environment variable override.

use crate::error::{Error, Result};
use std::fs;
use std::path::PathBuf;

/// Environment variable consulted before the token file.
const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Token file location under the home directory.
const TOKEN_FILE: &str = ".backport/github.token";

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from the per-user token file
    File,
    /// Token from environment variable
    EnvVar,
}

/// Path of the per-user token file (`~/.backport/github.token`).
pub fn token_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(TOKEN_FILE))
        .ok_or_else(|| Error::Credentials("could not determine home directory".to_string()))
}

/// Load the API token.
///
/// `GITHUB_TOKEN` wins when set and non-empty; otherwise the token file is
/// read and trimmed. A missing or empty token is fatal - every host call
/// needs it.
pub fn load_token() -> Result<(String, AuthSource)> {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        let token = token.trim().to_string();
        if !token.is_empty() {
            return Ok((token, AuthSource::EnvVar));
        }
    }

    let path = token_path()?;
    let token = fs::read_to_string(&path)
        .map_err(|e| Error::Credentials(format!("failed to read {}: {e}", path.display())))?
        .trim()
        .to_string();

    if token.is_empty() {
        return Err(Error::Credentials(format!(
            "token file {} is empty",
            path.display()
        )));
    }

    Ok((token, AuthSource::File))
}
