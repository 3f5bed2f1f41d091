//! Release-version reader
//!
//! Scans the well-known `libbeat/version/version.go` under the working
//! tree for the first version declaration and returns the quoted literal.
//! Deliberately forgiving: a missing file or a file without a matching
//! line yields `None`, never an error - the version label is optional.

use regex::Regex;
use std::fs;
use std::path::Path;

/// Location of the version declaration, relative to the repository root.
const VERSION_FILE: &str = "libbeat/version/version.go";

/// Matches `const Version = "7.1.0"`, `var version = "..."`, `VERSION = "..."`.
const VERSION_PATTERN: &str = r#"^(?:const\s)?\w*[vV]ersion\s=\s"(?P<version>[^"]*)""#;

/// Read the release version declared in the working tree.
pub fn read_version(root: &Path) -> Option<String> {
    let content = fs::read_to_string(root.join(VERSION_FILE)).ok()?;
    scan(&content)
}

fn scan(content: &str) -> Option<String> {
    let pattern = Regex::new(VERSION_PATTERN).ok()?;
    content.lines().find_map(|line| {
        pattern
            .captures(line)
            .and_then(|caps| caps.name("version"))
            .map(|m| m.as_str().to_string())
    })
}
