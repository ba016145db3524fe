//! Build artifact inspection.
//!
//! The verifier only ever reads artifact metadata: existence, byte size, and
//! an `ls -l` style listing line. It never creates or modifies the file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How a confirmed artifact is reported on success.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportStyle {
    /// Report the artifact's size in bytes.
    #[default]
    Size,
    /// Report an `ls -l` style metadata line (permissions, size, mtime).
    Listing,
}

/// Metadata of a confirmed artifact.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactInfo {
    /// Full path to the artifact.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Pre-rendered listing line.
    pub listing: String,
}

/// Inspect the artifact path. Returns None when the file is absent.
pub fn inspect(path: &Path) -> Result<Option<ArtifactInfo>> {
    let md = match fs::metadata(path) {
        Ok(md) => md,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    Ok(Some(ArtifactInfo {
        path: path.to_path_buf(),
        size: md.len(),
        listing: listing_line(&md, path),
    }))
}

/// Format an `ls -l` style line: permissions, size, modified time, path.
pub fn listing_line(md: &fs::Metadata, path: &Path) -> String {
    let modified = md
        .modified()
        .ok()
        .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{} {:>10} {} {}",
        permission_string(md),
        md.len(),
        modified,
        path.display()
    )
}

#[cfg(unix)]
fn permission_string(md: &fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = md.permissions().mode();
    let mut s = String::with_capacity(10);
    s.push(if md.is_dir() { 'd' } else { '-' });
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        s.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        s.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        s.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    s
}

#[cfg(not(unix))]
fn permission_string(md: &fs::Metadata) -> String {
    if md.permissions().readonly() {
        "-r--r--r--".to_string()
    } else {
        "-rw-rw-rw-".to_string()
    }
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
