// SPDX-License-Identifier: MIT

//! Init command: write a starter anneal.toml.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Starter configuration with commented defaults.
pub const STARTER_CONFIG: &str = r#"version = 1

[project]
# Directory the build commands run in (default: where this file lives).
# path = "."

[build]
# clean = "make clean"      # empty string disables the clean step
# command = "make"
# clean_timeout = "10s"
# timeout = "60s"

[artifact]
# Expected output binary, relative to the project directory.
# Verified to exist after a successful build.
# path = "myapp"
# report = "size"           # "size" or "listing"

[output]
# tail = 500                # trailing characters of output shown on failure
"#;

/// Write the starter config into `dir`. Refuses to overwrite.
pub fn write_starter(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("anneal.toml");
    if path.exists() {
        return Err(Error::Config {
            message: format!("{} already exists", path.display()),
            path: Some(path),
        });
    }

    std::fs::write(&path, STARTER_CONFIG).map_err(|e| Error::Io {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
