//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Returns a Command configured to run the anneal binary.
pub fn anneal_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("anneal"));
    cmd.env_remove("ANNEAL_CONFIG");
    cmd.env_remove("ANNEAL_LOG");
    cmd
}

/// A temporary project directory for driving `anneal check`.
pub struct Project {
    temp: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write anneal.toml into the project.
    pub fn config(self, content: &str) -> Self {
        std::fs::write(self.path().join("anneal.toml"), content).unwrap();
        self
    }

    /// Write an arbitrary file into the project.
    pub fn file(self, name: &str, content: &[u8]) -> Self {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
        self
    }

    /// Create a subdirectory.
    pub fn dir(self, name: &str) -> Self {
        std::fs::create_dir_all(self.path().join(name)).unwrap();
        self
    }

    /// A check command running in the project directory.
    pub fn check(&self) -> Command {
        let mut cmd = anneal_cmd();
        cmd.current_dir(self.path());
        cmd.arg("check");
        cmd
    }

    /// An init command running in the project directory.
    pub fn init(&self) -> Command {
        let mut cmd = anneal_cmd();
        cmd.current_dir(self.path());
        cmd.arg("init");
        cmd
    }
}
