//! Configuration: anneal.toml parsing, discovery, and resolution.
//!
//! Parsing validates the version and warns about unknown keys. Resolution
//! turns the CLI-facing inputs (an explicit `-C` path, or the directory the
//! check starts from) into a loaded [`ResolvedConfig`] that remembers where
//! the file came from, because `project.path` is anchored there.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::artifact::ReportStyle;
use crate::error::{Error, Result};
use crate::tail::DEFAULT_TAIL;

pub mod duration;

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// File name searched for during discovery.
pub const CONFIG_FILE_NAME: &str = "anneal.toml";

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "project", "build", "artifact", "output"];

/// Known keys per section.
const KNOWN_PROJECT_KEYS: &[&str] = &["name", "path"];
const KNOWN_BUILD_KEYS: &[&str] = &["clean", "command", "clean_timeout", "timeout"];
const KNOWN_ARTIFACT_KEYS: &[&str] = &["path", "report"];
const KNOWN_OUTPUT_KEYS: &[&str] = &["tail"];

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    #[serde(default = "default_version")]
    pub version: i64,

    /// Project configuration.
    #[serde(default)]
    pub project: ProjectConfig,

    /// Build step configuration.
    #[serde(default)]
    pub build: BuildConfig,

    /// Expected artifact configuration.
    #[serde(default)]
    pub artifact: ArtifactConfig,

    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_version() -> i64 {
    SUPPORTED_VERSION
}

/// Project-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    /// Project name.
    pub name: Option<String>,

    /// Project directory the build commands run in
    /// (default: the directory the config file lives in).
    pub path: Option<PathBuf>,
}

/// Build step configuration.
#[derive(Debug, Deserialize)]
pub struct BuildConfig {
    /// Clean command (empty string disables the step).
    #[serde(default = "BuildConfig::default_clean")]
    pub clean: String,

    /// Build command.
    #[serde(default = "BuildConfig::default_command")]
    pub command: String,

    /// Bounded wait for the clean step (default: 10s).
    #[serde(
        default = "BuildConfig::default_clean_timeout",
        deserialize_with = "duration::deserialize"
    )]
    pub clean_timeout: Duration,

    /// Bounded wait for the build step (default: 60s).
    #[serde(
        default = "BuildConfig::default_timeout",
        deserialize_with = "duration::deserialize"
    )]
    pub timeout: Duration,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            clean: Self::default_clean(),
            command: Self::default_command(),
            clean_timeout: Self::default_clean_timeout(),
            timeout: Self::default_timeout(),
        }
    }
}

impl BuildConfig {
    fn default_clean() -> String {
        "make clean".to_string()
    }

    fn default_command() -> String {
        "make".to_string()
    }

    fn default_clean_timeout() -> Duration {
        Duration::from_secs(10)
    }

    fn default_timeout() -> Duration {
        Duration::from_secs(60)
    }

    /// The clean command, or None when the step is disabled.
    pub fn clean_command(&self) -> Option<&str> {
        let clean = self.clean.trim();
        if clean.is_empty() { None } else { Some(clean) }
    }
}

/// Expected artifact configuration.
#[derive(Debug, Default, Deserialize)]
pub struct ArtifactConfig {
    /// Expected artifact path, relative to the project directory.
    pub path: Option<PathBuf>,

    /// Reporting style on success.
    #[serde(default)]
    pub report: ReportStyle,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Max trailing characters of captured output shown on failure
    /// (0 = unlimited, default: 500).
    #[serde(default = "OutputConfig::default_tail")]
    pub tail: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            tail: Self::default_tail(),
        }
    }
}

impl OutputConfig {
    fn default_tail() -> usize {
        DEFAULT_TAIL
    }

    /// The tail limit, or None when unlimited.
    pub fn tail_limit(&self) -> Option<usize> {
        if self.tail == 0 { None } else { Some(self.tail) }
    }
}

/// A loaded config together with the file it came from, if any.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub config: Config,
    /// Path of the loaded file; None when running on built-in defaults.
    pub path: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Resolve and load the effective config.
    ///
    /// An explicit `-C`/`ANNEAL_CONFIG` path wins and must exist. Otherwise
    /// discovery walks from `start_dir` up to the nearest git root; when no
    /// file turns up, built-in defaults apply.
    pub fn resolve(explicit: Option<&Path>, start_dir: &Path) -> Result<Self> {
        let path = match explicit {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => {
                return Err(Error::Config {
                    message: format!("config file not found: {}", p.display()),
                    path: Some(p.to_path_buf()),
                });
            }
            None => discover(start_dir),
        };

        let config = match &path {
            Some(p) => {
                tracing::debug!("loading config from {}", p.display());
                load_with_warnings(p)?
            }
            None => {
                tracing::debug!("no config found, using defaults");
                Config::default()
            }
        };

        Ok(Self { config, path })
    }

    /// The project directory the build commands run in.
    ///
    /// A relative `project.path` is anchored at the config file's directory,
    /// not the invocation directory: the same checkout must build the same
    /// way no matter where in the tree anneal is invoked. Without a
    /// `project.path`, the build runs where discovery started.
    pub fn project_dir(&self, start_dir: &Path) -> PathBuf {
        match &self.config.project.path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => self
                .path
                .as_deref()
                .and_then(Path::parent)
                .unwrap_or(start_dir)
                .join(p),
            None => start_dir.to_path_buf(),
        }
    }
}

/// Look for [`CONFIG_FILE_NAME`] in `dir` and each ancestor, stopping at the
/// first git root so a config above an unrelated repository never leaks in.
fn discover(dir: &Path) -> Option<PathBuf> {
    for ancestor in dir.ancestors() {
        let candidate = ancestor.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if ancestor.join(".git").exists() {
            return None;
        }
    }
    None
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    warn_unknown_keys(&content, path);
    parse(&content, path)
}

/// Parse config from string content.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    // First check version
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if let Some(version) = version_check.version
        && version != SUPPORTED_VERSION
    {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    // Parse full config
    toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })
}

/// Scan the raw document for unrecognized keys and warn about each.
fn warn_unknown_keys(content: &str, path: &Path) {
    let Ok(value) = content.parse::<toml::Value>() else {
        // parse() will report the syntax error
        return;
    };
    let Some(table) = value.as_table() else {
        return;
    };

    for (key, section) in table {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
            continue;
        }

        let known = match key.as_str() {
            "project" => KNOWN_PROJECT_KEYS,
            "build" => KNOWN_BUILD_KEYS,
            "artifact" => KNOWN_ARTIFACT_KEYS,
            "output" => KNOWN_OUTPUT_KEYS,
            _ => continue,
        };

        if let Some(section_table) = section.as_table() {
            for sub in section_table.keys() {
                if !known.contains(&sub.as_str()) {
                    warn_unknown_key(path, &format!("{key}.{sub}"));
                }
            }
        }
    }
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "anneal: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
