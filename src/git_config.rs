//! Git config store access
//!
//! Wrapper around the `git config` CLI for reading and writing repository
//! configuration. Every call re-runs git: the config files can be edited
//! outside this tool at any time, so nothing is cached here.
//!
//! Two storage scopes exist and they are disjoint. An unflagged
//! `git config --get` merges every file in the lookup chain, so the shared
//! scope is pinned to `--local` to keep shared and worktree-local values
//! from shadowing each other.

use std::fmt;
use std::path::Path;
use std::process::{Command, Output};

/// Exit status of `git config --get` when the key does not exist.
const EXIT_GET_MISSING_KEY: i32 = 1;

/// Exit status of `git config --unset` when the key does not exist.
const EXIT_UNSET_MISSING_KEY: i32 = 5;

/// Where a config value lives relative to the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `.git/config` - visible from every checkout of the repository.
    Shared,
    /// `.git/config.worktree` - specific to one checkout.
    WorktreeLocal,
}

impl ConfigScope {
    fn location_flag(self) -> &'static str {
        match self {
            ConfigScope::Shared => "--local",
            ConfigScope::WorktreeLocal => "--worktree",
        }
    }
}

/// A boolean-typed config value as stored: git distinguishes an absent key
/// from a literal `false`, and callers that only care about effective
/// behavior collapse the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigBool {
    True,
    False,
    Unset,
}

impl ConfigBool {
    /// Collapse to effective behavior: only a stored `true` is true.
    pub fn as_bool(self) -> bool {
        matches!(self, ConfigBool::True)
    }
}

/// Error type for config store operations
#[derive(Debug)]
pub enum ConfigError {
    /// The key does not exist. Not a failure - a valid query result.
    NotFound,
    /// git exited non-zero (beyond the missing-key statuses) or produced
    /// output we cannot interpret.
    Execution { command: String, stderr: String },
    IoError(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound => write!(f, "config key not found"),
            ConfigError::Execution { command, stderr } => {
                write!(f, "'{}' failed: {}", command, stderr)
            }
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Read a string value. `Err(NotFound)` when the key is absent.
///
/// The raw stdout is returned as-is; git appends a trailing newline that
/// callers strip when they care about the exact value.
pub fn get(cwd: &Path, scope: ConfigScope, key: &str) -> Result<String> {
    let args = [scope.location_flag(), "--get", key];
    let output = run(cwd, &args)?;

    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    match output.status.code() {
        Some(EXIT_GET_MISSING_KEY) => Err(ConfigError::NotFound),
        _ => Err(execution_error(&args, &output)),
    }
}

/// Read a boolean value with git's own coercion (`yes`, `on`, `1`, ... all
/// normalize through `--type bool`). An absent key is `Unset`, not `False`.
pub fn get_bool(cwd: &Path, scope: ConfigScope, key: &str) -> Result<ConfigBool> {
    let args = [scope.location_flag(), "--type", "bool", "--get", key];
    let output = run(cwd, &args)?;

    if !output.status.success() {
        return match output.status.code() {
            Some(EXIT_GET_MISSING_KEY) => Ok(ConfigBool::Unset),
            _ => Err(execution_error(&args, &output)),
        };
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    match raw.trim() {
        "true" => Ok(ConfigBool::True),
        "false" => Ok(ConfigBool::False),
        other => Err(ConfigError::Execution {
            command: command_line(&args),
            stderr: format!("unexpected boolean value: {}", other),
        }),
    }
}

/// Write a value, creating the key if needed.
pub fn set(cwd: &Path, scope: ConfigScope, key: &str, value: &str) -> Result<()> {
    let args = [scope.location_flag(), key, value];
    let output = run(cwd, &args)?;

    if output.status.success() {
        Ok(())
    } else {
        Err(execution_error(&args, &output))
    }
}

/// Remove a key. Removing an already-absent key is a success no-op.
pub fn unset(cwd: &Path, scope: ConfigScope, key: &str) -> Result<()> {
    let args = [scope.location_flag(), "--unset", key];
    let output = run(cwd, &args)?;

    if output.status.success() {
        return Ok(());
    }

    // git config --unset exits 5 when the key doesn't exist; the key being
    // gone is exactly the requested end state.
    match output.status.code() {
        Some(EXIT_UNSET_MISSING_KEY) => Ok(()),
        _ => Err(execution_error(&args, &output)),
    }
}

fn run(cwd: &Path, args: &[&str]) -> std::io::Result<Output> {
    Command::new("git")
        .arg("config")
        .args(args)
        .current_dir(cwd)
        .output()
}

fn command_line(args: &[&str]) -> String {
    format!("git config {}", args.join(" "))
}

fn execution_error(args: &[&str], output: &Output) -> ConfigError {
    ConfigError::Execution {
        command: command_line(args),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}
