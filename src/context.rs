//! Repository context resolution
//!
//! Which repository is "current" is derived fresh on every triggering event
//! from two external inputs: the active file (if any) and the set of known
//! workspace roots. It is never cached, so a stale current-repository can't
//! survive a context switch that arrives without its own notification.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Resolve the relevant repository root.
///
/// The root containing the active file wins; otherwise the first known
/// root; otherwise there is no context.
pub fn resolve(active_file: Option<&Path>, roots: &[PathBuf]) -> Option<PathBuf> {
    if let Some(file) = active_file {
        if let Some(root) = roots.iter().find(|root| file.starts_with(root)) {
            return Some(root.clone());
        }
    }
    roots.first().cloned()
}

/// Find the toplevel of the repository containing `cwd`, if any.
pub fn discover(cwd: &Path) -> Option<PathBuf> {
    rev_parse(cwd, "--show-toplevel").map(PathBuf::from)
}

/// The repository's `.git` directory for this checkout.
pub fn git_dir(cwd: &Path) -> Option<PathBuf> {
    rev_parse(cwd, "--absolute-git-dir").map(PathBuf::from)
}

/// The `.git` directory shared by all checkouts. Differs from [`git_dir`]
/// inside a linked worktree; git may report it relative to `cwd`.
pub fn git_common_dir(cwd: &Path) -> Option<PathBuf> {
    rev_parse(cwd, "--git-common-dir").map(|raw| {
        let path = PathBuf::from(raw);
        if path.is_absolute() {
            path
        } else {
            cwd.join(path)
        }
    })
}

fn rev_parse(cwd: &Path, flag: &str) -> Option<String> {
    Command::new("git")
        .args(["rev-parse", flag])
        .current_dir(cwd)
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            } else {
                None
            }
        })
}
