//! Worktree-config mode
//!
//! Per-checkout note storage rides on git's `extensions.worktreeConfig`
//! mechanism. The key lives in shared scope; the tool never flips it on its
//! own - only the explicit enable/disable operations mutate it.

use crate::git_config::{self, ConfigScope};
use std::path::Path;

/// Shared-scope key gating per-checkout configuration.
pub const WORKTREE_CONFIG_KEY: &str = "extensions.worktreeConfig";

/// Whether per-checkout notes are enabled for this repository.
///
/// Fails closed: an unset key, a stored `false`, and any error reading the
/// store all report disabled. Refresh paths must never raise over this.
pub fn is_enabled(cwd: &Path) -> bool {
    match git_config::get_bool(cwd, ConfigScope::Shared, WORKTREE_CONFIG_KEY) {
        Ok(value) => value.as_bool(),
        Err(_) => false,
    }
}

/// Opt this repository into per-checkout configuration.
pub fn enable(cwd: &Path) -> git_config::Result<()> {
    git_config::set(cwd, ConfigScope::Shared, WORKTREE_CONFIG_KEY, "true")
}

/// Opt back out. Notes stored per-checkout are preserved on disk; they just
/// stop being displayed until the mode is enabled again.
pub fn disable(cwd: &Path) -> git_config::Result<()> {
    git_config::set(cwd, ConfigScope::Shared, WORKTREE_CONFIG_KEY, "false")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::TempDir;

    fn init_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        let status = Command::new("git")
            .args(["init", "-q"])
            .current_dir(dir.path())
            .status()
            .unwrap();
        assert!(status.success());
        dir
    }

    #[test]
    fn test_disabled_when_unset() {
        let repo = init_repo();
        assert!(!is_enabled(repo.path()));
    }

    #[test]
    fn test_disabled_when_literal_false() {
        let repo = init_repo();
        disable(repo.path()).unwrap();
        assert!(!is_enabled(repo.path()));
    }

    #[test]
    fn test_enable_round_trip() {
        let repo = init_repo();
        enable(repo.path()).unwrap();
        assert!(is_enabled(repo.path()));

        disable(repo.path()).unwrap();
        assert!(!is_enabled(repo.path()));
    }

    #[test]
    fn test_boolean_spellings_coerce() {
        let repo = init_repo();
        git_config::set(repo.path(), ConfigScope::Shared, WORKTREE_CONFIG_KEY, "on").unwrap();
        assert!(is_enabled(repo.path()));
    }

    #[test]
    fn test_disabled_outside_repository() {
        let dir = TempDir::new().unwrap();
        assert!(!is_enabled(dir.path()));
    }
}
