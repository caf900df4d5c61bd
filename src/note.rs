//! Note storage
//!
//! The note is a single free-text value under `worktree.note`, scoped either
//! shared or per-checkout. A cleared note is a removed key, never an empty
//! string, so "no note was ever set" and "note was cleared" are the same
//! stored state.

use crate::git_config::{self, ConfigScope};
use std::path::Path;

/// Config key holding the note text.
pub const NOTE_KEY: &str = "worktree.note";

/// Read the note, if one is set.
///
/// Read failures collapse to `None`: a broken config store renders as "no
/// note" rather than interrupting a passive refresh.
pub fn read(cwd: &Path, scope: ConfigScope) -> Option<String> {
    match git_config::get(cwd, scope, NOTE_KEY) {
        Ok(raw) => Some(strip_trailing_newline(raw)),
        Err(_) => None,
    }
}

/// Store the note, or clear it when `text` is empty or whitespace-only.
///
/// Only the emptiness check looks at a trimmed view; a non-empty note is
/// stored with its whitespace intact.
pub fn write(cwd: &Path, scope: ConfigScope, text: &str) -> git_config::Result<()> {
    if text.trim().is_empty() {
        clear(cwd, scope)
    } else {
        git_config::set(cwd, scope, NOTE_KEY, text)
    }
}

/// Remove the note. Clearing an already-absent note succeeds.
pub fn clear(cwd: &Path, scope: ConfigScope) -> git_config::Result<()> {
    git_config::unset(cwd, scope, NOTE_KEY)
}

// git config appends a newline to printed values.
fn strip_trailing_newline(mut raw: String) -> String {
    if raw.ends_with('\n') {
        raw.pop();
        if raw.ends_with('\r') {
            raw.pop();
        }
    }
    raw
}
