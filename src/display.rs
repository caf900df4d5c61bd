//! Pure display computations (Functional Core)
//!
//! Everything here is a pure function from state to rendered content: no
//! I/O, no config reads, easy to test in isolation. The imperative shell
//! (`sync`, `term`) decides when to recompute and where the result goes.

use serde::{Deserialize, Serialize};

/// Label shown when no repository context is resolvable.
pub const NO_WORKSPACE_MARKER: &str = "(no workspace)";

/// Label shown for an empty or absent note.
pub const EMPTY_NOTE_MARKER: &str = "(no note)";

/// Label and tooltip for the enable hint.
pub const ENABLE_HINT_LABEL: &str = "Enable workspace notes";
pub const ENABLE_HINT_TOOLTIP: &str = "Enable workspace-specific notes for this repo.";

const ELLIPSIS: char = '…';

/// What the indicator currently reflects. Derived, never persisted -
/// recomputed from scratch on every triggering event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayState {
    /// No repository context; the indicator's action is disabled.
    NoWorkspace,
    /// Repository present but worktree mode is off.
    HintEnableWorktreeMode,
    /// Worktree mode is on; holds the note text (empty = no note).
    ShowingNote(String),
}

/// What interaction the indicator is currently bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorAction {
    OpenEditSession,
    EnableWorktreeMode,
}

/// Fully rendered indicator content: a clipped single-line label, the
/// untruncated text as hover detail, and the bound action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorContent {
    pub label: String,
    pub tooltip: String,
    pub action: Option<IndicatorAction>,
}

/// Render a display state into indicator content.
pub fn render(state: &DisplayState, max_length: usize) -> IndicatorContent {
    match state {
        DisplayState::NoWorkspace => IndicatorContent {
            label: NO_WORKSPACE_MARKER.to_string(),
            tooltip: "Open a Git repository to use workspace notes.".to_string(),
            action: None,
        },
        DisplayState::HintEnableWorktreeMode => IndicatorContent {
            label: ENABLE_HINT_LABEL.to_string(),
            tooltip: ENABLE_HINT_TOOLTIP.to_string(),
            action: Some(IndicatorAction::EnableWorktreeMode),
        },
        DisplayState::ShowingNote(text) => {
            if text.trim().is_empty() {
                IndicatorContent {
                    label: EMPTY_NOTE_MARKER.to_string(),
                    tooltip: EMPTY_NOTE_MARKER.to_string(),
                    action: Some(IndicatorAction::OpenEditSession),
                }
            } else {
                IndicatorContent {
                    label: clip(&collapse_whitespace(text), max_length),
                    tooltip: text.clone(),
                    action: Some(IndicatorAction::OpenEditSession),
                }
            }
        }
    }
}

/// Collapse every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Clip to at most `max_length` characters, marking truncation with an
/// ellipsis. Counts `char`s so multi-byte text never splits a code point.
pub fn clip(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max_length.saturating_sub(1)).collect();
    clipped.push(ELLIPSIS);
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_render_no_workspace() {
        let content = render(&DisplayState::NoWorkspace, 60);
        assert_eq!(content.label, NO_WORKSPACE_MARKER);
        assert_eq!(content.action, None);
    }

    #[test]
    fn test_render_enable_hint() {
        let content = render(&DisplayState::HintEnableWorktreeMode, 60);
        assert_eq!(content.label, ENABLE_HINT_LABEL);
        assert_eq!(content.tooltip, ENABLE_HINT_TOOLTIP);
        assert_eq!(content.action, Some(IndicatorAction::EnableWorktreeMode));
    }

    #[test]
    fn test_render_empty_note_uses_marker() {
        for text in ["", "   ", "\t\n"] {
            let content = render(&DisplayState::ShowingNote(text.to_string()), 60);
            assert_eq!(content.label, EMPTY_NOTE_MARKER);
            assert_eq!(content.action, Some(IndicatorAction::OpenEditSession));
        }
    }

    #[test]
    fn test_render_note_clips_label_keeps_full_tooltip() {
        let content = render(&DisplayState::ShowingNote("hello world".to_string()), 10);
        assert_eq!(content.label, "hello wor…");
        assert_eq!(content.tooltip, "hello world");
        assert_eq!(content.action, Some(IndicatorAction::OpenEditSession));
    }

    #[test]
    fn test_render_short_note_untouched() {
        let content = render(&DisplayState::ShowingNote("ship it".to_string()), 60);
        assert_eq!(content.label, "ship it");
        assert_eq!(content.tooltip, "ship it");
    }

    #[test]
    fn test_collapse_whitespace_runs() {
        assert_eq!(collapse_whitespace("a  b\t\tc\nd"), "a b c d");
        assert_eq!(collapse_whitespace("  lead and trail  "), " lead and trail ");
        assert_eq!(collapse_whitespace("plain"), "plain");
    }

    #[test]
    fn test_clip_exact_fit() {
        assert_eq!(clip("0123456789", 10), "0123456789");
        assert_eq!(clip("0123456789a", 10), "012345678…");
    }

    #[test]
    fn test_clip_multibyte() {
        // Counts chars, not bytes
        assert_eq!(clip("héllo wörld", 10), "héllo wör…");
    }

    proptest! {
        #[test]
        fn prop_clip_never_exceeds_max(text in ".{0,200}", max in 1usize..100) {
            prop_assert!(clip(&text, max).chars().count() <= max);
        }

        #[test]
        fn prop_collapse_has_no_adjacent_whitespace(text in ".{0,200}") {
            let collapsed = collapse_whitespace(&text);
            let mut prev_ws = false;
            for c in collapsed.chars() {
                let ws = c.is_whitespace();
                prop_assert!(!(ws && prev_ws));
                prop_assert!(!ws || c == ' ');
                prev_ws = ws;
            }
        }

        #[test]
        fn prop_collapse_idempotent(text in ".{0,200}") {
            let once = collapse_whitespace(&text);
            prop_assert_eq!(collapse_whitespace(&once), once);
        }
    }
}
