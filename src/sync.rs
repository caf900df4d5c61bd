//! Presentation sync engine
//!
//! The state machine keeping the indicator consistent with external state.
//! Triggering events are data; they all funnel into one refresh path that
//! recomputes the display from scratch (Elm-style: events in, one update
//! function, side effects at the edge). Handlers run to completion before
//! the next event is dispatched, so no two store operations for the same
//! repository ever overlap.

use std::path::Path;

use crate::display::{self, DisplayState, IndicatorContent};
use crate::git_config::ConfigScope;
use crate::host::{Dialogs, Indicator, InputOutcome, NoteInput};
use crate::{note, worktree_mode};

/// Everything that can trigger a re-render. The variants differ only in
/// provenance; each one recomputes the full state synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEvent {
    ActiveContextChanged,
    WorkspaceSetChanged,
    WindowFocusChanged,
    ConfigurationChanged,
    RefreshRequested,
}

/// How an explicit user-initiated mutation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The store was mutated and the indicator re-rendered.
    Applied,
    /// Nothing was attempted: no repository, or the user declined.
    Skipped,
    /// The store rejected the mutation; state reverted, error surfaced.
    Failed,
}

/// Compute the current display state from the config store.
///
/// Read failures are swallowed into the placeholder states - passive
/// refresh must never surface an error.
pub fn compute_state(ctx: Option<&Path>) -> DisplayState {
    match ctx {
        None => DisplayState::NoWorkspace,
        Some(cwd) => {
            if !worktree_mode::is_enabled(cwd) {
                DisplayState::HintEnableWorktreeMode
            } else {
                let text = note::read(cwd, ConfigScope::WorktreeLocal).unwrap_or_default();
                DisplayState::ShowingNote(text)
            }
        }
    }
}

/// Owns the indicator slot and drives refreshes, mode changes, and edit
/// sessions against the host surface.
pub struct SyncEngine<I, D, N> {
    indicator: I,
    dialogs: D,
    input: N,
    max_length: usize,
}

impl<I: Indicator, D: Dialogs, N: NoteInput> SyncEngine<I, D, N> {
    pub fn new(indicator: I, dialogs: D, input: N, max_length: usize) -> Self {
        Self {
            indicator,
            dialogs,
            input,
            max_length,
        }
    }

    /// Dispatch a triggering event.
    pub fn handle(&mut self, event: RefreshEvent, ctx: Option<&Path>) -> DisplayState {
        match event {
            RefreshEvent::ActiveContextChanged
            | RefreshEvent::WorkspaceSetChanged
            | RefreshEvent::WindowFocusChanged
            | RefreshEvent::ConfigurationChanged
            | RefreshEvent::RefreshRequested => self.refresh(ctx),
        }
    }

    /// Recompute the display state and overwrite the indicator.
    pub fn refresh(&mut self, ctx: Option<&Path>) -> DisplayState {
        let state = compute_state(ctx);
        self.render_state(&state);
        state
    }

    /// Enable per-checkout notes. Non-destructive, so no confirmation -
    /// just an informational message on success.
    pub fn enable(&mut self, ctx: Option<&Path>) -> MutationOutcome {
        let Some(cwd) = ctx else {
            self.dialogs.info("Open a Git repository first.");
            return MutationOutcome::Skipped;
        };

        match worktree_mode::enable(cwd) {
            Ok(()) => {
                self.dialogs
                    .info("Workspace-specific notes enabled for this repository.");
                self.refresh(Some(cwd));
                MutationOutcome::Applied
            }
            Err(e) => {
                self.dialogs
                    .error(&format!("Failed to enable workspace-specific notes: {}", e));
                MutationOutcome::Failed
            }
        }
    }

    /// Disable per-checkout notes. Requires confirmation: it looks
    /// destructive even though notes are preserved and only hidden.
    pub fn disable(&mut self, ctx: Option<&Path>) -> MutationOutcome {
        let Some(cwd) = ctx else {
            self.dialogs.info("Open a Git repository first.");
            return MutationOutcome::Skipped;
        };

        let confirmed = self.dialogs.confirm(
            "Disable workspace-specific notes for this repository? \
             Your notes will be preserved but not displayed.",
        );
        if !confirmed {
            return MutationOutcome::Skipped;
        }

        match worktree_mode::disable(cwd) {
            Ok(()) => {
                self.dialogs
                    .info("Workspace-specific notes disabled for this repository.");
                self.refresh(Some(cwd));
                MutationOutcome::Applied
            }
            Err(e) => {
                self.dialogs.error(&format!(
                    "Failed to disable workspace-specific notes: {}",
                    e
                ));
                MutationOutcome::Failed
            }
        }
    }

    /// Run one interactive edit session.
    ///
    /// The mode precondition is re-checked here - it may have changed since
    /// the last refresh. Declining the enable prompt aborts the session
    /// before any edit UI appears; accepting runs the same enable operation
    /// as the top-level command.
    pub fn edit_session(&mut self, ctx: Option<&Path>) -> MutationOutcome {
        let Some(cwd) = ctx else {
            self.dialogs.info("Open a Git repository first.");
            return MutationOutcome::Skipped;
        };

        if !worktree_mode::is_enabled(cwd) {
            let confirmed = self.dialogs.confirm(
                "Workspace-specific notes are disabled. Enable them for this repository?",
            );
            if !confirmed {
                return MutationOutcome::Skipped;
            }
            match self.enable(Some(cwd)) {
                MutationOutcome::Applied => {}
                other => return other,
            }
        }

        // Pre-session value: shown as the starting input and restored on
        // dismiss or failed commit.
        let previous = note::read(cwd, ConfigScope::WorktreeLocal).unwrap_or_default();

        let max_length = self.max_length;
        let indicator = &mut self.indicator;
        let outcome = self.input.prompt(
            "Workspace Note",
            "Enter to save, Esc to cancel (stored via: git config --worktree worktree.note \"<text>\")",
            &previous,
            &mut |value| {
                // Live preview only - nothing is persisted until accept.
                let preview = DisplayState::ShowingNote(value.to_string());
                apply(&mut *indicator, &display::render(&preview, max_length));
            },
        );

        match outcome {
            InputOutcome::Accepted(value) => {
                match note::write(cwd, ConfigScope::WorktreeLocal, &value) {
                    Ok(()) => {
                        self.render_state(&DisplayState::ShowingNote(value));
                        MutationOutcome::Applied
                    }
                    Err(e) => {
                        self.dialogs.error(&format!("Failed to save note: {}", e));
                        self.render_state(&DisplayState::ShowingNote(previous));
                        MutationOutcome::Failed
                    }
                }
            }
            InputOutcome::Dismissed => {
                self.render_state(&DisplayState::ShowingNote(previous));
                MutationOutcome::Skipped
            }
        }
    }

    fn render_state(&mut self, state: &DisplayState) {
        let content = display::render(state, self.max_length);
        apply(&mut self.indicator, &content);
    }
}

fn apply<I: Indicator + ?Sized>(indicator: &mut I, content: &IndicatorContent) {
    indicator.set_text(&content.label);
    indicator.set_tooltip(&content.tooltip);
    indicator.set_click_action(content.action);
    indicator.show();
}
