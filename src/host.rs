//! Host surface consumed by the sync engine
//!
//! The engine doesn't draw anything itself; it drives these traits. The
//! indicator is a single process-wide slot: exactly one handle exists, the
//! engine owns it, and every write fully replaces prior content.

use crate::display::IndicatorAction;

/// The always-visible indicator widget.
pub trait Indicator {
    fn set_text(&mut self, text: &str);
    fn set_tooltip(&mut self, tooltip: &str);
    fn set_click_action(&mut self, action: Option<IndicatorAction>);
    fn show(&mut self);
}

/// Info/error notifications and modal confirmation.
pub trait Dialogs {
    fn info(&mut self, message: &str);
    fn error(&mut self, message: &str);
    /// Modal yes/no question; `false` on decline or any input failure.
    fn confirm(&mut self, message: &str) -> bool;
}

/// How an interactive input ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Explicit accept carrying the final value.
    Accepted(String),
    /// Cancelled or abandoned; nothing was committed.
    Dismissed,
}

/// The input-box abstraction backing an edit session: opens with an initial
/// value, reports every in-progress value through `on_change` (a
/// non-committing preview), and resolves to accept or dismiss.
pub trait NoteInput {
    fn prompt(
        &mut self,
        title: &str,
        prompt: &str,
        initial: &str,
        on_change: &mut dyn FnMut(&str),
    ) -> InputOutcome;
}
