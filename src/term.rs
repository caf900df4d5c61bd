//! Terminal implementations of the host surface
//!
//! Thin presentation glue: a stdout indicator, stdin confirmation prompts,
//! and a raw-mode line editor for the edit session. The editor doesn't draw
//! its own buffer - the live indicator preview *is* the visible line, so
//! what the user sees while typing is exactly what the status line will
//! show.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};

use crate::display::IndicatorAction;
use crate::host::{Dialogs, Indicator, InputOutcome, NoteInput};

/// Glyph prefixed to every indicator line.
pub const NOTE_GLYPH: &str = "📝";

/// Stdout-backed indicator. Line mode prints a full block per show;
/// inline mode rewrites the current terminal line in place (used while an
/// edit session previews keystrokes).
pub struct TermIndicator {
    inline: bool,
    text: String,
    tooltip: String,
    action: Option<IndicatorAction>,
}

impl TermIndicator {
    pub fn line() -> Self {
        Self::new(false)
    }

    pub fn inline() -> Self {
        Self::new(true)
    }

    fn new(inline: bool) -> Self {
        Self {
            inline,
            text: String::new(),
            tooltip: String::new(),
            action: None,
        }
    }
}

impl Indicator for TermIndicator {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_tooltip(&mut self, tooltip: &str) {
        self.tooltip = tooltip.to_string();
    }

    fn set_click_action(&mut self, action: Option<IndicatorAction>) {
        self.action = action;
    }

    fn show(&mut self) {
        // Rendering is best-effort; a refresh must not fail over stdout.
        if self.inline {
            let mut out = io::stdout();
            let _ = execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(terminal::ClearType::CurrentLine)
            );
            let _ = write!(out, "{} {}", NOTE_GLYPH, self.text);
            let _ = out.flush();
        } else {
            println!("{} {}", NOTE_GLYPH, self.text);
            if !self.tooltip.is_empty() && self.tooltip != self.text {
                println!("   {}", self.tooltip.dimmed());
            }
            if let Some(action) = self.action {
                let hint = match action {
                    IndicatorAction::OpenEditSession => "run `gitnote edit` to change the note",
                    IndicatorAction::EnableWorktreeMode => {
                        "run `gitnote enable` to turn on workspace notes"
                    }
                };
                println!("   {}", hint.dimmed());
            }
        }
    }
}

/// Stdin/stderr dialogs. `assume_yes` answers every confirmation
/// affirmatively (the `--yes` flag for non-interactive use).
pub struct TermDialogs {
    pub assume_yes: bool,
}

impl Dialogs for TermDialogs {
    fn info(&mut self, message: &str) {
        println!("{}", message.green());
    }

    fn error(&mut self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", message.yellow());
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Raw-mode line editor implementing the input-box contract.
pub struct TermInput;

impl NoteInput for TermInput {
    fn prompt(
        &mut self,
        title: &str,
        prompt: &str,
        initial: &str,
        on_change: &mut dyn FnMut(&str),
    ) -> InputOutcome {
        println!("{}", title.bold());
        println!("{}", prompt.dimmed());

        let Ok(guard) = RawModeGuard::enable() else {
            return InputOutcome::Dismissed;
        };

        let mut value = initial.to_string();
        on_change(&value);

        let outcome = loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(_) => break InputOutcome::Dismissed,
            };
            let Event::Key(key) = event else { continue };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => break InputOutcome::Accepted(value.clone()),
                KeyCode::Esc => break InputOutcome::Dismissed,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    break InputOutcome::Dismissed;
                }
                KeyCode::Backspace => {
                    value.pop();
                    on_change(&value);
                }
                KeyCode::Char(c) => {
                    value.push(c);
                    on_change(&value);
                }
                _ => {}
            }
        };

        // Leave raw mode before touching stdout again
        drop(guard);
        println!();
        outcome
    }
}

/// Restores the terminal on every exit path, including panics.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_records_content() {
        let mut indicator = TermIndicator::line();
        indicator.set_text("a note");
        indicator.set_tooltip("a note with detail");
        indicator.set_click_action(Some(IndicatorAction::OpenEditSession));
        assert_eq!(indicator.text, "a note");
        assert_eq!(indicator.tooltip, "a note with detail");
        assert_eq!(indicator.action, Some(IndicatorAction::OpenEditSession));
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        let mut dialogs = TermDialogs { assume_yes: true };
        // Must not block on stdin
        assert!(dialogs.confirm("proceed?"));
    }
}
