//! Watch-mode refresh loop
//!
//! The config store can be edited outside this tool at any moment, so watch
//! mode observes the repository's git config files and re-runs the refresh
//! state machine whenever one changes. Events are handled one at a time;
//! each refresh runs to completion before the next file event is picked up.

use std::path::Path;
use std::sync::mpsc;

use chrono::Local;
use colored::Colorize;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};

use crate::context;
use crate::host::{Dialogs, Indicator, NoteInput};
use crate::sync::{RefreshEvent, SyncEngine};

/// Watch `cwd`'s repository config and refresh the indicator on changes.
/// Blocks until the process is interrupted.
pub fn run<I, D, N>(
    cwd: &Path,
    engine: &mut SyncEngine<I, D, N>,
) -> Result<(), Box<dyn std::error::Error>>
where
    I: Indicator,
    D: Dialogs,
    N: NoteInput,
{
    let git_dir = context::git_dir(cwd).ok_or("not inside a git repository")?;
    let common_dir = context::git_common_dir(cwd).unwrap_or_else(|| git_dir.clone());

    let (tx, rx) = mpsc::channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                let touches_config = event.paths.iter().any(|p| is_config_file(p));
                let relevant =
                    event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove();
                if touches_config && relevant {
                    let _ = tx.send(());
                }
            }
        },
        Config::default(),
    )?;

    // config lives in the common dir, config.worktree in this checkout's
    // git dir; in a plain checkout the two are the same directory.
    watcher.watch(&git_dir, RecursiveMode::NonRecursive)?;
    if common_dir != git_dir {
        watcher.watch(&common_dir, RecursiveMode::NonRecursive)?;
    }

    stamp();
    let root = context::discover(cwd);
    engine.handle(RefreshEvent::RefreshRequested, root.as_deref());

    loop {
        rx.recv()?;
        // Context is re-resolved per event - the checkout may have vanished
        let root = context::discover(cwd);
        stamp();
        engine.handle(RefreshEvent::ConfigurationChanged, root.as_deref());
    }
}

fn stamp() {
    println!(
        "{}",
        format!("─ refreshed at {}", Local::now().format("%H:%M:%S")).dimmed()
    );
}

fn is_config_file(path: &Path) -> bool {
    matches!(
        path.file_name().and_then(|name| name.to_str()),
        Some("config") | Some("config.worktree")
    )
}
