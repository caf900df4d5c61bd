use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;

use gitnote::sync::{self, MutationOutcome, RefreshEvent, SyncEngine};
use gitnote::term::{TermDialogs, TermIndicator, TermInput};
use gitnote::{context, display, watch, Config};

#[derive(Parser, Debug)]
#[command(name = "gitnote")]
#[command(author, version, about = "Per-worktree repository notes stored in git config")]
struct Cli {
    /// Run as if started in <DIR> instead of the current directory
    #[arg(short = 'C', value_name = "DIR", global = true)]
    directory: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the indicator state for the active repository
    Status {
        /// Emit machine-readable JSON instead of the indicator line
        #[arg(long)]
        json: bool,
    },
    /// Open an interactive edit session for this checkout's note
    Edit,
    /// Enable workspace-specific notes for this repository
    Enable,
    /// Disable workspace-specific notes (notes are preserved, not displayed)
    Disable {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Watch the repository config and refresh the indicator on changes
    Watch,
    /// Generate shell completions
    Completion { shell: Shell },
}

fn main() {
    let cli = Cli::parse();

    if let Command::Completion { shell } = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "gitnote", &mut std::io::stdout());
        return;
    }

    let cwd = match cli.directory.or_else(|| std::env::current_dir().ok()) {
        Some(dir) => dir,
        None => {
            eprintln!("{} cannot determine working directory", "error:".red().bold());
            process::exit(1);
        }
    };

    let config = Config::load(&cwd);
    let max_length = config.display.max_length;

    // One event per CLI invocation: context is resolved fresh each run.
    let roots: Vec<PathBuf> = context::discover(&cwd).into_iter().collect();
    let ctx = context::resolve(None, &roots);

    match cli.command {
        Command::Status { json } => {
            if json {
                let state = sync::compute_state(ctx.as_deref());
                let content = display::render(&state, max_length);
                let payload = serde_json::json!({
                    "state": state,
                    "label": content.label,
                    "tooltip": content.tooltip,
                    "action": content.action,
                });
                match serde_json::to_string_pretty(&payload) {
                    Ok(rendered) => println!("{}", rendered),
                    Err(e) => {
                        eprintln!("{} {}", "error:".red().bold(), e);
                        process::exit(1);
                    }
                }
            } else {
                let mut engine = engine(TermIndicator::line(), false, max_length);
                engine.handle(RefreshEvent::RefreshRequested, ctx.as_deref());
            }
        }
        Command::Edit => {
            let mut engine = engine(TermIndicator::inline(), false, max_length);
            let outcome = engine.edit_session(ctx.as_deref());
            // The inline indicator leaves the cursor on the rendered line
            println!();
            exit_on_failure(outcome);
        }
        Command::Enable => {
            let mut engine = engine(TermIndicator::line(), false, max_length);
            exit_on_failure(engine.enable(ctx.as_deref()));
        }
        Command::Disable { yes } => {
            let mut engine = engine(TermIndicator::line(), yes, max_length);
            exit_on_failure(engine.disable(ctx.as_deref()));
        }
        Command::Watch => {
            let mut engine = engine(TermIndicator::line(), false, max_length);
            if let Err(e) = watch::run(&cwd, &mut engine) {
                eprintln!("{} {}", "error:".red().bold(), e);
                process::exit(1);
            }
        }
        Command::Completion { .. } => unreachable!("handled above"),
    }
}

fn engine(
    indicator: TermIndicator,
    assume_yes: bool,
    max_length: usize,
) -> SyncEngine<TermIndicator, TermDialogs, TermInput> {
    SyncEngine::new(indicator, TermDialogs { assume_yes }, TermInput, max_length)
}

fn exit_on_failure(outcome: MutationOutcome) {
    if outcome == MutationOutcome::Failed {
        process::exit(1);
    }
}
