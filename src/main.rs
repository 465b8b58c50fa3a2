mod app;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod report;
mod ticker;
mod ui;

use anyhow::{bail, Context, Result};
use app::AppState;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{profile::name_error, LocalSession, UserProfile};
use persistence::{ensure_data_dir, init_local_dir, Store};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "focusflow")]
#[command(about = "A terminal dashboard for tasks, notes, expenses, habits and focus sessions", long_about = None)]
struct Cli {
    /// Data directory. Defaults to FOCUSFLOW_DIR, a local .focusflow, then ~/.focusflow
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace). Defaults to RUST_LOG, then info
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .focusflow directory in the current directory
    Init,
    /// Write a markdown summary of tasks, habits, expenses and timer settings
    Report {
        /// Date to report on (YYYY-MM-DD). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Output file path. Defaults to <data-dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete all tasks, notes, expenses and habits. The profile is kept.
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Create or update the local profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let override_dir = cli.data_dir.as_deref();

    match cli.command {
        Some(Commands::Init) => {
            let current_dir = std::env::current_dir().context("Could not determine current directory")?;
            let dir = init_local_dir(&current_dir)?;
            println!("Initialized FocusFlow directory: {}", dir.display());
            println!();
            println!("FocusFlow will now keep its data in this directory.");
            println!("Run 'focusflow' to open the dashboard.");
            Ok(())
        }
        Some(Commands::Report { date, output }) => {
            let data_dir = start_cli(override_dir, cli.log_level)?;
            let report_date = match date {
                Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                    .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))?,
                None => app::today(),
            };

            let store = Store::open(&data_dir);
            println!("Generating report for {}...", report_date);
            let path = report::generate_report(&store, &data_dir, Some(report_date), output)?;
            println!("Report generated: {}", path.display());
            Ok(())
        }
        Some(Commands::Reset { yes }) => {
            let data_dir = start_cli(override_dir, cli.log_level)?;
            let mut store = Store::open(&data_dir);
            if reset_data(&mut store, yes, &mut io::stdin().lock())? {
                info!(dir = %data_dir.display(), "collections reset");
                println!("All data cleared.");
            } else {
                println!("Aborted.");
            }
            Ok(())
        }
        Some(Commands::Profile {
            name,
            bio,
            avatar,
            email,
        }) => {
            let data_dir = start_cli(override_dir, cli.log_level)?;
            let mut store = Store::open(&data_dir);
            let current = store.profile();

            // Unset flags keep the stored value
            let keep = |flag: Option<String>, stored: Option<&String>| {
                flag.or_else(|| stored.cloned()).unwrap_or_default()
            };
            let name = keep(name, current.as_ref().map(|p| &p.name));
            let bio = keep(bio, current.as_ref().and_then(|p| p.bio.as_ref()));
            let avatar = keep(avatar, current.as_ref().and_then(|p| p.avatar.as_ref()));
            let email = keep(email, current.as_ref().and_then(|p| p.email.as_ref()));

            let profile = if current.is_some() {
                UserProfile::from_form(&name, &bio, &avatar, &email)
            } else {
                UserProfile::onboard(&name, &bio, &avatar, &email)
            };
            let Some(profile) = profile else {
                bail!(name_error());
            };

            store.save_profile(&profile)?;
            println!("Profile saved for {}.", profile.name);
            Ok(())
        }
        None => run_tui(override_dir, cli.log_level),
    }
}

/// Data directory and stderr logging for one-shot commands
fn start_cli(override_dir: Option<&Path>, log_level: Option<LevelFilter>) -> Result<PathBuf> {
    let data_dir = ensure_data_dir(override_dir)?;
    logging::enable_logging(logging::CLI_PREFIX, &data_dir, log_level, true)?;
    Ok(data_dir)
}

fn confirm(prompt: &str, input: &mut impl BufRead) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Clear the four collections unless the user declines. Returns whether
/// anything was cleared.
fn reset_data(store: &mut Store, skip_prompt: bool, input: &mut impl BufRead) -> Result<bool> {
    if !skip_prompt && !confirm("Delete all tasks, notes, expenses and habits?", input)? {
        return Ok(false);
    }
    store.reset_collections()?;
    Ok(true)
}

fn run_tui(override_dir: Option<&Path>, log_level: Option<LevelFilter>) -> Result<()> {
    let data_dir = ensure_data_dir(override_dir)?;
    // The TUI owns the terminal, so logs go to file only
    logging::enable_logging(logging::TUI_PREFIX, &data_dir, log_level, false)?;
    info!(dir = %data_dir.display(), "starting dashboard");

    let mut app = AppState::new(Store::open(&data_dir), Box::new(LocalSession));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    if let Err(e) = app.save() {
        error!(error = %e, "final save failed");
        eprintln!("Error saving state: {}", e);
    }

    if let Err(err) = result {
        error!(error = %err, "dashboard exited with error");
        eprintln!("Error: {}", err);
    }

    info!("dashboard closed");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = if input::wants_external_editor(app, &key) {
                        // Hand the terminal to $EDITOR
                        disable_raw_mode()?;
                        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

                        let should_quit = input::handle_key(app, key);

                        enable_raw_mode()?;
                        execute!(terminal.backend_mut(), EnterAlternateScreen)?;
                        terminal.clear()?;
                        should_quit?
                    } else {
                        input::handle_key(app, key)?
                    };

                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        app.tick();
        app.autosave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Priority, Task};
    use std::io::Cursor;

    fn store_with_task() -> Store {
        let mut store = Store::in_memory();
        store
            .save_tasks(&[Task::new("Keep", Priority::High).unwrap()])
            .unwrap();
        store
    }

    #[test]
    fn test_reset_declined_keeps_data() {
        let mut store = store_with_task();
        let cleared = reset_data(&mut store, false, &mut Cursor::new("n\n")).unwrap();
        assert!(!cleared);
        assert_eq!(store.tasks().len(), 1);

        // Empty answer defaults to no
        assert!(!reset_data(&mut store, false, &mut Cursor::new("\n")).unwrap());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_reset_confirmed_clears_collections() {
        let mut store = store_with_task();
        assert!(reset_data(&mut store, false, &mut Cursor::new("yes\n")).unwrap());
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_reset_with_yes_flag_skips_prompt() {
        let mut store = store_with_task();
        assert!(reset_data(&mut store, true, &mut Cursor::new("")).unwrap());
        assert!(store.tasks().is_empty());
    }
}
