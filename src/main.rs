mod app;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod report;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{DateKey, Planner, TaskMap, UnavailableDays};
use persistence::{
    ensure_data_dir, get_data_dir, init_data_dir, init_local_data_dir, load_settings, save_settings, settings_file, store,
    FileStore, MemoryStore, Settings, Store, TASKS_KEY, UNAVAILABLE_DAYS_KEY,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "studycal")]
#[command(about = "A terminal study calendar with a generated 18-week plan and task reminders", long_about = None)]
struct Cli {
    /// Data directory to use instead of the local or home .studycal
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Keep tasks and unavailable days in memory only. Settings are still read
    /// and the log is still written in the data directory.
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .studycal directory in the current directory (or the --dir path)
    Init,
    /// Print a markdown agenda of scheduled tasks
    Agenda {
        /// First day (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Number of days to include
        #[arg(short = 'n', long, default_value_t = 1)]
        days: u32,
        /// Output file path. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = match cli.dir.as_deref() {
                Some(dir) => init_data_dir(dir)?,
                None => {
                    let current_dir =
                        std::env::current_dir().context("Could not determine current directory")?;
                    init_local_data_dir(&current_dir)?
                }
            };
            save_settings(settings_file(&data_dir), &Settings::default())?;
            println!("Initialized studycal directory: {}", data_dir.display());
            println!();
            println!("studycal will use this directory for tasks and settings.");
            println!("Run 'studycal' to open the calendar.");
            Ok(())
        }
        Some(Commands::Agenda { date, days, output }) => {
            let start = match date {
                Some(date_str) => date_str
                    .parse::<DateKey>()
                    .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))?,
                None => DateKey::today(),
            };
            run_agenda(cli.dir.as_deref(), cli.verbose, start, days, output.as_deref())
        }
        None => run_tui(cli.dir.as_deref(), cli.verbose, cli.ephemeral),
    }
}

/// Print (or write) the agenda from the stored tasks without touching them
fn run_agenda(dir: Option<&Path>, verbose: u8, start: DateKey, days: u32, output: Option<&Path>) -> Result<()> {
    let data_dir = get_data_dir(dir)?;
    if data_dir.is_dir() {
        logging::init_tracing(&data_dir, verbose)?;
    }

    let storage = FileStore::new(&data_dir);
    let tasks: TaskMap = store::read(&storage, TASKS_KEY, TaskMap::new());
    let unavailable: UnavailableDays = store::read(&storage, UNAVAILABLE_DAYS_KEY, UnavailableDays::new());
    let planner = Planner::new(tasks, unavailable);

    let agenda = report::render_agenda(&planner, start, days);
    report::write_agenda(&agenda, output)?;

    if let Some(path) = output {
        println!("Agenda written: {}", path.display());
    }
    Ok(())
}

fn run_tui(dir: Option<&Path>, verbose: u8, ephemeral: bool) -> Result<()> {
    let data_dir = ensure_data_dir(&get_data_dir(dir)?)?;
    logging::init_tracing(&data_dir, verbose)?;

    eprintln!("Using studycal directory: {}", data_dir.display());
    info!(dir = %data_dir.display(), ephemeral, "starting studycal");

    let settings = load_settings(settings_file(&data_dir)).unwrap_or_else(|e| {
        warn!(error = %e, "could not load settings, using defaults");
        Settings::default()
    });

    let storage: Box<dyn Store> = if ephemeral {
        Box::new(MemoryStore::default())
    } else {
        Box::new(FileStore::new(&data_dir))
    };

    let mut app = AppState::new(storage, settings, DateKey::today());

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

    info!("studycal exited");

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    // Reminders already due when the app opens fire before the first frame
    app.check_reminders(chrono::Utc::now());

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        // Reminder scan runs on its own interval
        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_accepts_dir_on_either_side() {
        for args in [
            ["studycal", "--dir", "/tmp/plan", "init"],
            ["studycal", "init", "--dir", "/tmp/plan"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert!(matches!(cli.command, Some(Commands::Init)));
            assert_eq!(cli.dir.as_deref(), Some(Path::new("/tmp/plan")));
        }
    }

    #[test]
    fn test_ephemeral_flag() {
        let cli = Cli::try_parse_from(["studycal", "--ephemeral"]).unwrap();
        assert!(cli.ephemeral);
        assert!(cli.command.is_none());
    }
}
