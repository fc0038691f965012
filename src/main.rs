use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use xdrills::app::{App, Tui};
use xdrills::config::Preferences;
use xdrills::simple::run_plain;
use xdrills::{error, Result, XDrillsError};

#[derive(Parser)]
#[command(name = "xdrills", version, about = "Times-table drills in the terminal")]
struct Cli {
    /// Preferences file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible questions
    #[arg(long)]
    seed: Option<u64>,

    /// Line-oriented mode instead of the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", error::user_friendly_message(&e));
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let prefs = match &cli.config {
        Some(path) => Preferences::load_from(path)?,
        None => Preferences::load()?,
    };

    // The TUI owns the terminal, so logs only ever go to a file
    if let Some(path) = &cli.log_file {
        init_logging(path, &prefs.log_filter)?;
    }

    if cli.plain {
        let rng = match cli.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        return run_plain(io::stdin().lock(), io::stdout(), prefs.default_settings()?, rng);
    }

    let mut app = App::new(&prefs, cli.seed)?;
    let mut tui = Tui::new(prefs.tick_rate())
        .map_err(|e| XDrillsError::TuiError(format!("terminal unavailable: {}", e)))?;
    tui.init()
        .map_err(|e| XDrillsError::TuiError(format!("terminal setup failed: {}", e)))?;

    let result = app.run(&mut tui);
    tui.restore()?;
    result
}

fn init_logging(path: &Path, default_filter: &str) -> Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| XDrillsError::ConfigError(format!("logging setup failed: {}", e)))
}
