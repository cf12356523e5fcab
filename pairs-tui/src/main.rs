//! pairs - memory matching in the terminal
//!
//! # Usage
//!
//! ```sh
//! # Settings screen with defaults
//! pairs
//!
//! # Jump straight to a 6x6 icon board for three players
//! pairs --theme icons --grid 6x6 --players 3
//!
//! # Reproducible shuffles, debug log in a file
//! pairs --seed 42 --log-file pairs.log --log-level debug
//! ```

use std::fmt;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pairs_core::{
    reducer, validate_catalog, Board, BoardConfig, DeckError, GameAction, GameRng, GameState,
    GridSize, Store, Theme, TracingMiddleware, ICONS, MAX_PLAYERS,
};
use pairs_tui::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Numbers,
    Icons,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GridArg {
    #[value(name = "4x4")]
    Four,
    #[value(name = "6x6")]
    Six,
}

/// Memory matching card game
#[derive(Parser, Debug)]
#[command(name = "pairs")]
#[command(about = "Find every matching pair, alone against the clock or with up to four players")]
struct Args {
    /// Preselect the card theme
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,

    /// Preselect the number of players (1-4)
    #[arg(long, short)]
    players: Option<u8>,

    /// Preselect the grid size
    #[arg(long, short, value_enum)]
    grid: Option<GridArg>,

    /// Seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// How long a revealed pair stays up, in milliseconds
    #[arg(long, default_value = "700")]
    reveal_ms: u64,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level for --log-file
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

/// Problems found before the terminal is taken over
#[derive(Debug)]
enum CliError {
    PlayersOutOfRange(u8),
    LogFile(PathBuf, io::Error),
    Logger(log::SetLoggerError),
    Catalog(DeckError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::PlayersOutOfRange(n) => {
                write!(f, "--players must be between 1 and {}, got {}", MAX_PLAYERS, n)
            }
            CliError::LogFile(path, e) => {
                write!(f, "Could not create log file {}: {}", path.display(), e)
            }
            CliError::Logger(e) => write!(f, "Could not install logger: {}", e),
            CliError::Catalog(e) => write!(f, "Icon catalog is unusable: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<DeckError> for CliError {
    fn from(e: DeckError) -> Self {
        CliError::Catalog(e)
    }
}

fn init_logging(args: &Args) -> Result<(), CliError> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = File::create(path).map_err(|e| CliError::LogFile(path.clone(), e))?;
    simplelog::WriteLogger::init(args.log_level, config, file).map_err(CliError::Logger)
}

/// Settings presets, applied as ordinary store commands
fn presets(args: &Args) -> Result<Vec<GameAction>, CliError> {
    let mut actions = Vec::new();
    if let Some(theme) = args.theme {
        actions.push(GameAction::ThemeSet(match theme {
            ThemeArg::Numbers => Theme::Numbers,
            ThemeArg::Icons => Theme::Icons,
        }));
    }
    if let Some(players) = args.players {
        if players == 0 || usize::from(players) > MAX_PLAYERS {
            return Err(CliError::PlayersOutOfRange(players));
        }
        actions.push(GameAction::PlayersSet(players));
    }
    if let Some(grid) = args.grid {
        actions.push(GameAction::GridSizeSet(match grid {
            GridArg::Four => GridSize::Four,
            GridArg::Six => GridSize::Six,
        }));
    }
    Ok(actions)
}

fn build_app(args: &Args) -> Result<App, CliError> {
    init_logging(args)?;
    validate_catalog(&ICONS)?;

    let rng = args.seed.map(GameRng::new).unwrap_or_else(GameRng::from_entropy);
    info!(seed = rng.seed(), "Starting pairs");

    let config = BoardConfig {
        resolve_delay: Duration::from_millis(args.reveal_ms),
        ..BoardConfig::default()
    };
    let board = Board::new(config, rng)?;

    let mut store = Store::with_middleware(GameState::default(), reducer, TracingMiddleware);
    for action in presets(args)? {
        store.dispatch(action);
    }
    Ok(App::new(store, board))
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    // Configuration errors are reported before entering raw mode
    let mut app = match build_app(&args) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = pairs_tui::run(&mut terminal, &mut app).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Exited cleanly");
    result
}
