//! `sourire` — terminal front end for the Les Héros du Sourire creator
//! application form.
//!
//! # Usage
//!
//! ```
//! sourire
//! sourire --config ~/.config/sourire/sourire.toml --export-dir ~/Téléchargements
//! echo -n 'secret' | sourire --hash-password
//! ```

mod app;
mod clipboard;
mod ui;

use std::{
  fs::{File, OpenOptions},
  io::{self, BufRead},
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use chrono::Utc;
use clap::Parser;
use clipboard::Osc52Clipboard;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use sourire_app::{admin::AdminPanel, config::AppConfig, form::FormController};
use sourire_core::{
  credential::hash_password, kv::KeyValueStore, ledger::Ledger,
  persist::Persistence,
};
use sourire_export::DirectorySink;
use sourire_store_sqlite::SqliteKvStore;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sourire", about = "Creator application form for Les Héros du Sourire")]
struct Cli {
  /// Path to a TOML config file; missing is fine.
  #[arg(short, long, value_name = "FILE", default_value = "sourire.toml")]
  config: PathBuf,

  /// SQLite file holding saved submissions (overrides `data_path`).
  #[arg(long, value_name = "FILE")]
  data: Option<PathBuf>,

  /// Directory that receives exported files (overrides `export_dir`).
  #[arg(long, value_name = "DIR")]
  export_dir: Option<PathBuf>,

  /// Read a password from stdin, print its Argon2 hash and exit.
  #[arg(long)]
  hash_password: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.hash_password {
    let password = read_password()?;
    println!("{}", hash_password(&password)?);
    return Ok(());
  }

  let mut cfg = AppConfig::load(&cli.config)
    .with_context(|| format!("loading config {}", cli.config.display()))?;
  if let Some(data) = cli.data {
    cfg.data_path = data;
  }
  if let Some(dir) = cli.export_dir {
    cfg.export_dir = dir;
  }

  // The terminal belongs to the UI, so logs go to a file.
  let log_file = open_log(&cfg.log_path)
    .with_context(|| format!("opening log file {}", cfg.log_path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(log_file))
    .with_ansi(false)
    .init();

  let store = SqliteKvStore::open(&cfg.data_path)
    .with_context(|| format!("opening database {}", cfg.data_path.display()))?;
  let ledger = Ledger::open(Persistence::new(store, cfg.storage_key.clone()));
  info!(
    data = %cfg.data_path.display(),
    saved = ledger.len(),
    "submission ledger opened"
  );

  let mut app = App::new(
    ledger,
    FormController::new(cfg.confirmation()),
    AdminPanel::new(cfg.credential().context("configuring admin credential")?),
    Box::new(DirectorySink::new(cfg.export_dir.clone())),
    Box::new(Osc52Clipboard::new(io::stdout())),
  );

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app);

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop<S: KeyValueStore>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<S>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if event::poll(Duration::from_millis(100)).context("polling terminal")? {
      match event::read().context("reading terminal event")? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          if !app.handle_key(key, Utc::now()) {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }

    app.tick(Utc::now());
  }

  info!("exiting");
  Ok(())
}

/// Read a single line from stdin, without the trailing newline.
fn read_password() -> Result<String> {
  let mut line = String::new();
  io::stdin()
    .lock()
    .read_line(&mut line)
    .context("reading password from stdin")?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}

/// Open the log file for appending, creating it if needed.
fn open_log(path: &Path) -> io::Result<File> {
  OpenOptions::new().create(true).append(true).open(path)
}
