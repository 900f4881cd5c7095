use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::prelude::*;
use rcountdown::DurationCatalog;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::PathBuf, time::{Duration, Instant}};

mod app;
mod ui;

use app::AppState;

// ============================================================================
// Type Aliases & Constants
// ============================================================================

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
const DATA_DIR: &str = "rcountdown";
const MIN_TICK_MS: u64 = 10;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Clone)]
#[command(author, version, about = "⏳ rcountdown - scroll to a duration, press start")]
struct Args {
    /// Pre-select the closest duration, e.g. 30s, 1m, 45
    #[arg(short, long, value_parser = parse_duration)]
    start: Option<u32>,
    #[arg(short = 't', long)]
    theme: Option<String>,
    /// Width of one list item in columns
    #[arg(short = 'w', long)]
    item_width: Option<u16>,
    #[arg(long)]
    no_sound: bool,
    #[arg(long)]
    no_notify: bool,
    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,
}

/// Seconds from "90", "45s", "1m" or "1m30s".
fn parse_duration(s: &str) -> std::result::Result<u32, String> {
    let s = s.trim().to_lowercase();
    let mut total = 0u32;
    let mut num = String::new();

    for c in s.chars() {
        match c {
            '0'..='9' => num.push(c),
            'h' => { total = total.saturating_add(num.parse::<u32>().map_err(|_| "Invalid hours")?.saturating_mul(3600)); num.clear(); }
            'm' => { total = total.saturating_add(num.parse::<u32>().map_err(|_| "Invalid minutes")?.saturating_mul(60)); num.clear(); }
            's' => { total = total.saturating_add(num.parse::<u32>().map_err(|_| "Invalid seconds")?); num.clear(); }
            _ => return Err("Invalid format".into()),
        }
    }
    if !num.is_empty() {
        total = total.saturating_add(num.parse::<u32>().map_err(|_| "Invalid seconds")?);
    }

    if total > 0 { Ok(total) } else { Err("Duration must be > 0".into()) }
}

// ============================================================================
// Configuration
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub sound_enabled: bool,
    pub notify_enabled: bool,
    pub item_width: u16,
    pub tick_ms: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "default".into(),
            sound_enabled: true,
            notify_enabled: true,
            item_width: 12,
            tick_ms: 16,
            log_level: "info".into(),
        }
    }
}

impl Config {
    fn apply_args(&mut self, args: &Args) {
        if let Some(t) = &args.theme { self.theme = t.clone(); }
        if let Some(w) = args.item_width { self.item_width = w; }
        if args.no_sound { self.sound_enabled = false; }
        if args.no_notify { self.notify_enabled = false; }
        self.item_width = self.item_width.max(4);
        self.tick_ms = self.tick_ms.max(MIN_TICK_MS);
    }
}

// ============================================================================
// Utilities
// ============================================================================

fn get_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(".");
    path.push(DATA_DIR);
    let _ = fs::create_dir_all(&path);
    path.push(filename);
    path
}

fn load_json<T: for<'de> Deserialize<'de> + Default>(path: &PathBuf) -> T {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

fn save_json<T: Serialize>(path: &PathBuf, data: &T) -> io::Result<()> {
    fs::write(path, serde_json::to_string_pretty(data)?)
}

/// The terminal is in the alternate screen, so log records go to a file.
fn init_logger(level: &str) {
    let target: Box<dyn io::Write + Send> = match fs::File::create(get_path("rcountdown.log")) {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(io::sink()),
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Pipe(target))
        .try_init();
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    if args.init_config {
        let path = get_path("config.json");
        save_json(&path, &Config::default())?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let mut config = load_json::<Config>(&get_path("config.json"));
    config.apply_args(&args);
    init_logger(&config.log_level);

    let catalog = DurationCatalog::new();
    let initial_index = args.start.map_or(0, |secs| catalog.nearest(secs));
    info!(
        "starting with {}s selected, theme {}",
        catalog.duration_at(initial_index)?.secs(),
        config.theme
    );

    let mut app = AppState::new(&config, initial_index);
    let tick_rate = Duration::from_millis(config.tick_ms);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app, tick_rate);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        warn!("exiting with error: {}", e);
    }
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState, tick_rate: Duration) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let view = app.frame();
        terminal.draw(|f| ui::render_ui(f, app, &view))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app::handle_input(key, app) {
                        info!("quit");
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app::handle_mouse(mouse, app),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.update();
            last_tick = Instant::now();
        }
    }
}
