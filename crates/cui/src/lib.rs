mod actions;
mod app;
mod input;
mod view;

use anyhow::{Context, Result};
use app::App;
use cardwheel_data::load_assets;
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::File;
use std::io::{self, stdout, IsTerminal};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub const DEFAULT_ASSETS_DIR: &str = "assets";
const TICK_RATE: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub seed: Option<u64>,
    pub assets_dir: PathBuf,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            seed: None,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

/// Logging for the full-screen UI. Records go to `CARDWHEEL_LOG_FILE` when
/// set; otherwise only errors reach stderr so the alternate screen stays clean.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("error");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = std::env::var_os("CARDWHEEL_LOG_FILE") {
        match File::create(&path) {
            Ok(file) => {
                builder
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .filter_level(log::LevelFilter::Debug);
            }
            Err(err) => eprintln!("log file unavailable: {err}"),
        }
    }
    let _ = builder.try_init();
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let assets = load_assets(&options.assets_dir)
        .with_context(|| format!("load assets from {}", options.assets_dir.display()))?;
    let mut app = App::bootstrap(&assets, options.seed)?;

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    log::info!(
        "session {} ended with {} after {} spins",
        app.session.seed(),
        app.session.state.gold_label(),
        app.session.spins()
    );
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

fn parse_options(args: &[String]) -> LaunchOptions {
    let mut options = LaunchOptions::default();
    if let Some(seed) = std::env::var("CARDWHEEL_SEED")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
    {
        options.seed = Some(seed);
    }
    if let Some(dir) = std::env::var_os("CARDWHEEL_ASSETS") {
        options.assets_dir = PathBuf::from(dir);
    }
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--assets" | "-a" => {
                if let Some(value) = args.get(idx + 1) {
                    options.assets_dir = PathBuf::from(value);
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();
    while !app.should_quit {
        terminal.draw(|frame| view::draw(frame, app))?;
        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = input::map_key(key);
                    actions::dispatch(app, action);
                }
            }
        }
        if last_tick.elapsed() >= TICK_RATE {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "cardwheel-cui requires an interactive TTY (run directly in a terminal, not a piped/headless shell)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_seed_and_assets() {
        let options = parse_options(&args(&["--seed", "42", "--assets", "/tmp/wheel"]));
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.assets_dir, PathBuf::from("/tmp/wheel"));
    }

    #[test]
    fn ignores_unknown_flags_and_bad_seed() {
        let options = parse_options(&args(&["--fast", "--seed", "abc"]));
        assert_eq!(options.seed, None);
    }
}
