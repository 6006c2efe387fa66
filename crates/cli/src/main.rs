use anyhow::{Context, Result};
use cardwheel_core::{CardKind, Event, EventBus, RngState, Session, TickOutcome};
use cardwheel_data::{load_assets, Assets};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Upper bound for `--auto`; a default wheel covers every slot in 16 spins.
const AUTO_SPIN_LIMIT: u32 = 1_000;

#[derive(Debug, Clone)]
struct CliOptions {
    auto: bool,
    cui: bool,
    json: bool,
    help: bool,
    seed: Option<u64>,
    assets_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Spin,
    State,
    Slots,
    Help,
    Quit,
    Empty,
    Unknown,
}

#[derive(Debug, Serialize)]
struct SpinRecord {
    spin: u32,
    slot: usize,
    card: Option<CardKind>,
    gold_delta: i64,
    gold: i64,
    description: String,
}

#[derive(Debug, Serialize)]
struct SessionSummary {
    seed: u64,
    spins: u32,
    complete: bool,
    gold: i64,
    multiplier: f64,
    noble_traitor_bonus: i64,
    outcomes: Vec<SpinRecord>,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    if options.help {
        print_usage();
        return Ok(());
    }
    if options.cui {
        cardwheel_cui::init_logging();
        return cardwheel_cui::run(cardwheel_cui::LaunchOptions {
            seed: options.seed,
            assets_dir: options.assets_dir,
        });
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let assets = load_assets(&options.assets_dir)
        .with_context(|| format!("load assets from {}", options.assets_dir.display()))?;
    let mut events = EventBus::default();
    let mut session = start_session(&assets, options.seed, &mut events)?;
    if options.auto {
        let summary = run_auto(&mut session, &mut events);
        if options.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            for record in &summary.outcomes {
                println!(
                    "spin {:>2} slot {}: {}",
                    record.spin, record.slot, record.description
                );
            }
            print_state(&session);
        }
        return Ok(());
    }
    run_repl(&assets, &mut session, &mut events)
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        auto: false,
        cui: false,
        json: false,
        help: false,
        seed: std::env::var("CARDWHEEL_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok()),
        assets_dir: std::env::var_os("CARDWHEEL_ASSETS")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(cardwheel_cui::DEFAULT_ASSETS_DIR)),
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--auto" => options.auto = true,
            "--cui" => options.cui = true,
            "--json" => options.json = true,
            "--help" | "-h" => options.help = true,
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

fn start_session(assets: &Assets, seed: Option<u64>, events: &mut EventBus) -> Result<Session> {
    let rng = seed
        .map(RngState::from_seed)
        .unwrap_or_else(RngState::from_entropy);
    Session::new(assets.config.clone(), &assets.kinds(), rng, events).context("start session")
}

fn record_outcome(session: &Session, outcome: TickOutcome) -> SpinRecord {
    match outcome {
        TickOutcome::Revealed { slot, report } => SpinRecord {
            spin: session.spins(),
            slot,
            card: Some(report.card),
            gold_delta: report.gold_delta,
            gold: report.after.gold,
            description: report.description,
        },
        TickOutcome::AlreadyRevealed { slot } => SpinRecord {
            spin: session.spins(),
            slot,
            card: None,
            gold_delta: 0,
            gold: session.state.gold,
            description: "already revealed".to_string(),
        },
    }
}

fn run_auto(session: &mut Session, events: &mut EventBus) -> SessionSummary {
    let mut outcomes = Vec::new();
    while !session.is_complete() && session.spins() < AUTO_SPIN_LIMIT {
        if let Some(outcome) = session.run_spin(events) {
            outcomes.push(record_outcome(session, outcome));
        }
        events.drain().for_each(|event| log::debug!("{}", event.describe()));
    }
    if !session.is_complete() {
        log::warn!(
            "stopped after {} spins without revealing every slot",
            session.spins()
        );
    }
    SessionSummary {
        seed: session.seed(),
        spins: session.spins(),
        complete: session.is_complete(),
        gold: session.state.gold,
        multiplier: session.state.multiplier,
        noble_traitor_bonus: session.state.noble_traitor_bonus,
        outcomes,
    }
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "spin" | "s" => Command::Spin,
        "state" | "st" | "gold" => Command::State,
        "slots" | "ls" => Command::Slots,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown,
    }
}

fn run_repl(assets: &Assets, session: &mut Session, events: &mut EventBus) -> Result<()> {
    println!("seed {} | type 'help' for commands", session.seed());
    print_events(assets, events);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}> ", session.state.gold_label());
        io::stdout().flush().context("flush prompt")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read command")?;
        match parse_command(&line) {
            Command::Spin => {
                session.run_spin(events);
                print_events(assets, events);
                if session.is_complete() {
                    println!("all cards revealed");
                }
            }
            Command::State => print_state(session),
            Command::Slots => print_slots(assets, session),
            Command::Help => print_commands(),
            Command::Quit => break,
            Command::Empty => {}
            Command::Unknown => println!("unknown command: {}", line.trim()),
        }
    }
    print_state(session);
    Ok(())
}

fn print_events(assets: &Assets, events: &mut EventBus) {
    for event in events.drain() {
        match event {
            Event::SpinStarted { .. } => {}
            Event::CardRevealed { slot, card } => {
                println!("slot {slot} revealed {}", assets.display_name(card));
            }
            other => println!("{}", other.describe()),
        }
    }
}

fn print_state(session: &Session) {
    let state = &session.state;
    println!(
        "{} | multiplier x{:.2} | noble traitor +{} | revealed {}/{} | spins {}",
        state.gold_label(),
        state.multiplier,
        state.noble_traitor_bonus,
        session.board.revealed_count(),
        session.board.len(),
        session.spins()
    );
}

fn print_slots(assets: &Assets, session: &Session) {
    let pointed = session.wheel.slot_under_pointer();
    for slot in 0..session.board.len() {
        let label = match session.board.card_at(slot) {
            Some(card) if session.board.is_revealed(slot) => assets.display_name(card),
            _ => "??",
        };
        let marker = if slot == pointed { ">" } else { " " };
        println!("{marker} slot {slot}: {label}");
    }
}

fn print_commands() {
    println!("spin | s      spin the wheel");
    println!("state | st    show gold, multiplier and bonus");
    println!("slots | ls    list slots");
    println!("help | ?      this list");
    println!("quit | q      leave");
}

fn print_usage() {
    println!("cardwheel-cli [--seed N] [--assets DIR] [--auto [--json]] [--cui]");
    println!();
    println!("  --seed N      fixed shuffle seed (default: random)");
    println!("  --assets DIR  directory holding wheel.json and cards.json");
    println!("  --auto        spin until every card is revealed");
    println!("  --json        with --auto, print a JSON summary");
    println!("  --cui         open the full-screen terminal UI");
}
