//! Tournament CLI
//!
//! Simulate startup tournaments and inspect stored history.

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::path::{Path, PathBuf};
use tournament::startup_core::{EventKind, StartupProfile};
use tournament::{JsonFileStore, Progress, Session, StartupStore, TournamentConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_STORE: &str = "tournament_history.json";

/// Probability that a given event kind is applied to a startup in a battle
const EVENT_CHANCE: f64 = 0.35;

const DEMO_STARTUPS: [(&str, &str, i32); 8] = [
    ("Rocket Labs", "Launch faster", 2019),
    ("NeoBank", "Banking without the bank", 2017),
    ("GreenGrid", "Power to the people", 2021),
    ("Byte Bakery", "Fresh code daily", 2020),
    ("MedAI", "Diagnosis at the speed of light", 2018),
    ("Farmly", "From field to fork", 2016),
    ("Quantum Socks", "Comfort in superposition", 2022),
    ("CloudKitchen", "Dinner as a service", 2015),
];

fn print_usage() {
    println!("Startup Rush Tournament");
    println!();
    println!("Usage:");
    println!("  tournament simulate [--startups N] [--seed S] [--config PATH] [--store PATH]");
    println!("  tournament history <name> [--store PATH]");
    println!();
    println!("Options:");
    println!("  --startups, -n   Number of demo startups (4, 6 or 8; default 8)");
    println!("  --seed, -s       Seed for reproducible brackets and events");
    println!("  --config, -c     TOML file with scoring rules");
    println!("  --store          JSON history file (default {})", DEFAULT_STORE);
    println!();
    println!("Examples:");
    println!("  tournament simulate --startups 4 --seed 42");
    println!("  tournament history \"Rocket Labs\"");
}

struct Options {
    startups: usize,
    seed: Option<u64>,
    config: Option<PathBuf>,
    store: PathBuf,
    positional: Vec<String>,
}

fn parse_options(args: &[String]) -> Result<Options> {
    let mut options = Options {
        startups: 8,
        seed: None,
        config: None,
        store: PathBuf::from(DEFAULT_STORE),
        positional: Vec::new(),
    };

    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--startups" | "-n", Some(v)) => {
                options.startups = v.parse().context("--startups expects a number")?;
                i += 1;
            }
            ("--seed" | "-s", Some(v)) => {
                options.seed = Some(v.parse().context("--seed expects a number")?);
                i += 1;
            }
            ("--config" | "-c", Some(v)) => {
                options.config = Some(PathBuf::from(v));
                i += 1;
            }
            ("--store", Some(v)) => {
                options.store = PathBuf::from(v);
                i += 1;
            }
            (flag, None) if flag.starts_with('-') => bail!("{} expects a value", flag),
            (other, _) => options.positional.push(other.to_string()),
        }
        i += 1;
    }

    Ok(options)
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<TournamentConfig> {
    let mut config = match path {
        Some(path) => TournamentConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TournamentConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

fn run_simulation(args: &[String]) -> Result<()> {
    let options = parse_options(args)?;
    let config = load_config(options.config.as_deref(), options.seed)?;
    if options.startups > DEMO_STARTUPS.len() {
        bail!("At most {} demo startups are available", DEMO_STARTUPS.len());
    }

    let mut store = JsonFileStore::open(&options.store)
        .with_context(|| format!("Failed to open store {}", options.store.display()))?;
    let mut events_rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config);

    for (name, slogan, year) in DEMO_STARTUPS.iter().take(options.startups) {
        session
            .enroll(&mut store, StartupProfile::new(name, slogan, *year))
            .with_context(|| format!("Failed to enroll {}", name))?;
    }
    session.start()?;

    loop {
        let battles: Vec<_> = session
            .current_battles()?
            .into_iter()
            .map(|b| (b.id, b.round, b.startup1, b.startup2))
            .collect();
        if battles.is_empty() {
            break;
        }

        let round = battles[0].1;
        let phase = session
            .tournament()
            .map(|t| t.round_phase(round))
            .context("Tournament vanished mid-simulation")?;
        println!("=== {} ===", phase);

        for (battle_id, _, first, second) in battles {
            for side in [first, second] {
                for kind in EventKind::ALL {
                    if events_rng.gen_bool(EVENT_CHANCE) {
                        session.record_event(battle_id, side, kind)?;
                    }
                }
            }

            let outcome = session.complete_battle(battle_id, None)?;
            let winner = session.startup(outcome.winner)?.name().to_string();
            let loser = session.startup(outcome.loser)?.name().to_string();
            println!(
                "{} ({}) beat {} ({}){}",
                winner,
                outcome.winner_score,
                loser,
                outcome.loser_score,
                if outcome.had_tiebreak { " after a shark fight" } else { "" }
            );

            match outcome.progress {
                Progress::NextRound { bye: Some(id), .. } => {
                    println!("{} advances with a bye", session.startup(id)?.name());
                }
                Progress::Completed { .. } => println!(),
                _ => {}
            }
        }
        println!();
    }

    let report = session.finalize()?;
    report.print();

    match report.persist(&mut store) {
        Ok(edition) => println!("Saved results as edition {}", edition),
        Err(e) => eprintln!("Warning: Failed to save results: {}", e),
    }
    Ok(())
}

fn show_history(args: &[String]) -> Result<()> {
    let options = parse_options(args)?;
    let Some(name) = options.positional.first() else {
        print_usage();
        bail!("history requires a startup name");
    };

    let store = JsonFileStore::open(&options.store)
        .with_context(|| format!("Failed to open store {}", options.store.display()))?;
    let Some(startup) = store.find_startup_by_name(name)? else {
        println!("No startup named '{}' found", name);
        return Ok(());
    };

    let results = store.list_participations(startup.id)?;
    println!("=== {} ===", startup.name());
    println!("{}", startup.profile.slogan);
    println!();
    if results.is_empty() {
        println!("No tournaments played yet.");
        return Ok(());
    }

    println!("{:<38} {:>8} {:>6} {:>7}", "Edition", "Position", "Score", "Events");
    println!("{}", "-".repeat(62));
    for result in results {
        println!(
            "{:<38} {:>8} {:>6} {:>7}",
            result.edition,
            result.position,
            result.score,
            result.stats.total()
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "simulate" | "sim" => run_simulation(&args[2..]),
        "history" => show_history(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            Ok(())
        }
    }
}
