// Algotty: Time-Travel Algorithm Visualization in the Terminal

mod algo;
mod event;
mod player;
mod script;
mod timeline;
mod ui;

use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use algo::params::{ParamValue, ParamValues};
use player::{Player, Speed};
use script::{Limits, ScriptEngine};
use ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "telemetry")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("algotty");

    match args.get(1).map(|s| s.as_str()) {
        Some("list") => cmd_list(),
        Some("run") => cmd_run(program_name, &args[2..]),
        Some("script") => cmd_script(program_name, &args[2..]),
        _ => {
            usage(program_name);
            std::process::exit(1);
        }
    }
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} <command> [options]", program_name);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  list                     List the built-in algorithms");
    eprintln!("  run <algorithm>          Execute an algorithm and play it back");
    eprintln!("  script <file>            Execute a script and play it back");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input <a,b,c>          Comma or space separated input array");
    eprintln!("  --param <key=value>      Algorithm parameter (repeatable)");
    eprintln!("  --speed <preset|ms>      slow, normal, fast, turbo, or milliseconds");
    eprintln!("  --headless               Print the run as JSON instead of opening the TUI");
    eprintln!("  --timeout-ms <n>         Script wall-clock budget (script only)");
    eprintln!("  --max-events <n>         Script event cap (script only)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} run bubble-sort --input 5,3,8,1,9", program_name);
    eprintln!(
        "  {} run quick-sort --param pivot=middle --speed fast",
        program_name
    );
    eprintln!("  {} script demos/reverse.js --headless", program_name);
}

fn cmd_list() -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{:<16} {:<22} {:<11} {:<13} {:<10} {}",
        "ID", "NAME", "CATEGORY", "DIFFICULTY", "AVERAGE", "SPACE"
    );
    for algorithm in algo::all() {
        let info = algorithm.info();
        println!(
            "{:<16} {:<22} {:<11} {:<13} {:<10} {}",
            info.id,
            info.name,
            info.category.as_str(),
            info.difficulty.as_str(),
            info.complexity.time_average,
            info.complexity.space,
        );
    }
    Ok(())
}

/// Options shared by the run and script subcommands.
struct CommonOpts {
    input: Vec<i64>,
    speed: Speed,
    headless: bool,
}

fn cmd_run(program_name: &str, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let id = match args.first().filter(|a| !a.starts_with("--")) {
        Some(id) => id.as_str(),
        None => {
            eprintln!("Error: No algorithm given");
            eprintln!();
            usage(program_name);
            std::process::exit(1);
        }
    };

    let algorithm = match algo::find(id) {
        Some(algorithm) => algorithm,
        None => {
            eprintln!("Error: Unknown algorithm '{}'", id);
            eprintln!("Run '{} list' to see what is available", program_name);
            std::process::exit(1);
        }
    };

    let mut opts = CommonOpts {
        input: algo::DEMO_INPUT.to_vec(),
        speed: Speed::default(),
        headless: false,
    };
    let mut params = ParamValues::with_defaults(&algorithm.params());

    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--input" => opts.input = parse_input(expect_value(program_name, &mut rest, flag)),
            "--param" => {
                let pair = expect_value(program_name, &mut rest, flag);
                match pair.split_once('=') {
                    Some((key, value)) => {
                        let value = match value.parse::<i64>() {
                            Ok(n) => ParamValue::Number(n),
                            Err(_) => ParamValue::Text(value.to_string()),
                        };
                        params.set(key, value);
                    }
                    None => {
                        eprintln!("Error: --param expects key=value, got '{}'", pair);
                        std::process::exit(1);
                    }
                }
            }
            "--speed" => opts.speed = parse_speed(expect_value(program_name, &mut rest, flag)),
            "--headless" => opts.headless = true,
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                std::process::exit(1);
            }
        }
    }

    let mut player = Player::new();
    if let Err(err) = player.load_algorithm(algorithm.as_ref(), &opts.input, &params) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    if opts.headless {
        let timeline = &player.run().timeline;
        let last = timeline.last();
        let report = serde_json::json!({
            "algorithm": algorithm.info().id,
            "steps": timeline.len(),
            "events": timeline.events().len(),
            "final_array": &last.array,
            "metrics": &last.metrics,
            "outcome": &last.outcome,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    player.set_speed(opts.speed, Instant::now());
    run_tui(player)
}

fn cmd_script(program_name: &str, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let path = match args.first().filter(|a| !a.starts_with("--")) {
        Some(path) => path.as_str(),
        None => {
            eprintln!("Error: No script file given");
            eprintln!();
            usage(program_name);
            std::process::exit(1);
        }
    };

    if !Path::new(path).exists() {
        eprintln!("Error: File '{}' not found", path);
        std::process::exit(1);
    }

    let mut opts = CommonOpts {
        input: algo::DEMO_INPUT.to_vec(),
        speed: Speed::default(),
        headless: false,
    };
    let mut limits = Limits::default();

    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--input" => opts.input = parse_input(expect_value(program_name, &mut rest, flag)),
            "--speed" => opts.speed = parse_speed(expect_value(program_name, &mut rest, flag)),
            "--headless" => opts.headless = true,
            "--timeout-ms" => {
                let ms = parse_number(expect_value(program_name, &mut rest, flag), flag);
                limits.max_duration = Duration::from_millis(ms);
            }
            "--max-events" => {
                limits.max_events =
                    parse_number(expect_value(program_name, &mut rest, flag), flag) as usize;
            }
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                std::process::exit(1);
            }
        }
    }

    let source = fs::read_to_string(path)?;
    let engine = ScriptEngine::new(limits);
    let outcome = engine.execute(&source, &opts.input);

    if opts.headless {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        if !outcome.success {
            std::process::exit(1);
        }
        return Ok(());
    }

    let title = Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("script");
    let mut player = Player::new();
    player.load_script(title, &source, &outcome, &opts.input);
    player.set_speed(opts.speed, Instant::now());
    run_tui(player)
}

fn expect_value<'a>(
    program_name: &str,
    rest: &mut std::slice::Iter<'a, String>,
    flag: &str,
) -> &'a str {
    match rest.next() {
        Some(value) => value,
        None => {
            eprintln!("Error: {} expects a value", flag);
            eprintln!();
            usage(program_name);
            std::process::exit(1);
        }
    }
}

fn parse_input(raw: &str) -> Vec<i64> {
    let mut values = Vec::new();
    for piece in raw.split(|c: char| c == ',' || c.is_whitespace()) {
        if piece.is_empty() {
            continue;
        }
        match piece.parse::<i64>() {
            Ok(value) => values.push(value),
            Err(_) => {
                eprintln!("Error: '{}' is not an integer", piece);
                std::process::exit(1);
            }
        }
    }
    values
}

fn parse_speed(raw: &str) -> Speed {
    match Speed::parse(raw) {
        Some(speed) => speed,
        None => {
            eprintln!(
                "Error: '{}' is not a speed (slow, normal, fast, turbo, or milliseconds)",
                raw
            );
            std::process::exit(1);
        }
    }
}

fn parse_number(raw: &str, flag: &str) -> u64 {
    match raw.parse::<u64>() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Error: {} expects a number, got '{}'", flag, raw);
            std::process::exit(1);
        }
    }
}

/// Set up the terminal, run the app, and restore the terminal.
fn run_tui(player: Player) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(player);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
