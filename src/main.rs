//! Binary entrypoint for the labyrinth CLI.
//!
//! Commands:
//! - `play [--seed <n>] [--json]` - play a game on stdin/stdout
//! - `init` - write a starter `config.toml`
//!
//! See the library crate docs for module-level details: `labyrinth::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{self, BufRead, Write};

use labyrinth::config::Config;
use labyrinth::labyrinth::render::render;
use labyrinth::labyrinth::{parse_command, Session, TurnReport};

#[derive(Parser)]
#[command(name = "labyrinth")]
#[command(about = "Escape the Labyrinth of Daedalus")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game
    Play {
        /// RNG seed; overrides the config file
        #[arg(short, long)]
        seed: Option<u64>,

        /// Emit one JSON turn report per line instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write a default configuration file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            init_logging(&None, cli.verbose);
            Config::create_default(&cli.config)?;
            info!("Configuration file created at {}", cli.config);
            println!("Wrote default configuration to {}", cli.config);
        }
        Commands::Play { seed, json } => {
            let loaded = Config::load(&cli.config);
            let config = match &loaded {
                Ok(cfg) => Some(cfg.clone()),
                Err(_) => None,
            };
            init_logging(&config, cli.verbose);
            if let Err(e) = loaded {
                warn!("{}; using built-in defaults", e);
            }
            let config = config.unwrap_or_default();
            let seed = seed
                .or(config.game.seed)
                .unwrap_or_else(rand::random::<u64>);
            info!("Starting labyrinth v{} with seed {}", env!("CARGO_PKG_VERSION"), seed);
            let mut session = Session::new(&config.game, seed);
            play(&mut session, json)?;
        }
    }
    Ok(())
}

fn play(session: &mut Session, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let interactive = !json && atty::is(atty::Stream::Stdin);

    emit(&mut out, &session.intro(), json)?;
    loop {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            info!("input closed; ending session");
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let report = session.play_turn(&parse_command(&line));
        emit(&mut out, &report, json)?;
        if report.status.is_terminal() {
            break;
        }
    }
    Ok(())
}

fn emit(out: &mut impl Write, report: &TurnReport, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(report)?)?;
    } else {
        writeln!(out, "{}\n", render(report))?;
    }
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|c| c.log_level())
            .unwrap_or(log::LevelFilter::Warn),
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let file = config
        .as_ref()
        .and_then(|c| c.logging.file.clone())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });
    match file {
        Some(f) => {
            let file = std::sync::Arc::new(std::sync::Mutex::new(f));
            // The game owns the terminal; only echo log lines when nobody is reading it.
            let is_tty = atty::is(atty::Stream::Stdout);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = file.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    Ok(())
                } else {
                    writeln!(fmt, "{}", line)
                }
            });
        }
        None => {
            builder.format(|fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
            });
        }
    }
    let _ = builder.try_init();
}
