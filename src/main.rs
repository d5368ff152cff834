use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use four_in_a_row::config::AppConfig;
use four_in_a_row::referee::Match;
use four_in_a_row::strategy::{ProcessOptions, ProcessStrategy};

/// Play a game of four-in-a-row between two strategy programs.
#[derive(Parser)]
#[command(name = "fiar", version, about = "Play a game of four-in-a-row between two strategies")]
struct Cli {
    /// First player to move, represented by @
    player1: PathBuf,

    /// Second player to move, represented by O
    player2: PathBuf,

    /// Print the board before every move
    #[arg(short, long)]
    verbose: bool,

    /// Log protocol traffic to stderr
    #[arg(short, long)]
    debug: bool,

    /// Path to TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Consecutive illegal replies before a forfeit (0 keeps asking forever)
    #[arg(long)]
    max_illegal_moves: Option<u32>,

    /// Abort the match if a strategy takes longer than this to reply
    #[arg(long)]
    read_timeout_ms: Option<u64>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    // stdout carries boards and the result line; logs go to stderr
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    // Apply CLI overrides
    if let Some(limit) = cli.max_illegal_moves {
        config.referee.max_illegal_moves = limit;
    }
    if let Some(ms) = cli.read_timeout_ms {
        config.referee.read_timeout_ms = Some(ms);
    }
    if cli.verbose {
        config.referee.verbose = true;
    }
    config.validate()?;

    let options = ProcessOptions {
        read_timeout: config.referee.read_timeout(),
    };
    let mut first = ProcessStrategy::start(&cli.player1, options)?;
    let mut second = ProcessStrategy::start(&cli.player2, options)?;

    let mut game = Match::new(&mut first, &mut second).with_config(&config.referee);
    if config.referee.verbose {
        game = game.on_board(|board| print!("{board}"));
    }
    let report = game.play()?;

    println!("{}", report.outcome);
    Ok(())
}
