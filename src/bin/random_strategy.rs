//! A strategy that answers every request with a uniformly random legal
//! column. Handy as a sparring partner and as a template for new strategies.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use four_in_a_row::game::rules;
use four_in_a_row::protocol;

/// Four-in-a-row strategy that plays random legal columns.
#[derive(Parser)]
#[command(name = "random_strategy", about = "Play random legal columns")]
struct Cli {
    /// Seed for reproducible play
    #[arg(long, env = "RANDOM_STRATEGY_SEED")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut stdout = io::stdout().lock();
    for line in io::stdin().lock().lines() {
        let line = line.context("reading request")?;
        let (_, board) = protocol::decode_request(&line)
            .with_context(|| format!("bad request {line:?}"))?;

        let legal = rules::legal_columns(&board);
        if legal.is_empty() {
            bail!("no legal move on board {}", board.serialize());
        }
        let column = legal[rng.random_range(0..legal.len())];

        // The referee blocks on this line, so it must not sit in a buffer
        stdout.write_all(protocol::encode_reply(column).as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}
