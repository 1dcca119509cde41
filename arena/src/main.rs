//! arena - pits two Quoridor agents against each other and reports the
//! win/loss/draw tally.

use anyhow::{bail, Result};
use clap::Parser;
use mcts::MctsConfig;
use tracing::info;

mod agents;
mod driver;

use crate::agents::{Agent, GreedyAgent, MctsAgent, RandomAgent};

#[derive(Parser, Debug)]
#[command(name = "arena", about = "Quoridor agent match driver")]
struct Args {
    /// Board side length.
    #[arg(long, default_value_t = 5)]
    board_size: usize,

    /// Number of games to play; colors swap halfway through.
    #[arg(long, default_value_t = 20)]
    games: u32,

    /// MCTS playouts per move (mcts agent only).
    #[arg(long, default_value_t = 100)]
    simulations: u32,

    /// First agent: random, greedy or mcts.
    #[arg(long, default_value = "mcts")]
    agent_one: String,

    /// Second agent: random, greedy or mcts.
    #[arg(long, default_value = "greedy")]
    agent_two: String,

    /// Base RNG seed for reproducible series.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log level used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn validate(&self) -> Result<()> {
        if self.board_size < 3 {
            bail!("board size must be at least 3, got {}", self.board_size);
        }
        if self.games == 0 {
            bail!("at least one game is required");
        }
        Ok(())
    }
}

fn build_agent(kind: &str, simulations: u32, seed: u64) -> Result<Box<dyn Agent>> {
    match kind {
        "random" => Ok(Box::new(RandomAgent::new(seed))),
        "greedy" => Ok(Box::new(GreedyAgent::new())),
        "mcts" => Ok(Box::new(MctsAgent::new(
            MctsConfig::default().with_simulations(simulations),
            seed,
        ))),
        other => bail!("unknown agent kind '{other}' (expected random, greedy or mcts)"),
    }
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;
    init_tracing(&args.log_level)?;

    info!(
        board_size = args.board_size,
        games = args.games,
        agent_one = %args.agent_one,
        agent_two = %args.agent_two,
        seed = args.seed,
        "starting series"
    );

    // Distinct seeds so mirrored agent kinds do not mirror each other's play.
    let mut one = build_agent(&args.agent_one, args.simulations, args.seed)?;
    let mut two = build_agent(&args.agent_two, args.simulations, args.seed ^ 0x9E37_79B9)?;

    let tally = driver::play_series(one.as_mut(), two.as_mut(), args.board_size, args.games)?;
    info!(
        wins = tally.wins,
        losses = tally.losses,
        draws = tally.draws,
        "series finished, tally is from '{}'s perspective",
        args.agent_one
    );
    Ok(())
}
