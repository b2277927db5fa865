//! Grogboard: an LLM-narrated goblin pirate campaign at the console.

mod config;
mod game;
mod input;
mod raid;

use anyhow::Context;
use game_rules::DiceRoller;
use narrative_core::GameMaster;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so they never interleave with game prompts.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_default().context("failed to load configuration")?;
    let gm = GameMaster::from_config(&config.narrator)
        .context("failed to set up the narrator backend")?;
    let mut dice = DiceRoller::new();

    game::run(&config, &gm, &mut dice)
}
