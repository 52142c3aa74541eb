mod menus;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use coreseeker_game::{Frontend, GameData, GameError, Tone};
use std::io::{self, IsTerminal};

use terminal::Terminal;

#[derive(Debug, Parser)]
#[command(name = "coreseeker", version)]
#[command(about = "Explore the facility grid, survive its wildlife and recover the nuclear cores")]
struct Args {
    /// Seed for a reproducible run (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose engine logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("session seed {seed}");
    let data = GameData::load_default().context("failed to load the game data tables")?;

    let stdout = io::stdout();
    let erase = stdout.is_terminal();
    let mut terminal = Terminal::new(io::stdin().lock(), stdout.lock(), erase);

    match menus::play(&mut terminal, &data, seed) {
        Ok(()) => {}
        Err(GameError::InputClosed) => {
            log::info!("input closed, leaving the game");
            terminal.blank();
            terminal.line(&[("Input closed. Goodbye!", Tone::Success)]);
        }
        Err(err) => return Err(err).context("game aborted"),
    }
    terminal.flush().context("failed to flush stdout")?;
    Ok(())
}
