//! A terminal slot machine.
//!
//! Takes a deposit, then loops spinning rounds until the player quits or
//! runs out of money.

use anyhow::{Context, Result};
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use slot_machine::{SessionStateManagement, SlotSession};
use std::io;

use sm_client::{config::ClientConfig, terminal::Terminal};

const HELP: &str = "\
Play a 3x3 slot machine in the terminal

USAGE:
  sm_client [OPTIONS]

OPTIONS:
  --seed       N           Seed the reels for a repeatable game  [default: env SLOTS_SEED or random]
  --deposit    AMOUNT      Opening deposit, skipping the prompt  [default: env SLOTS_DEPOSIT or ask]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SLOTS_SEED               Reel seed
  SLOTS_DEPOSIT            Opening deposit (e.g., 100 or 12.50)
  RUST_LOG                 Log filter [default: warn]
";

fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let seed: Option<u64> = pargs
        .opt_value_from_str("--seed")
        .context("--seed must be an unsigned 64-bit integer")?;
    let deposit: Option<String> = pargs.opt_value_from_str("--deposit")?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_target(false)
        .init();

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        log::warn!("Ignoring unexpected arguments: {remaining:?}");
    }

    let config = ClientConfig::from_env(seed, deposit)?;
    info!("Starting slot machine with {config:?}");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut terminal = Terminal::new(stdin.lock(), stdout.lock());

    let session = match terminal.play(SlotSession::new(config.reels()), config.deposit) {
        Ok(session) => session,
        Err(interrupted) if interrupted.is_end_of_input() => {
            info!("Input closed, ending session");
            *interrupted.session
        }
        Err(interrupted) => {
            return Err(interrupted.source).context("Failed to talk to the terminal");
        }
    };

    if let Some(reason) = session.end_reason() {
        info!("Session over: {reason}");
    }
    terminal
        .show_summary(&session.summary())
        .context("Failed to print session summary")?;

    Ok(())
}
