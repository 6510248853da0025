//! Return-to-Player Simulation Example
//!
//! Spins the machine many times with a fixed seed and reports how much of
//! each wagered dollar comes back, per number of bet lines.

use rand::{SeedableRng, rngs::StdRng};
use slot_machine::{
    Bet, Lines, Money, Symbol,
    functional::{get_winnings, spin, transpose},
};
use std::collections::HashMap;

const SPINS: u64 = 1_000_000;

fn main() {
    println!("=== Slot Machine RTP Simulation ===\n");
    println!("Paytable:");
    for symbol in Symbol::ALL {
        println!(
            "  {symbol}: {} in pool, pays x{}",
            symbol.weight(),
            symbol.multiplier()
        );
    }
    println!();

    for lines in 1..=3u8 {
        let mut rng = StdRng::seed_from_u64(2023);
        let bet = Bet::new(Lines::new(lines).unwrap(), Money::from_dollars(1));
        let mut returned: u64 = 0;
        let mut hits: HashMap<Symbol, u64> = HashMap::new();

        for _ in 0..SPINS {
            let rows = transpose(&spin(&mut rng));
            let winnings = get_winnings(&rows, &bet);
            returned += winnings.cents();
            for row in rows.iter().take(bet.lines.count()) {
                if row.iter().all(|s| *s == row[0]) {
                    *hits.entry(row[0]).or_default() += 1;
                }
            }
        }

        let wagered = bet.total().cents() * SPINS;
        println!("{lines} line(s):");
        println!(
            "  RTP: {:.2}%",
            returned as f64 / wagered as f64 * 100.0
        );
        for symbol in Symbol::ALL {
            let count = hits.get(&symbol).copied().unwrap_or(0);
            println!("  {symbol}{symbol}{symbol} hit {count} times");
        }
        println!();
    }
}
