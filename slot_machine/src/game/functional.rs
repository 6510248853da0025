//! Pure spin and payout logic.

use log::debug;
use rand::Rng;

use super::{
    constants::{COLS, POOL_SIZE, ROWS},
    entities::{Bet, LineWin, Lines, Money, Reels, Rows, Symbol},
};

/// Every symbol repeated by its weight, in paytable order.
#[must_use]
pub fn symbol_pool() -> Vec<Symbol> {
    let mut pool = Vec::with_capacity(POOL_SIZE);
    for symbol in Symbol::ALL {
        pool.extend(std::iter::repeat_n(symbol, symbol.weight()));
    }
    pool
}

/// Draw a column-major grid. Each reel draws `ROWS` symbols without
/// replacement from its own fresh copy of the pool.
pub fn spin<R: Rng + ?Sized>(rng: &mut R) -> Reels {
    let pool = symbol_pool();
    let mut reels = [[Symbol::A; ROWS]; COLS];
    for reel in &mut reels {
        let mut remaining = pool.clone();
        for slot in reel.iter_mut() {
            let idx = rng.random_range(0..remaining.len());
            *slot = remaining.swap_remove(idx);
        }
    }
    Reels(reels)
}

/// Reindex reels into bet lines: `rows[i][j] == reels[j][i]`.
#[must_use]
pub fn transpose(reels: &Reels) -> Rows {
    let mut rows = [[Symbol::A; COLS]; ROWS];
    for (i, row) in rows.iter_mut().enumerate() {
        for (j, symbol) in row.iter_mut().enumerate() {
            *symbol = reels.0[j][i];
        }
    }
    Rows(rows)
}

/// Returns the matched symbol if every symbol on the line is the same.
#[must_use]
pub fn matching_symbol(line: &[Symbol]) -> Option<Symbol> {
    let (first, rest) = line.split_first()?;
    rest.iter().all(|s| s == first).then_some(*first)
}

/// Winning lines among the first `lines` rows. Rows past the bet are
/// never paid even though they are shown.
#[must_use]
pub fn line_wins(rows: &Rows, lines: Lines, per_line: Money) -> Vec<LineWin> {
    rows.iter()
        .take(lines.count())
        .enumerate()
        .filter_map(|(line, row)| {
            matching_symbol(row).map(|symbol| LineWin {
                line,
                symbol,
                payout: per_line.saturating_mul(symbol.multiplier()),
            })
        })
        .collect()
}

/// Total paid for a bet against a grid, zero if no bet line matches.
#[must_use]
pub fn get_winnings(rows: &Rows, bet: &Bet) -> Money {
    let winnings = line_wins(rows, bet.lines, bet.per_line)
        .into_iter()
        .map(|win| win.payout)
        .sum();
    debug!("{bet} against\n{rows}\npays {winnings}");
    winnings
}
