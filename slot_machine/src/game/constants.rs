//! Fixed machine dimensions and the symbol paytable.

/// Symbols shown per reel.
pub const ROWS: usize = 3;

/// Number of reels.
pub const COLS: usize = 3;

/// Each row of the transposed grid is a bet line.
pub const MAX_LINES: u8 = ROWS as u8;

/// Pool count and payout multiplier attached to a symbol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SymbolSpec {
    /// How many copies of the symbol go into a fresh reel pool.
    pub weight: usize,
    /// Multiplier applied to the per-line bet when a line matches.
    pub multiplier: u64,
}

/// Indexed by `Symbol as usize` (A, B, C, D).
pub const SYMBOL_SPECS: [SymbolSpec; 4] = [
    SymbolSpec {
        weight: 2,
        multiplier: 5,
    },
    SymbolSpec {
        weight: 4,
        multiplier: 4,
    },
    SymbolSpec {
        weight: 6,
        multiplier: 3,
    },
    SymbolSpec {
        weight: 8,
        multiplier: 2,
    },
];

/// Total entries in a fresh reel pool.
pub const POOL_SIZE: usize =
    SYMBOL_SPECS[0].weight + SYMBOL_SPECS[1].weight + SYMBOL_SPECS[2].weight + SYMBOL_SPECS[3].weight;

const _: () = assert!(POOL_SIZE >= ROWS);
