use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};
use thiserror::Error;

use super::constants::{COLS, MAX_LINES, ROWS, SYMBOL_SPECS, SymbolSpec};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Symbol {
    A,
    B,
    C,
    D,
}

impl Symbol {
    /// Every symbol, in paytable order.
    pub const ALL: [Symbol; 4] = [Self::A, Self::B, Self::C, Self::D];

    #[must_use]
    pub const fn spec(self) -> SymbolSpec {
        SYMBOL_SPECS[self as usize]
    }

    #[must_use]
    pub const fn weight(self) -> usize {
        self.spec().weight
    }

    #[must_use]
    pub const fn multiplier(self) -> u64 {
        self.spec().multiplier
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        write!(f, "{repr}")
    }
}

/// Errors from parsing a money amount.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MoneyParseError {
    #[error("no amount given")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("at most 2 decimal places are allowed")]
    TooPrecise,
    #[error("amount is too large")]
    Overflow,
}

/// An amount of money in whole cents.
///
/// Balances never go through floating point, so a balance of zero is
/// always exactly zero.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn from_dollars(dollars: u64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn checked_sub(self, rhs: Money) -> Option<Money> {
        match self.0.checked_sub(rhs.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    #[must_use]
    pub const fn saturating_mul(self, factor: u64) -> Money {
        Money(self.0.saturating_mul(factor))
    }
}

/// Addition saturates at `u64::MAX` cents.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dollars, cents) = (self.0 / 100, self.0 % 100);
        if cents == 0 {
            write!(f, "${dollars}")
        } else {
            write!(f, "${dollars}.{cents:02}")
        }
    }
}

/// Parses plain decimal amounts such as `100`, `12.5` or `.25`.
/// Signs, exponents and sub-cent precision are rejected.
impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(MoneyParseError::NotANumber(s.to_string()));
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise);
        }

        let mut cents: u64 = 0;
        for b in whole.bytes() {
            cents = cents
                .checked_mul(10)
                .and_then(|c| c.checked_add(u64::from(b - b'0')))
                .ok_or(MoneyParseError::Overflow)?;
        }
        let mut fraction_cents = 0;
        for (i, b) in fraction.bytes().enumerate() {
            let scale = if i == 0 { 10 } else { 1 };
            fraction_cents += u64::from(b - b'0') * scale;
        }
        cents
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .map(Money)
            .ok_or(MoneyParseError::Overflow)
    }
}

/// Errors from choosing a number of bet lines.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LinesError {
    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),
    #[error("can bet on 1 to 3 lines, not {0}")]
    OutOfRange(i64),
}

/// Number of bet lines, always within `1..=MAX_LINES`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Lines(u8);

impl Lines {
    pub const MAX: Lines = Lines(MAX_LINES);

    pub fn new(lines: u8) -> Result<Self, LinesError> {
        Self::try_from(i64::from(lines))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn count(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i64> for Lines {
    type Error = LinesError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (1..=i64::from(MAX_LINES)).contains(&value) {
            // Range check above keeps this within u8.
            Ok(Lines(value as u8))
        } else {
            Err(LinesError::OutOfRange(value))
        }
    }
}

impl FromStr for Lines {
    type Err = LinesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value: i64 = s
            .parse()
            .map_err(|_| LinesError::NotAnInteger(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Lines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A wager of `per_line` on each of the first `lines` rows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bet {
    pub lines: Lines,
    pub per_line: Money,
}

impl Bet {
    #[must_use]
    pub const fn new(lines: Lines, per_line: Money) -> Self {
        Self { lines, per_line }
    }

    /// Total cost of the bet. Saturates rather than wrapping, so an absurd
    /// bet can never look affordable.
    #[must_use]
    pub const fn total(&self) -> Money {
        self.per_line.saturating_mul(self.lines.get() as u64)
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.lines.get() == 1 { "" } else { "s" };
        write!(
            f,
            "{} on {} line{plural} ({} total)",
            self.per_line,
            self.lines,
            self.total()
        )
    }
}

/// One reel (column) of symbols, top to bottom.
pub type Reel = [Symbol; ROWS];

/// Column-major spin result, straight off the reels.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reels(pub [Reel; COLS]);

/// Row-major grid, where each row is a bet line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rows(pub [[Symbol; COLS]; ROWS]);

impl Rows {
    pub fn iter(&self) -> impl Iterator<Item = &[Symbol; COLS]> {
        self.0.iter()
    }
}

impl fmt::Display for Rows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, symbol) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " | ")?;
                }
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

/// A bet line that paid out.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LineWin {
    /// Zero-based row index.
    pub line: usize,
    pub symbol: Symbol,
    pub payout: Money,
}

impl fmt::Display for LineWin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} x{} pays {}",
            self.line + 1,
            self.symbol,
            self.symbol.multiplier(),
            self.payout
        )
    }
}

/// Everything that happened in a settled round.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundOutcome {
    pub bet: Bet,
    pub rows: Rows,
    pub line_wins: Vec<LineWin>,
    pub winnings: Money,
    /// Balance after the bet was taken and winnings were paid.
    pub balance: Money,
}

/// Player's answer to "play again?".
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Replay {
    Continue,
    Quit,
}

/// Running totals for a whole session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SessionSummary {
    pub deposited: Money,
    pub rounds: usize,
    pub wagered: Money,
    pub won: Money,
    pub balance: Money,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.rounds == 1 { "" } else { "s" };
        write!(
            f,
            "deposited {}, played {} round{plural}, wagered {}, won {}, leaving {}",
            self.deposited, self.rounds, self.wagered, self.won, self.balance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_paytable() {
        let table: Vec<(usize, u64)> = Symbol::ALL
            .iter()
            .map(|s| (s.weight(), s.multiplier()))
            .collect();
        assert_eq!(table, vec![(2, 5), (4, 4), (6, 3), (8, 2)]);
    }

    #[test]
    fn test_money_parse() {
        assert_eq!("100".parse::<Money>(), Ok(Money::from_dollars(100)));
        assert_eq!(" 12.5 ".parse::<Money>(), Ok(Money::from_cents(1250)));
        assert_eq!("0.05".parse::<Money>(), Ok(Money::from_cents(5)));
        assert_eq!(".25".parse::<Money>(), Ok(Money::from_cents(25)));
        assert_eq!("7.".parse::<Money>(), Ok(Money::from_dollars(7)));
        assert_eq!("0".parse::<Money>(), Ok(Money::ZERO));
    }

    #[test]
    fn test_money_parse_rejects() {
        assert_eq!("".parse::<Money>(), Err(MoneyParseError::Empty));
        assert_eq!("1.234".parse::<Money>(), Err(MoneyParseError::TooPrecise));
        assert!(matches!(
            "-1".parse::<Money>(),
            Err(MoneyParseError::NotANumber(_))
        ));
        assert!(matches!(
            "abc".parse::<Money>(),
            Err(MoneyParseError::NotANumber(_))
        ));
        assert!(matches!(
            "1e3".parse::<Money>(),
            Err(MoneyParseError::NotANumber(_))
        ));
        assert!(matches!(
            ".".parse::<Money>(),
            Err(MoneyParseError::NotANumber(_))
        ));
        assert_eq!(
            "99999999999999999999".parse::<Money>(),
            Err(MoneyParseError::Overflow)
        );
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_dollars(100).to_string(), "$100");
        assert_eq!(Money::from_cents(1250).to_string(), "$12.50");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::ZERO.to_string(), "$0");
    }

    #[test]
    fn test_money_arithmetic() {
        let ten = Money::from_dollars(10);
        assert_eq!(ten + ten, Money::from_dollars(20));
        assert_eq!(ten.checked_sub(Money::from_dollars(11)), None);
        assert_eq!(ten.saturating_mul(3), Money::from_dollars(30));
        assert_eq!(Money::from_cents(u64::MAX) + ten, Money::from_cents(u64::MAX));
        let total: Money = [ten, ten, ten].into_iter().sum();
        assert_eq!(total, Money::from_dollars(30));
    }

    #[test]
    fn test_lines_range() {
        for n in 1..=3 {
            assert_eq!(Lines::new(n).map(Lines::get), Ok(n));
        }
        assert_eq!(Lines::new(0), Err(LinesError::OutOfRange(0)));
        assert_eq!(Lines::new(4), Err(LinesError::OutOfRange(4)));
        assert_eq!("-2".parse::<Lines>(), Err(LinesError::OutOfRange(-2)));
        assert!(matches!(
            "2.5".parse::<Lines>(),
            Err(LinesError::NotAnInteger(_))
        ));
        assert_eq!(" 2\n".parse::<Lines>().map(Lines::get), Ok(2));
    }

    #[test]
    fn test_bet_total() {
        let bet = Bet::new(Lines::new(2).unwrap(), Money::from_dollars(10));
        assert_eq!(bet.total(), Money::from_dollars(20));
        assert_eq!(bet.to_string(), "$10 on 2 lines ($20 total)");
    }

    #[test]
    fn test_rows_display() {
        let rows = Rows([
            [Symbol::A, Symbol::B, Symbol::C],
            [Symbol::D, Symbol::D, Symbol::D],
            [Symbol::C, Symbol::B, Symbol::A],
        ]);
        assert_eq!(rows.to_string(), "A | B | C\nD | D | D\nC | B | A");
    }
}
