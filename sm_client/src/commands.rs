use slot_machine::{Lines, LinesError, Money, MoneyParseError, Replay};
use std::fmt;

/// Errors that can occur while parsing player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Deposit is not a valid amount.
    InvalidDeposit(MoneyParseError),
    /// Deposit of nothing.
    ZeroDeposit,
    /// Number of lines is not a whole number in range.
    InvalidLines(LinesError),
    /// Bet per line is not a valid amount.
    InvalidBet(MoneyParseError),
    /// Bet of nothing.
    ZeroBet,
    /// Bet across all lines costs more than the balance.
    BetExceedsBalance {
        lines: Lines,
        total: Money,
        balance: Money,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDeposit(e) => write!(f, "Invalid deposit amount ({e}), try again"),
            Self::ZeroDeposit => write!(f, "Deposit must be more than $0, try again"),
            Self::InvalidLines(e) => write!(f, "Invalid lines amount ({e}), try again"),
            Self::InvalidBet(e) => write!(f, "Invalid bet ({e}), try again"),
            Self::ZeroBet => write!(f, "Bet must be more than $0, try again"),
            Self::BetExceedsBalance {
                lines,
                total,
                balance,
            } => write!(
                f,
                "Invalid bet ({total} across {lines} lines is more than your {balance}), try again"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a deposit amount.
///
/// # Examples
///
/// ```
/// use sm_client::commands::{ParseError, parse_deposit};
/// use slot_machine::Money;
///
/// assert_eq!(parse_deposit("100"), Ok(Money::from_dollars(100)));
/// assert_eq!(parse_deposit("0"), Err(ParseError::ZeroDeposit));
/// assert!(parse_deposit("lots").is_err());
/// ```
pub fn parse_deposit(input: &str) -> Result<Money, ParseError> {
    let amount: Money = input.parse().map_err(ParseError::InvalidDeposit)?;
    if amount.is_zero() {
        return Err(ParseError::ZeroDeposit);
    }
    Ok(amount)
}

/// Parse the number of lines to bet on (1 to 3).
pub fn parse_lines(input: &str) -> Result<Lines, ParseError> {
    input.parse().map_err(ParseError::InvalidLines)
}

/// Parse a bet per line. The bet across every chosen line has to fit in
/// the current balance.
pub fn parse_bet(input: &str, lines: Lines, balance: Money) -> Result<Money, ParseError> {
    let per_line: Money = input.parse().map_err(ParseError::InvalidBet)?;
    if per_line.is_zero() {
        return Err(ParseError::ZeroBet);
    }
    let total = per_line.saturating_mul(u64::from(lines.get()));
    if total > balance {
        return Err(ParseError::BetExceedsBalance {
            lines,
            total,
            balance,
        });
    }
    Ok(per_line)
}

/// Only `n` or `N` ends the game; anything else plays on.
#[must_use]
pub fn parse_replay(input: &str) -> Replay {
    match input.trim() {
        "n" | "N" => Replay::Quit,
        _ => Replay::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: u8) -> Lines {
        Lines::new(n).unwrap()
    }

    #[test]
    fn test_parse_deposit_valid() {
        assert_eq!(parse_deposit("100"), Ok(Money::from_dollars(100)));
        assert_eq!(parse_deposit("  42.5\n"), Ok(Money::from_cents(4250)));
        assert_eq!(parse_deposit("0.01"), Ok(Money::from_cents(1)));
    }

    #[test]
    fn test_parse_deposit_invalid() {
        assert_eq!(parse_deposit("0"), Err(ParseError::ZeroDeposit));
        assert_eq!(parse_deposit("0.00"), Err(ParseError::ZeroDeposit));
        assert!(matches!(
            parse_deposit("-10"),
            Err(ParseError::InvalidDeposit(_))
        ));
        assert!(matches!(
            parse_deposit("ten"),
            Err(ParseError::InvalidDeposit(_))
        ));
        assert!(matches!(
            parse_deposit(""),
            Err(ParseError::InvalidDeposit(MoneyParseError::Empty))
        ));
    }

    #[test]
    fn test_parse_lines() {
        for n in 1..=3 {
            assert_eq!(parse_lines(&n.to_string()), Ok(lines(n)));
        }
        assert_eq!(
            parse_lines("0"),
            Err(ParseError::InvalidLines(LinesError::OutOfRange(0)))
        );
        assert_eq!(
            parse_lines("4"),
            Err(ParseError::InvalidLines(LinesError::OutOfRange(4)))
        );
        assert!(matches!(
            parse_lines("two"),
            Err(ParseError::InvalidLines(LinesError::NotAnInteger(_)))
        ));
        assert!(matches!(
            parse_lines("1.5"),
            Err(ParseError::InvalidLines(LinesError::NotAnInteger(_)))
        ));
    }

    #[test]
    fn test_parse_bet_within_balance() {
        let balance = Money::from_dollars(100);
        assert_eq!(
            parse_bet("10", lines(2), balance),
            Ok(Money::from_dollars(10))
        );
        assert_eq!(
            parse_bet("33.33", lines(3), balance),
            Ok(Money::from_cents(3333))
        );
        // Exactly the whole balance is allowed
        assert_eq!(
            parse_bet("50", lines(2), balance),
            Ok(Money::from_dollars(50))
        );
    }

    #[test]
    fn test_parse_bet_rejected() {
        let balance = Money::from_dollars(100);
        assert_eq!(
            parse_bet("40", lines(3), balance),
            Err(ParseError::BetExceedsBalance {
                lines: lines(3),
                total: Money::from_dollars(120),
                balance,
            })
        );
        assert_eq!(parse_bet("0", lines(1), balance), Err(ParseError::ZeroBet));
        assert!(matches!(
            parse_bet("abc", lines(1), balance),
            Err(ParseError::InvalidBet(_))
        ));
    }

    #[test]
    fn test_parse_replay() {
        assert_eq!(parse_replay("n"), Replay::Quit);
        assert_eq!(parse_replay("N\n"), Replay::Quit);
        assert_eq!(parse_replay("y"), Replay::Continue);
        assert_eq!(parse_replay(""), Replay::Continue);
        assert_eq!(parse_replay("no"), Replay::Continue);
    }

    #[test]
    fn test_error_messages() {
        let err = parse_bet("40", lines(3), Money::from_dollars(100)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid bet ($120 across 3 lines is more than your $100), try again"
        );
        assert_eq!(
            parse_lines("9").unwrap_err().to_string(),
            "Invalid lines amount (can bet on 1 to 3 lines, not 9), try again"
        );
    }
}
