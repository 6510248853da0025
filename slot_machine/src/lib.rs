//! # Slot Machine
//!
//! A 3x3 slot machine engine built around a type-safe finite state machine.
//!
//! Each spin draws three reels from a weighted symbol pool without
//! replacement, transposes them into bet lines and pays any line whose
//! symbols all match. The session that owns the player's balance moves
//! through four phases:
//!
//! - **AwaitingDeposit**: waiting for the player's cash
//! - **RoundPlaying**: taking a bet, spinning and paying out
//! - **RoundSettled**: waiting for the player to go again or quit
//! - **Ended**: out of money or cashed out
//!
//! Money is kept in whole cents so balances are exact.
//!
//! ## Example
//!
//! ```
//! use slot_machine::{Bet, Lines, Money, RandomReels, SessionStateManagement, SlotSession};
//!
//! let mut session = SlotSession::new(RandomReels::seeded(7));
//! session.deposit(Money::from_dollars(100)).unwrap();
//! let mut session = session.step();
//!
//! session
//!     .place_bet(Bet::new(Lines::new(2).unwrap(), Money::from_dollars(10)))
//!     .unwrap();
//! let session = session.step();
//! assert_eq!(session.summary().wagered, Money::from_dollars(20));
//! ```

/// Reels, payouts and the session state machine.
pub mod game;
pub use game::{
    EndReason, RandomReels, ReelSource, SessionError, SessionEvent, SessionStateManagement,
    SlotSession,
    constants::{self, COLS, MAX_LINES, ROWS},
    entities::{
        self, Bet, LineWin, Lines, LinesError, Money, MoneyParseError, Reels, Replay,
        RoundOutcome, Rows, SessionSummary, Symbol,
    },
    functional,
};
