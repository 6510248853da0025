//! Slot session state machine.
//!
//! A session moves through four phases:
//!
//! - **AwaitingDeposit**: waiting for the player's cash
//! - **RoundPlaying**: waiting for a bet, then spinning and paying out
//! - **RoundSettled**: waiting for the player to choose whether to go again
//! - **Ended**: out of money or cashed out
//!
//! Player actions only queue intent on the session data. [`SlotSession::step`]
//! consumes that intent and moves to the next phase, so an action in the
//! wrong phase is rejected without losing any state.

use enum_dispatch::enum_dispatch;
use log::{error, info};
use std::{collections::VecDeque, fmt};
use thiserror::Error;

use super::{
    entities::{Bet, LineWin, Money, Replay, RoundOutcome, SessionSummary},
    functional::{get_winnings, line_wins, transpose},
    reels::ReelSource,
};

/// Errors from acting on a session.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum SessionError {
    #[error("can't {action} while {phase}")]
    InvalidAction {
        action: &'static str,
        phase: &'static str,
    },
    #[error("deposit must be more than $0")]
    ZeroDeposit,
    #[error("bet must be more than $0 per line")]
    ZeroBet,
    #[error("bet of {required} exceeds balance of {available}")]
    InsufficientFunds { available: Money, required: Money },
}

/// Why a session ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EndReason {
    OutOfMoney,
    PlayerQuit,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::OutOfMoney => "ran out of money",
            Self::PlayerQuit => "player quit",
        };
        write!(f, "{repr}")
    }
}

/// Things that happened as the session stepped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionEvent {
    Deposited(Money),
    BetPlaced(Bet),
    LineWon(LineWin),
    RoundSettled { winnings: Money, balance: Money },
    RanOutOfMoney,
    CashedOut(Money),
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Deposited(amount) => format!("deposited {amount}"),
            Self::BetPlaced(bet) => format!("bet {bet}"),
            Self::LineWon(win) => format!("won on {win}"),
            Self::RoundSettled { winnings, balance } => {
                format!("round paid {winnings}, balance now {balance}")
            }
            Self::RanOutOfMoney => "ran out of money".to_string(),
            Self::CashedOut(amount) => format!("cashed out {amount}"),
        };
        write!(f, "{repr}")
    }
}

/// Waiting for the opening deposit.
#[derive(Debug)]
pub struct AwaitingDeposit;

/// Waiting for a bet; stepping with one queued plays the round.
#[derive(Debug)]
pub struct RoundPlaying;

/// Round paid out; waiting for a replay choice.
#[derive(Debug)]
pub struct RoundSettled;

/// Terminal phase.
#[derive(Debug)]
pub struct Ended {
    pub reason: EndReason,
}

/// Mutable session data shared across all phases.
#[derive(Debug)]
pub struct SessionData {
    reels: Box<dyn ReelSource>,
    balance: Money,
    summary: SessionSummary,
    pending_deposit: Option<Money>,
    pending_bet: Option<Bet>,
    pending_replay: Option<Replay>,
    last_round: Option<RoundOutcome>,
    events: VecDeque<SessionEvent>,
}

impl SessionData {
    #[must_use]
    pub fn new(reels: Box<dyn ReelSource>) -> Self {
        Self {
            reels,
            balance: Money::ZERO,
            summary: SessionSummary::default(),
            pending_deposit: None,
            pending_bet: None,
            pending_replay: None,
            last_round: None,
            events: VecDeque::new(),
        }
    }
}

/// Read access that works the same in every phase.
#[enum_dispatch]
pub trait SessionStateManagement {
    fn balance(&self) -> Money;

    fn drain_events(&mut self) -> VecDeque<SessionEvent>;

    /// Outcome of the most recently settled round, if any.
    fn last_round(&self) -> Option<&RoundOutcome>;

    #[must_use]
    fn summary(&self) -> SessionSummary;
}

/// Session data paired with the phase it is in.
#[derive(Debug)]
pub struct Session<T> {
    pub data: SessionData,
    pub state: T,
}

impl<T> Session<T> {
    fn into_state<U>(self, state: U) -> Session<U> {
        Session {
            data: self.data,
            state,
        }
    }
}

impl<T> SessionStateManagement for Session<T> {
    fn balance(&self) -> Money {
        self.data.balance
    }

    fn drain_events(&mut self) -> VecDeque<SessionEvent> {
        std::mem::take(&mut self.data.events)
    }

    fn last_round(&self) -> Option<&RoundOutcome> {
        self.data.last_round.as_ref()
    }

    fn summary(&self) -> SessionSummary {
        SessionSummary {
            balance: self.data.balance,
            ..self.data.summary
        }
    }
}

impl Session<AwaitingDeposit> {
    fn apply_deposit(mut self, amount: Money) -> Session<RoundPlaying> {
        self.data.balance += amount;
        self.data.summary.deposited += amount;
        self.data.events.push_back(SessionEvent::Deposited(amount));
        info!("deposit of {amount} accepted");
        self.into_state(RoundPlaying)
    }
}

impl Session<RoundPlaying> {
    /// Take the bet, spin, and pay out.
    fn play_round(mut self, bet: Bet) -> SlotSession {
        let cost = bet.total();
        let Some(balance) = self.data.balance.checked_sub(cost) else {
            // `place_bet` checked affordability and nothing else touches
            // the balance before the step.
            error!("bet of {cost} no longer affordable with {}", self.data.balance);
            return self.into();
        };
        self.data.balance = balance;
        self.data.summary.wagered += cost;
        self.data.summary.rounds += 1;
        self.data.events.push_back(SessionEvent::BetPlaced(bet));

        let rows = transpose(&self.data.reels.spin());
        let wins = line_wins(&rows, bet.lines, bet.per_line);
        let winnings = get_winnings(&rows, &bet);
        self.data.balance += winnings;
        self.data.summary.won += winnings;
        self.data
            .events
            .extend(wins.iter().copied().map(SessionEvent::LineWon));
        self.data.events.push_back(SessionEvent::RoundSettled {
            winnings,
            balance: self.data.balance,
        });
        self.data.last_round = Some(RoundOutcome {
            bet,
            rows,
            line_wins: wins,
            winnings,
            balance: self.data.balance,
        });

        if self.data.balance.is_zero() {
            self.data.events.push_back(SessionEvent::RanOutOfMoney);
            info!("session ended: {}", EndReason::OutOfMoney);
            self.into_state(Ended {
                reason: EndReason::OutOfMoney,
            })
            .into()
        } else {
            self.into_state(RoundSettled).into()
        }
    }
}

impl Session<RoundSettled> {
    fn apply_replay(self, replay: Replay) -> SlotSession {
        match replay {
            Replay::Continue => self.into_state(RoundPlaying).into(),
            Replay::Quit => {
                let mut ended = self.into_state(Ended {
                    reason: EndReason::PlayerQuit,
                });
                let balance = ended.data.balance;
                ended.data.events.push_back(SessionEvent::CashedOut(balance));
                info!("session ended: {}", EndReason::PlayerQuit);
                ended.into()
            }
        }
    }
}

/// A slot session in whichever phase it is currently in.
#[enum_dispatch(SessionStateManagement)]
#[derive(Debug)]
pub enum SlotSession {
    AwaitingDeposit(Session<AwaitingDeposit>),
    RoundPlaying(Session<RoundPlaying>),
    RoundSettled(Session<RoundSettled>),
    Ended(Session<Ended>),
}

impl SlotSession {
    /// A fresh session waiting for its deposit.
    #[must_use]
    pub fn new(reels: impl ReelSource + 'static) -> Self {
        Session {
            data: SessionData::new(Box::new(reels)),
            state: AwaitingDeposit,
        }
        .into()
    }

    fn data_mut(&mut self) -> &mut SessionData {
        match self {
            Self::AwaitingDeposit(s) => &mut s.data,
            Self::RoundPlaying(s) => &mut s.data,
            Self::RoundSettled(s) => &mut s.data,
            Self::Ended(s) => &mut s.data,
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidAction {
            action,
            phase: self.phase(),
        }
    }

    /// Human-readable name of the current phase.
    #[must_use]
    pub fn phase(&self) -> &'static str {
        match self {
            Self::AwaitingDeposit(_) => "awaiting a deposit",
            Self::RoundPlaying(_) => "playing a round",
            Self::RoundSettled(_) => "waiting to play again",
            Self::Ended(_) => "ended",
        }
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        match self {
            Self::Ended(s) => Some(s.state.reason),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        matches!(self, Self::Ended(_))
    }

    /// Queue the opening deposit.
    pub fn deposit(&mut self, amount: Money) -> Result<(), SessionError> {
        if !matches!(self, Self::AwaitingDeposit(_)) {
            return Err(self.invalid("deposit"));
        }
        if amount.is_zero() {
            return Err(SessionError::ZeroDeposit);
        }
        self.data_mut().pending_deposit = Some(amount);
        Ok(())
    }

    /// Queue a bet for the next spin. The whole bet must be covered by the
    /// balance.
    pub fn place_bet(&mut self, bet: Bet) -> Result<(), SessionError> {
        if !matches!(self, Self::RoundPlaying(_)) {
            return Err(self.invalid("bet"));
        }
        if bet.per_line.is_zero() {
            return Err(SessionError::ZeroBet);
        }
        let available = self.balance();
        let required = bet.total();
        if required > available {
            return Err(SessionError::InsufficientFunds {
                available,
                required,
            });
        }
        self.data_mut().pending_bet = Some(bet);
        Ok(())
    }

    /// Queue the answer to "play again?".
    pub fn choose_replay(&mut self, replay: Replay) -> Result<(), SessionError> {
        if !matches!(self, Self::RoundSettled(_)) {
            return Err(self.invalid("choose to play again"));
        }
        self.data_mut().pending_replay = Some(replay);
        Ok(())
    }

    /// Advance to the next phase if the current one has what it needs.
    /// Otherwise the session comes back unchanged.
    #[must_use]
    pub fn step(self) -> Self {
        match self {
            Self::AwaitingDeposit(mut s) => match s.data.pending_deposit.take() {
                Some(amount) => s.apply_deposit(amount).into(),
                None => s.into(),
            },
            Self::RoundPlaying(mut s) => match s.data.pending_bet.take() {
                Some(bet) => s.play_round(bet),
                None => s.into(),
            },
            Self::RoundSettled(mut s) => match s.data.pending_replay.take() {
                Some(replay) => s.apply_replay(replay),
                None => s.into(),
            },
            Self::Ended(s) => s.into(),
        }
    }
}

impl fmt::Display for SlotSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.phase())
    }
}
