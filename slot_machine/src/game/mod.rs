//! Slot machine engine - reels, payouts and the session FSM.
//!
//! This module provides:
//! - The symbol paytable and machine dimensions
//! - Money, bet and grid entities
//! - Pure spin, transpose and payout functions
//! - The session state machine that owns the player's balance

pub mod constants;
pub mod entities;
pub mod functional;
pub mod reels;
pub mod state_machine;

pub use reels::{RandomReels, ReelSource};
pub use state_machine::{
    AwaitingDeposit, EndReason, Ended, RoundPlaying, RoundSettled, Session, SessionData,
    SessionError, SessionEvent, SessionStateManagement, SlotSession,
};
