//! Line-based terminal front end.
//!
//! Prompts for the deposit, lines, bet and replay answer, re-prompting until
//! each answer parses, and drives a [`SlotSession`] to completion. Input and
//! output are generic so the whole game can be scripted in tests.

use log::{debug, info};
use slot_machine::{
    Bet, EndReason, Lines, Money, Replay, RoundOutcome, SessionStateManagement, SessionSummary,
    SlotSession,
};
use std::{
    fmt,
    io::{self, BufRead, Write},
};
use thiserror::Error;

use crate::commands::{parse_bet, parse_deposit, parse_lines, parse_replay};

pub const DEPOSIT_PROMPT: &str = "Enter a deposit amount: ";
pub const LINES_PROMPT: &str = "Enter the number of lines to bet (1-3): ";
pub const BET_PROMPT: &str = "Enter the bet per line: ";
pub const REPLAY_PROMPT: &str = "Do you want to play again (y/n)? ";

/// Terminal I/O failed part way through a game. The session is handed
/// back so its summary can still be shown.
#[derive(Debug, Error)]
#[error("terminal I/O failed: {source}")]
pub struct Interrupted {
    pub session: Box<SlotSession>,
    pub source: io::Error,
}

impl Interrupted {
    /// Whether the player simply closed the input stream.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        self.source.kind() == io::ErrorKind::UnexpectedEof
    }
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print a prompt and read one line. A closed input stream is reported
    /// as [`io::ErrorKind::UnexpectedEof`].
    pub fn prompt(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(line)
    }

    /// Keep prompting until `parse` accepts the answer. Rejections are
    /// printed and never returned.
    pub fn prompt_until<T, E: fmt::Display>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> Result<T, E>,
    ) -> io::Result<T> {
        loop {
            let line = self.prompt(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!("rejected input {:?}: {e}", line.trim_end());
                    writeln!(self.output, "{e}")?;
                }
            }
        }
    }

    pub fn deposit(&mut self) -> io::Result<Money> {
        self.prompt_until(DEPOSIT_PROMPT, parse_deposit)
    }

    pub fn number_of_lines(&mut self) -> io::Result<Lines> {
        self.prompt_until(LINES_PROMPT, parse_lines)
    }

    pub fn bet(&mut self, lines: Lines, balance: Money) -> io::Result<Money> {
        self.prompt_until(BET_PROMPT, |input| parse_bet(input, lines, balance))
    }

    pub fn play_again(&mut self) -> io::Result<Replay> {
        self.prompt(REPLAY_PROMPT).map(|line| parse_replay(&line))
    }

    pub fn show_round(&mut self, outcome: &RoundOutcome) -> io::Result<()> {
        writeln!(self.output, "{}", outcome.rows)?;
        writeln!(self.output, "You won {}!", outcome.winnings)?;
        for win in &outcome.line_wins {
            writeln!(self.output, "  {win}")?;
        }
        Ok(())
    }

    pub fn show_summary(&mut self, summary: &SessionSummary) -> io::Result<()> {
        writeln!(self.output, "Thanks for playing: {summary}")
    }

    /// Play until the session ends.
    ///
    /// `deposit` skips the first deposit prompt when set.
    pub fn play(
        &mut self,
        session: SlotSession,
        deposit: Option<Money>,
    ) -> Result<SlotSession, Interrupted> {
        let mut session = session;
        let mut deposit = deposit;
        loop {
            if let Err(source) = self.act(&mut session, &mut deposit) {
                return Err(Interrupted {
                    session: Box::new(session),
                    source,
                });
            }

            let was_playing = matches!(session, SlotSession::RoundPlaying(_));
            session = session.step();
            for event in session.drain_events() {
                info!("{event}");
            }

            let played_round = was_playing && !matches!(session, SlotSession::RoundPlaying(_));
            if let Err(source) = self.report(&session, played_round) {
                return Err(Interrupted {
                    session: Box::new(session),
                    source,
                });
            }

            if session.is_ended() {
                return Ok(session);
            }
        }
    }

    /// Gather whatever the current phase is waiting on.
    fn act(&mut self, session: &mut SlotSession, deposit: &mut Option<Money>) -> io::Result<()> {
        let queued = match session {
            SlotSession::AwaitingDeposit(_) => {
                let amount = match deposit.take() {
                    Some(amount) => amount,
                    None => self.deposit()?,
                };
                session.deposit(amount)
            }
            SlotSession::RoundPlaying(_) => {
                writeln!(self.output, "You have a balance of {}", session.balance())?;
                let lines = self.number_of_lines()?;
                let per_line = self.bet(lines, session.balance())?;
                session.place_bet(Bet::new(lines, per_line))
            }
            SlotSession::RoundSettled(_) => {
                let replay = self.play_again()?;
                session.choose_replay(replay)
            }
            SlotSession::Ended(_) => Ok(()),
        };

        // The prompts validate everything the session checks, so this only
        // fires if the two disagree; the phase simply repeats.
        if let Err(e) = queued {
            writeln!(self.output, "{e}")?;
        }
        Ok(())
    }

    fn report(&mut self, session: &SlotSession, played_round: bool) -> io::Result<()> {
        if played_round {
            if let Some(outcome) = session.last_round() {
                self.show_round(outcome)?;
            }
        }
        match session.end_reason() {
            Some(EndReason::OutOfMoney) => writeln!(self.output, "You ran out of money!"),
            Some(EndReason::PlayerQuit) => {
                writeln!(self.output, "Cashing out {}", session.balance())
            }
            None => Ok(()),
        }
    }
}
