//! Integration tests for the sm_client terminal game loop.
//!
//! Feeds scripted player input and reels through the full game and checks
//! what the player would see.

use slot_machine::{
    EndReason, Money, RandomReels, ReelSource, Reels, SessionStateManagement, SlotSession, Symbol,
};
use sm_client::terminal::{BET_PROMPT, LINES_PROMPT, REPLAY_PROMPT, Terminal};
use std::{collections::VecDeque, io::Cursor};

/// Plays back grids in order, then keeps repeating the last one
#[derive(Debug)]
struct ScriptedReels(VecDeque<Reels>);

impl ReelSource for ScriptedReels {
    fn spin(&mut self) -> Reels {
        if self.0.len() > 1 {
            self.0.pop_front().unwrap()
        } else {
            self.0[0]
        }
    }
}

fn no_win() -> Reels {
    use Symbol::*;
    Reels([[A, B, C], [B, C, D], [C, D, A]])
}

fn middle_line_d() -> Reels {
    use Symbol::*;
    Reels([[A, D, C], [B, D, A], [C, D, B]])
}

fn scripted(grids: Vec<Reels>) -> SlotSession {
    SlotSession::new(ScriptedReels(grids.into()))
}

/// Run a whole game and return the final session and everything printed
fn run(session: SlotSession, deposit: Option<Money>, input: &str) -> (SlotSession, String) {
    let mut terminal = Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let session = terminal.play(session, deposit).expect("game should finish");
    let (_, out) = terminal.into_inner();
    (session, String::from_utf8(out).unwrap())
}

#[test]
fn test_quit_after_one_losing_round() {
    let (session, out) = run(scripted(vec![no_win()]), None, "100\n2\n10\nn\n");

    assert_eq!(session.end_reason(), Some(EndReason::PlayerQuit));
    assert_eq!(session.balance(), Money::from_dollars(80));
    assert!(out.contains("You have a balance of $100"));
    assert!(out.contains("A | B | C\nB | C | D\nC | D | A"));
    assert!(out.contains("You won $0!"));
    assert!(out.contains("Cashing out $80"));
}

#[test]
fn test_winning_middle_line_reported() {
    let (session, out) = run(scripted(vec![middle_line_d()]), None, "50\n2\n5\nN\n");

    // 50 - 10 + 5 * 2
    assert_eq!(session.balance(), Money::from_dollars(50));
    assert!(out.contains("You won $10!"));
    assert!(out.contains("line 2: D x2 pays $10"));
}

#[test]
fn test_running_out_of_money_skips_replay_prompt() {
    let (session, out) = run(scripted(vec![no_win()]), None, "30\n3\n10\n");

    assert_eq!(session.end_reason(), Some(EndReason::OutOfMoney));
    assert!(out.contains("You ran out of money!"));
    assert!(!out.contains(REPLAY_PROMPT));
}

#[test]
fn test_any_answer_but_n_plays_on() {
    let input = "100\n1\n10\ny\n1\n10\nmaybe\n1\n10\nn\n";
    let (session, out) = run(scripted(vec![no_win()]), None, input);

    assert_eq!(session.summary().rounds, 3);
    assert_eq!(session.balance(), Money::from_dollars(70));
    assert_eq!(out.matches(REPLAY_PROMPT).count(), 3);
}

#[test]
fn test_invalid_answers_reprompt_mid_game() {
    let input = "100\n5\nx\n2\n60\n-1\n10\nn\n";
    let (session, out) = run(scripted(vec![no_win()]), None, input);

    assert_eq!(session.balance(), Money::from_dollars(80));
    assert_eq!(out.matches(LINES_PROMPT).count(), 3);
    assert_eq!(out.matches(BET_PROMPT).count(), 3);
    assert!(out.contains("Invalid bet ($120 across 2 lines is more than your $100), try again"));
}

#[test]
fn test_preset_deposit_skips_prompt() {
    let (session, out) = run(
        scripted(vec![no_win()]),
        Some(Money::from_dollars(20)),
        "1\n5\nn\n",
    );

    assert_eq!(session.balance(), Money::from_dollars(15));
    assert!(!out.contains("Enter a deposit amount"));
}

#[test]
fn test_random_sessions_keep_books_balanced() {
    let seed: u64 = rand::random();
    let session = SlotSession::new(RandomReels::seeded(seed));

    // Bet a dollar on every line each round; input runs dry eventually
    let input = format!("10\n{}", "3\n1\ny\n".repeat(200));
    let mut terminal = Terminal::new(Cursor::new(input.into_bytes()), Vec::new());

    let session = match terminal.play(session, None) {
        Ok(session) => session,
        Err(interrupted) => {
            assert!(interrupted.is_end_of_input(), "seed {seed}");
            *interrupted.session
        }
    };

    let summary = session.summary();
    assert_eq!(
        summary.deposited.cents() + summary.won.cents(),
        summary.wagered.cents() + summary.balance.cents(),
        "seed {seed}"
    );
}
