// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Homegame Poker bot.
//!
//! The scripted seats of a session pick their actions through a [Strategy],
//! a pure decision function from what the seat can see to a [Decision]. The
//! default [Heuristic] reproduces the house bots, a deliberately simple
//! policy meant to be replaced by stronger implementations without touching
//! the table state machine.
//!
//! [run_bot_turns] drives a Texas table until control returns to the human
//! seat or the hand resolves.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use log::info;

use homegame_core::{
    GameError, Payoff,
    poker::{Card, Chips, Rank},
};
use homegame_table::{Stage, TexasGame};

/// A Poker bot strategy.
pub trait Strategy {
    /// Picks an action given what the seat can see: its hole cards, the
    /// board, the outstanding bet, and its own stack.
    fn decide(
        &mut self,
        hand: &[Card],
        board: &[Card],
        current_bet: Chips,
        chips: Chips,
    ) -> Decision;
}

/// A bot decision applied to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Give up the hand.
    Fold,
    /// Match the outstanding bet, a check when there is none.
    Call,
    /// Bet or raise to the given amount.
    Raise(Chips),
}

/// The default house bot.
///
/// Scores the hole cards with [hand_score] and plays fixed thresholds: opens
/// for 50 chips on a strong hand, folds weak hands to a bet, calls medium
/// ones, and raises strong ones by 15% of its stack with a minimum raise of
/// 10 over the outstanding bet.
#[derive(Debug, Default, Clone)]
pub struct Heuristic;

impl Strategy for Heuristic {
    fn decide(
        &mut self,
        hand: &[Card],
        _board: &[Card],
        current_bet: Chips,
        chips: Chips,
    ) -> Decision {
        let score = hand_score(hand);

        if current_bet == Chips::ZERO {
            if score > 0.6 && chips > Chips::new(10) {
                return Decision::Raise(Chips::new(50).min(chips));
            }
            return Decision::Call;
        }

        if score < 0.25 {
            return Decision::Fold;
        }
        if score < 0.6 {
            return Decision::Call;
        }

        let raise = Chips::new(chips.amount() * 15 / 100);
        Decision::Raise((current_bet + raise).max(current_bet + Chips::new(10)))
    }
}

/// A hole cards strength score in `[0, 1]`.
///
/// A cheap heuristic, not an equity calculation: a pair scores 0.9, a jack
/// or better 0.6, anything else 0.35. Incomplete hands score 0.1 so a seat
/// without cards folds to any bet.
pub fn hand_score(hand: &[Card]) -> f64 {
    match hand {
        [first, second, ..] => {
            if first.rank() == second.rank() {
                0.9
            } else if first.rank() >= Rank::Jack || second.rank() >= Rank::Jack {
                0.6
            } else {
                0.35
            }
        }
        _ => 0.1,
    }
}

/// The iteration cap guarding the bot loop against a turn advancement bug.
const MAX_BOT_TURNS: usize = 100;

/// Drives the scripted seats until it is the human turn or the hand is over.
///
/// Every iteration asks the strategy for the current seat decision and
/// applies it, skipping folded and broke seats. Returns the hand payoffs
/// when an action resolves the hand mid loop, `None` when the loop stopped
/// at the human seat or hit the iteration cap. The cap is a safety net, a
/// correct table never needs it.
pub fn run_bot_turns<S: Strategy>(
    game: &mut TexasGame,
    strategy: &mut S,
    human_seat: Option<usize>,
) -> Result<Option<Vec<Payoff>>, GameError> {
    for _ in 0..MAX_BOT_TURNS {
        if game.stage() == Stage::Showdown || Some(game.current_player()) == human_seat {
            break;
        }
        if game.players().iter().all(|p| p.chips == Chips::ZERO) {
            break;
        }

        let seat = game.current_player();
        let player = &game.players()[seat];
        if player.folded || player.chips == Chips::ZERO {
            game.advance_to_next_active();
            continue;
        }

        let hand = player.hand.clone();
        let name = player.name.clone();
        let chips = player.chips;
        let decision = strategy.decide(&hand, game.board(), game.current_bet(), chips);

        let payoffs = match decision {
            Decision::Fold => {
                info!("{name} folds");
                game.fold(seat)?
            }
            Decision::Call => {
                info!("{name} calls");
                game.call(seat)?
            }
            Decision::Raise(amount) => {
                // A zero raise falls back to the default open.
                let amount = if amount == Chips::ZERO {
                    Chips::new(50)
                } else {
                    amount
                };
                info!("{name} raises to {amount}");
                game.bet(seat, amount)?;
                None
            }
        };

        if payoffs.is_some() {
            return Ok(payoffs);
        }
    }

    Ok(None)
}
