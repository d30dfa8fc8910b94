// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Texas Hold'em table state machine.
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

use homegame_core::{
    GameError, Payoff,
    poker::{Card, Chips, Deck, HandValue},
};

use crate::player::Player;

/// The betting stage of a Texas Hold'em hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Stage {
    /// Betting on the hole cards.
    Preflop,
    /// Betting after the first three community cards.
    Flop,
    /// Betting after the fourth community card.
    Turn,
    /// Betting after the fifth community card.
    River,
    /// The hand is over and the pot has been awarded.
    Showdown,
}

/// A Texas Hold'em table.
///
/// The table tracks seats, the board, the pot, and whose turn it is; streets
/// advance automatically when every seat owed an action has acted. Seat 0 is
/// the human seat and never leaves the table.
#[derive(Debug)]
pub struct TexasGame {
    players: Vec<Player>,
    deck: Deck,
    rng: StdRng,
    board: Vec<Card>,
    pot: Chips,
    current_bet: Chips,
    current_player: usize,
    dealer: usize,
    stage: Stage,
    players_to_act: usize,
    last_raiser: Option<usize>,
}

impl TexasGame {
    /// The stack every seat starts the session with.
    pub const STARTING_CHIPS: Chips = Chips::new(1_000);

    /// The forced contribution collected from every seat at hand start.
    pub const ANTE: Chips = Chips::new(100);

    /// Creates a table with the given seat names, seat 0 is the human.
    pub fn new(names: &[&str]) -> Result<Self, GameError> {
        Self::with_rng(names, StdRng::from_os_rng())
    }

    /// Creates a table with caller provided randomness.
    pub fn with_rng(names: &[&str], mut rng: StdRng) -> Result<Self, GameError> {
        if names.len() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        let players = names
            .iter()
            .map(|name| Player::new(*name, Self::STARTING_CHIPS))
            .collect();

        Ok(Self {
            players,
            deck: Deck::new_and_shuffled(&mut rng),
            rng,
            board: Vec::new(),
            pot: Chips::ZERO,
            current_bet: Chips::ZERO,
            current_player: 0,
            dealer: 0,
            stage: Stage::Preflop,
            players_to_act: 0,
            last_raiser: None,
        })
    }

    /// Starts a new hand.
    ///
    /// Reshuffles the deck, clears the board and seat state, advances the
    /// dealer button, deals two hole cards per seat, and collects the forced
    /// ante from every seat into the pot. The first seat after the dealer
    /// acts first.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        self.deck.reset(&mut self.rng);
        self.board.clear();
        self.dealer = (self.dealer + 1) % self.players.len();
        self.stage = Stage::Preflop;

        for player in &mut self.players {
            player.start_hand();
        }

        for _ in 0..2 {
            for seat in 0..self.players.len() {
                let card = self.deck.deal()?;
                self.players[seat].hand.push(card);
            }
        }

        self.pot = Chips::ZERO;
        for player in &mut self.players {
            self.pot += player.pay(Self::ANTE);
        }

        self.current_bet = Chips::ZERO;
        self.last_raiser = None;
        self.current_player = (self.dealer + 1) % self.players.len();
        self.players_to_act = self.count_active();

        info!(
            "Hand started, dealer seat {}, pot {}",
            self.dealer, self.pot
        );

        Ok(())
    }

    /// A seat bets or raises to the given amount.
    ///
    /// The amount is clamped to the seat stack, a short stack goes all in.
    /// The bet reopens the action for every other active seat. Raise sizing
    /// is not validated, any positive amount is accepted.
    pub fn bet(&mut self, seat: usize, amount: Chips) -> Result<(), GameError> {
        self.checked_seat(seat)?;
        if amount == Chips::ZERO {
            return Err(GameError::InvalidAmount);
        }

        let paid = self.players[seat].pay(amount);
        self.pot += paid;
        self.current_bet = self.current_bet.max(self.players[seat].contribution);
        self.last_raiser = Some(seat);
        self.players_to_act = self.count_active().saturating_sub(1);
        self.advance_to_next_active();

        info!(
            "{} bets {paid}, street bet {}",
            self.players[seat].name, self.current_bet
        );

        Ok(())
    }

    /// A seat calls the outstanding bet, or checks when there is none.
    ///
    /// Returns the hand payoffs when this action closes the river.
    pub fn call(&mut self, seat: usize) -> Result<Option<Vec<Payoff>>, GameError> {
        self.checked_seat(seat)?;

        let owed = self.current_bet - self.players[seat].contribution;
        let paid = self.players[seat].pay(owed);
        self.pot += paid;
        self.players_to_act = self.players_to_act.saturating_sub(1);
        self.advance_to_next_active();

        self.end_street_if_complete()
    }

    /// A seat folds.
    ///
    /// When only one seat is left in the hand it is awarded the whole pot
    /// immediately without an evaluation, and the payoff is returned.
    pub fn fold(&mut self, seat: usize) -> Result<Option<Vec<Payoff>>, GameError> {
        self.checked_seat(seat)?;
        self.players[seat].folded = true;

        let contenders = self.players.iter().filter(|p| !p.folded).count();
        if contenders == 1 {
            self.stage = Stage::Showdown;

            let pot = std::mem::take(&mut self.pot);
            if let Some(winner) = self.players.iter_mut().find(|p| !p.folded) {
                winner.chips += pot;
                info!("{} wins {pot} uncontested", winner.name);
                return Ok(Some(vec![Payoff::uncontested(winner.name.clone(), pot)]));
            }

            return Ok(Some(Vec::new()));
        }

        self.players_to_act = self.players_to_act.saturating_sub(1);
        self.advance_to_next_active();

        self.end_street_if_complete()
    }

    /// Moves the turn to the next seat that can act.
    ///
    /// Scans clockwise skipping folded and broke seats, falling back to seat
    /// 0 when none is found so the table can never get stuck.
    pub fn advance_to_next_active(&mut self) {
        let seats = self.players.len();
        for step in 1..=seats {
            let seat = (self.current_player + step) % seats;
            if self.players[seat].is_active() {
                self.current_player = seat;
                return;
            }
        }

        self.current_player = 0;
    }

    /// Resolves the showdown among the seats still in the hand.
    ///
    /// Evaluates each hand with the board, splits the pot evenly among the
    /// top scorers with any odd chips going to the earliest tied seat, and
    /// removes broke scripted seats from the table. Returns one payoff per
    /// winner, empty if nobody contends.
    pub fn showdown(&mut self) -> Vec<Payoff> {
        self.stage = Stage::Showdown;

        let scored = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.folded)
            .map(|(seat, p)| {
                let mut cards = p.hand.clone();
                cards.extend_from_slice(&self.board);
                (seat, HandValue::eval(&cards))
            })
            .collect::<Vec<_>>();

        let Some(best) = scored.iter().map(|(_, value)| *value).max() else {
            return Vec::new();
        };

        let winners = scored
            .iter()
            .filter(|(_, value)| *value == best)
            .map(|(seat, _)| *seat)
            .collect::<Vec<_>>();

        let share = self.pot / winners.len() as u32;
        let remainder = self.pot % winners.len() as u32;
        self.pot = Chips::ZERO;

        let mut payoffs = Vec::with_capacity(winners.len());
        for (pos, &seat) in winners.iter().enumerate() {
            let chips = if pos == 0 { share + remainder } else { share };
            let player = &mut self.players[seat];
            player.chips += chips;

            info!("{} wins {chips} with {}", player.name, best.name());

            payoffs.push(Payoff {
                name: player.name.clone(),
                chips,
                hand: Some(best.name()),
                multiplier: None,
            });
        }

        // Broke scripted seats leave the table, the human seat stays.
        let mut seat = 0;
        self.players.retain(|p| {
            let keep = seat == 0 || p.chips > Chips::ZERO;
            seat += 1;
            keep
        });

        if self.current_player >= self.players.len() {
            self.current_player = 0;
        }
        if self.dealer >= self.players.len() {
            self.dealer = 0;
        }

        payoffs
    }

    /// The seats at the table.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The community cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The chips committed to the hand and not yet awarded.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The contribution required to stay in the current street.
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    /// The hand stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The seat whose turn it is.
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    /// The seat with the dealer button.
    pub fn dealer(&self) -> usize {
        self.dealer
    }

    /// Seats still owed an action this street.
    pub fn players_to_act(&self) -> usize {
        self.players_to_act
    }

    /// The last seat that bet or raised this street.
    pub fn last_raiser(&self) -> Option<usize> {
        self.last_raiser
    }

    /// Validates a betting action for a seat without mutating state.
    fn checked_seat(&self, seat: usize) -> Result<(), GameError> {
        if seat >= self.players.len() {
            Err(GameError::InvalidSeat(seat))
        } else if self.stage == Stage::Showdown {
            Err(GameError::HandOver)
        } else if self.players[seat].folded {
            Err(GameError::SeatFolded(seat))
        } else {
            Ok(())
        }
    }

    fn count_active(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Advances the street once every seat owed an action has acted.
    ///
    /// Preflop to flop deals three cards, the next two streets one each, and
    /// river completion resolves the showdown immediately.
    fn end_street_if_complete(&mut self) -> Result<Option<Vec<Payoff>>, GameError> {
        if self.players_to_act > 0 {
            return Ok(None);
        }

        let payoffs = match self.stage {
            Stage::Preflop => {
                self.deal_board(3)?;
                self.stage = Stage::Flop;
                None
            }
            Stage::Flop => {
                self.deal_board(1)?;
                self.stage = Stage::Turn;
                None
            }
            Stage::Turn => {
                self.deal_board(1)?;
                self.stage = Stage::River;
                None
            }
            Stage::River => Some(self.showdown()),
            Stage::Showdown => None,
        };

        if self.stage != Stage::Showdown {
            for player in &mut self.players {
                player.contribution = Chips::ZERO;
            }
            self.current_bet = Chips::ZERO;
            self.last_raiser = None;
            self.current_player = (self.dealer + 1) % self.players.len();
            self.players_to_act = self.count_active();

            info!(
                "Street complete, stage {:?}, board {} cards",
                self.stage,
                self.board.len()
            );
        }

        Ok(payoffs)
    }

    fn deal_board(&mut self, count: usize) -> Result<(), GameError> {
        let cards = self.deck.deal_many(count)?;
        self.board.extend(cards);
        Ok(())
    }
}
