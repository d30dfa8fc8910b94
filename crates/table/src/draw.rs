// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Five-Card Draw table state machine.
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

use homegame_core::{
    GameError, Payoff,
    poker::{Chips, Deck, HandRank, HandValue},
};

use crate::player::Player;

/// The stage of a Five-Card Draw hand.
///
/// Hands are dealt lazily, a fresh round stays [DrawStage::Undealt] until the
/// first bet triggers the deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DrawStage {
    /// No cards dealt yet, waiting for the opening bet.
    Undealt,
    /// Hands dealt, every seat may exchange cards once.
    Dealt,
    /// Some seats have exchanged cards, others are still to draw.
    PartialDraw,
    /// Every seat has drawn, the hand is ready to score.
    Showdown,
}

/// The payout multiplier for a hand category.
///
/// The winner is paid its contribution times this multiplier, capped by the
/// pot. The cap is the house edge that sets the draw variant apart from the
/// Texas table full pot award.
pub fn payout_multiplier(rank: HandRank) -> f64 {
    match rank {
        HandRank::StraightFlush => 12.0,
        HandRank::FourOfAKind => 8.0,
        HandRank::FullHouse => 6.0,
        HandRank::Flush => 5.0,
        HandRank::Straight => 4.0,
        HandRank::ThreeOfAKind => 3.0,
        HandRank::TwoPair => 2.0,
        HandRank::OnePair => 1.5,
        HandRank::HighCard => 1.0,
    }
}

/// A Five-Card Draw table.
///
/// Every third round the table requires a deposit before play continues. The
/// engine only tracks the flag, collecting the payment is up to the caller.
#[derive(Debug)]
pub struct DrawGame {
    players: Vec<Player>,
    deck: Deck,
    rng: StdRng,
    pot: Chips,
    stage: DrawStage,
    ante: Chips,
    round_count: u32,
    deposit_required: bool,
    required_deposit: Chips,
}

impl DrawGame {
    /// The stack every seat starts the session with.
    pub const STARTING_CHIPS: Chips = Chips::new(1_000);

    /// The default opening stake.
    pub const DEFAULT_ANTE: Chips = Chips::new(50);

    /// The default deposit requested every third round.
    pub const DEFAULT_REQUIRED_DEPOSIT: Chips = Chips::new(500);

    /// Creates a table with the given seat names and default stakes.
    pub fn new(names: &[&str]) -> Result<Self, GameError> {
        Self::with_stakes(names, Self::DEFAULT_ANTE, Self::DEFAULT_REQUIRED_DEPOSIT)
    }

    /// Creates a table with the given stakes.
    pub fn with_stakes(
        names: &[&str],
        ante: Chips,
        required_deposit: Chips,
    ) -> Result<Self, GameError> {
        Self::with_rng(names, ante, required_deposit, StdRng::from_os_rng())
    }

    /// Creates a table with caller provided randomness.
    pub fn with_rng(
        names: &[&str],
        ante: Chips,
        required_deposit: Chips,
        mut rng: StdRng,
    ) -> Result<Self, GameError> {
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
            pot: Chips::ZERO,
            stage: DrawStage::Undealt,
            ante,
            round_count: 0,
            deposit_required: false,
            required_deposit,
        })
    }

    /// Resets the table for a new round.
    ///
    /// Clears hands, flags, and the pot, and reshuffles the deck. Cards are
    /// not dealt here, the deal happens inside the first [bet](Self::bet).
    /// When `increment` is set the round counter advances and every third
    /// round raises the deposit requirement.
    pub fn reset_round(&mut self, increment: bool) {
        self.deck.reset(&mut self.rng);
        for player in &mut self.players {
            player.start_hand();
        }
        self.pot = Chips::ZERO;
        self.stage = DrawStage::Undealt;

        if increment {
            self.round_count += 1;
            self.deposit_required = self.round_count % 3 == 0;
        }

        info!(
            "Round {} reset, deposit required {}",
            self.round_count, self.deposit_required
        );
    }

    /// A seat places a bet.
    ///
    /// The amount is clamped to the seat stack. The first bet of an undealt
    /// round deals five cards to every seat exactly once.
    pub fn bet(&mut self, seat: usize, amount: Chips) -> Result<(), GameError> {
        self.checked_seat(seat)?;
        if amount == Chips::ZERO {
            return Err(GameError::InvalidAmount);
        }

        let paid = self.players[seat].pay(amount);
        self.pot += paid;
        self.players[seat].has_bet = true;

        info!("{} bets {paid}, pot {}", self.players[seat].name, self.pot);

        if self.stage == DrawStage::Undealt {
            self.initial_deal()?;
            self.stage = DrawStage::Dealt;
        }

        Ok(())
    }

    /// A seat folds.
    pub fn fold(&mut self, seat: usize) -> Result<(), GameError> {
        self.checked_seat(seat)?;
        self.players[seat].folded = true;
        Ok(())
    }

    /// A seat exchanges the cards at the given hand positions.
    ///
    /// Positions are processed highest first so earlier removals cannot
    /// shift the later ones, replacements are appended to the hand. Each
    /// seat draws at most once per hand, standing pat is an empty discard
    /// list. When every seat still in the hand has drawn the stage moves to
    /// [DrawStage::Showdown].
    pub fn draw_cards(&mut self, seat: usize, discards: &[usize]) -> Result<(), GameError> {
        if seat >= self.players.len() {
            return Err(GameError::InvalidSeat(seat));
        }

        match self.stage {
            DrawStage::Dealt | DrawStage::PartialDraw => {}
            DrawStage::Undealt => return Err(GameError::IllegalStage),
            DrawStage::Showdown => return Err(GameError::HandOver),
        }

        if self.players[seat].folded {
            return Err(GameError::SeatFolded(seat));
        }
        if self.players[seat].has_drawn {
            return Err(GameError::AlreadyDrawn(seat));
        }

        let mut discards = discards.to_vec();
        discards.sort_unstable_by(|a, b| b.cmp(a));
        discards.dedup();

        let mut drawn = 0;
        for index in discards {
            if index < self.players[seat].hand.len() {
                self.players[seat].hand.remove(index);
                let card = self.deck.deal()?;
                self.players[seat].hand.push(card);
                drawn += 1;
            }
        }

        self.players[seat].has_drawn = true;
        info!("{} exchanges {drawn} cards", self.players[seat].name);

        if self.players.iter().all(|p| p.has_drawn || p.folded) {
            self.stage = DrawStage::Showdown;
        } else {
            self.stage = DrawStage::PartialDraw;
        }

        Ok(())
    }

    /// Scores the hand and pays the winners.
    ///
    /// The payout is `min(pot, floor(contribution * multiplier))` for the
    /// winning category, exact ties split the pot cap evenly. Whatever the
    /// cap keeps stays in the pot until the next
    /// [reset_round](Self::reset_round). Returns one payoff per winner,
    /// empty if nobody contends.
    pub fn showdown(&mut self) -> Vec<Payoff> {
        self.stage = DrawStage::Showdown;

        let scored = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.folded)
            .map(|(seat, p)| (seat, HandValue::eval(&p.hand)))
            .collect::<Vec<_>>();

        let Some(best) = scored.iter().map(|(_, value)| *value).max() else {
            return Vec::new();
        };

        let winners = scored
            .iter()
            .filter(|(_, value)| *value == best)
            .map(|(seat, _)| *seat)
            .collect::<Vec<_>>();

        let multiplier = payout_multiplier(best.rank());
        let cap = if winners.len() > 1 {
            self.pot / winners.len() as u32
        } else {
            self.pot
        };

        let mut payoffs = Vec::with_capacity(winners.len());
        for &seat in &winners {
            let player = &mut self.players[seat];
            let stake = player.contribution.amount() as f64;
            let desired = Chips::new((stake * multiplier).floor() as u32);
            let awarded = desired.min(cap);

            player.chips += awarded;
            self.pot -= awarded;

            info!(
                "{} wins {awarded} with {} (x{multiplier})",
                player.name,
                best.name()
            );

            payoffs.push(Payoff {
                name: player.name.clone(),
                chips: awarded,
                hand: Some(best.name()),
                multiplier: Some(multiplier),
            });
        }

        payoffs
    }

    /// Credits a seat stack from an external source.
    ///
    /// A positive payment clears the deposit requirement. The pot is never
    /// touched.
    pub fn deposit(&mut self, seat: usize, amount: Chips) -> Result<(), GameError> {
        if seat >= self.players.len() {
            return Err(GameError::InvalidSeat(seat));
        }
        if amount == Chips::ZERO {
            return Err(GameError::InvalidAmount);
        }

        self.players[seat].chips += amount;
        self.deposit_required = false;

        info!("{} deposits {amount}", self.players[seat].name);

        Ok(())
    }

    /// The seats at the table.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The chips committed to the hand and not yet awarded.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The hand stage.
    pub fn stage(&self) -> DrawStage {
        self.stage
    }

    /// The opening stake for the round.
    pub fn ante(&self) -> Chips {
        self.ante
    }

    /// Completed rounds since the session started.
    pub fn round_count(&self) -> u32 {
        self.round_count
    }

    /// The table is waiting for a deposit before the next round.
    pub fn deposit_required(&self) -> bool {
        self.deposit_required
    }

    /// The deposit requested every third round.
    pub fn required_deposit(&self) -> Chips {
        self.required_deposit
    }

    fn checked_seat(&self, seat: usize) -> Result<(), GameError> {
        if seat >= self.players.len() {
            Err(GameError::InvalidSeat(seat))
        } else if self.stage == DrawStage::Showdown {
            Err(GameError::HandOver)
        } else if self.players[seat].folded {
            Err(GameError::SeatFolded(seat))
        } else {
            Ok(())
        }
    }

    /// The deferred five card deal, runs once per round from [Self::bet].
    fn initial_deal(&mut self) -> Result<(), GameError> {
        for _ in 0..5 {
            for seat in 0..self.players.len() {
                let card = self.deck.deal()?;
                self.players[seat].hand.push(card);
            }
        }

        info!("Hands dealt to {} seats", self.players.len());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homegame_core::poker::{Card, Rank, Suit};

    const NAMES: &[&str] = &["You", "Alice"];

    // Creates a game with seeded randomness.
    fn new_game() -> DrawGame {
        DrawGame::with_rng(
            NAMES,
            DrawGame::DEFAULT_ANTE,
            DrawGame::DEFAULT_REQUIRED_DEPOSIT,
            StdRng::seed_from_u64(13),
        )
        .unwrap()
    }

    fn hand(cards: &[(Rank, Suit)]) -> Vec<Card> {
        cards.iter().map(|&(r, s)| Card::new(r, s)).collect()
    }

    #[test]
    fn bet_triggers_the_deal_once() {
        let mut game = new_game();
        assert_eq!(game.stage(), DrawStage::Undealt);
        assert!(game.players().iter().all(|p| p.hand.is_empty()));

        game.bet(0, Chips::new(50)).unwrap();

        assert_eq!(game.stage(), DrawStage::Dealt);
        assert_eq!(game.pot(), Chips::new(50));
        assert_eq!(game.players()[0].chips, Chips::new(950));
        assert!(game.players()[0].has_bet);
        assert!(game.players().iter().all(|p| p.hand.len() == 5));

        // A second bet must not deal again.
        game.bet(1, Chips::new(50)).unwrap();
        assert!(game.players().iter().all(|p| p.hand.len() == 5));
        assert_eq!(game.pot(), Chips::new(100));
    }

    #[test]
    fn draw_needs_a_deal() {
        let mut game = new_game();
        assert_eq!(game.draw_cards(0, &[0]).unwrap_err(), GameError::IllegalStage);
    }

    #[test]
    fn each_seat_draws_once() {
        let mut game = new_game();
        game.bet(0, Chips::new(50)).unwrap();

        game.draw_cards(0, &[0, 2]).unwrap();
        assert_eq!(game.stage(), DrawStage::PartialDraw);
        assert_eq!(game.players()[0].hand.len(), 5);
        assert_eq!(
            game.draw_cards(0, &[1]).unwrap_err(),
            GameError::AlreadyDrawn(0)
        );

        // Standing pat counts as the draw.
        game.draw_cards(1, &[]).unwrap();
        assert_eq!(game.stage(), DrawStage::Showdown);
        assert_eq!(
            game.draw_cards(1, &[0]).unwrap_err(),
            GameError::HandOver
        );
    }

    #[test]
    fn discards_are_replaced_highest_first() {
        let mut game = new_game();
        game.bet(0, Chips::new(50)).unwrap();

        let before = game.players()[0].hand.clone();
        game.draw_cards(0, &[4, 0]).unwrap();

        // The kept cards keep their relative order, replacements follow.
        let after = &game.players()[0].hand;
        assert_eq!(after.len(), 5);
        assert_eq!(&after[..3], &before[1..4]);
        assert!(!after.contains(&before[0]));
        assert!(!after.contains(&before[4]));
    }

    #[test]
    fn folded_seat_is_skipped_by_the_draw_gate() {
        let mut game = new_game();
        game.bet(0, Chips::new(50)).unwrap();

        game.fold(1).unwrap();
        assert_eq!(game.draw_cards(1, &[]).unwrap_err(), GameError::SeatFolded(1));

        // With the other seat folded one draw closes the hand.
        game.draw_cards(0, &[]).unwrap();
        assert_eq!(game.stage(), DrawStage::Showdown);

        let payoffs = game.showdown();
        assert_eq!(payoffs.len(), 1);
        assert_eq!(payoffs[0].name, "You");
    }

    #[test]
    fn payout_capped_by_stake_and_pot() {
        let mut game = new_game();
        game.bet(0, Chips::new(100)).unwrap();
        game.bet(1, Chips::new(50)).unwrap();

        // Rig a one pair win for seat 0: desired is 100 * 1.5 = 150, the pot
        // holds 150 so the full amount is paid.
        game.players[0].hand = hand(&[
            (Rank::Ace, Suit::Spades),
            (Rank::Ace, Suit::Diamonds),
            (Rank::Seven, Suit::Hearts),
            (Rank::Five, Suit::Clubs),
            (Rank::Deuce, Suit::Spades),
        ]);
        game.players[1].hand = hand(&[
            (Rank::King, Suit::Spades),
            (Rank::Queen, Suit::Diamonds),
            (Rank::Nine, Suit::Hearts),
            (Rank::Five, Suit::Diamonds),
            (Rank::Trey, Suit::Clubs),
        ]);

        let payoffs = game.showdown();
        assert_eq!(payoffs.len(), 1);
        assert_eq!(payoffs[0].chips, Chips::new(150));
        assert_eq!(payoffs[0].hand, Some("One Pair"));
        assert_eq!(payoffs[0].multiplier, Some(1.5));
        assert_eq!(game.pot(), Chips::ZERO);
        assert_eq!(game.players()[0].chips, Chips::new(1_050));
    }

    #[test]
    fn payout_never_exceeds_the_pot() {
        let mut game = new_game();
        game.bet(0, Chips::new(100)).unwrap();

        // A full house would pay 600 but the pot only holds 100.
        game.players[0].hand = hand(&[
            (Rank::Ace, Suit::Spades),
            (Rank::Ace, Suit::Diamonds),
            (Rank::Ace, Suit::Hearts),
            (Rank::King, Suit::Clubs),
            (Rank::King, Suit::Spades),
        ]);
        game.players[1].folded = true;

        let payoffs = game.showdown();
        assert_eq!(payoffs[0].chips, Chips::new(100));
        assert_eq!(payoffs[0].multiplier, Some(6.0));
        assert_eq!(game.pot(), Chips::ZERO);
    }

    #[test]
    fn weak_hand_leaves_the_house_edge_in_the_pot() {
        let mut game = new_game();
        game.bet(0, Chips::new(50)).unwrap();
        game.bet(1, Chips::new(50)).unwrap();

        // High card pays stake times one, the rest stays in the pot.
        game.players[0].hand = hand(&[
            (Rank::Ace, Suit::Spades),
            (Rank::King, Suit::Diamonds),
            (Rank::Nine, Suit::Hearts),
            (Rank::Five, Suit::Clubs),
            (Rank::Deuce, Suit::Spades),
        ]);
        game.players[1].hand = hand(&[
            (Rank::Queen, Suit::Spades),
            (Rank::Jack, Suit::Diamonds),
            (Rank::Nine, Suit::Clubs),
            (Rank::Five, Suit::Diamonds),
            (Rank::Trey, Suit::Clubs),
        ]);

        let payoffs = game.showdown();
        assert_eq!(payoffs[0].chips, Chips::new(50));
        assert_eq!(game.pot(), Chips::new(50));

        // The next round claims what the house kept.
        game.reset_round(true);
        assert_eq!(game.pot(), Chips::ZERO);
    }

    #[test]
    fn exact_ties_split_the_pot_cap() {
        let mut game = new_game();
        game.bet(0, Chips::new(50)).unwrap();
        game.bet(1, Chips::new(50)).unwrap();

        // Identical ranks in different suits tie exactly.
        game.players[0].hand = hand(&[
            (Rank::Ace, Suit::Spades),
            (Rank::King, Suit::Diamonds),
            (Rank::Queen, Suit::Hearts),
            (Rank::Jack, Suit::Clubs),
            (Rank::Nine, Suit::Spades),
        ]);
        game.players[1].hand = hand(&[
            (Rank::Ace, Suit::Hearts),
            (Rank::King, Suit::Clubs),
            (Rank::Queen, Suit::Diamonds),
            (Rank::Jack, Suit::Spades),
            (Rank::Nine, Suit::Diamonds),
        ]);

        let payoffs = game.showdown();
        assert_eq!(payoffs.len(), 2);
        assert_eq!(payoffs[0].chips, Chips::new(50));
        assert_eq!(payoffs[1].chips, Chips::new(50));
        assert_eq!(game.pot(), Chips::ZERO);
    }

    #[test]
    fn deposit_cadence_every_third_round() {
        let mut game = new_game();
        assert!(!game.deposit_required());

        game.reset_round(true);
        game.reset_round(true);
        assert!(!game.deposit_required());

        game.reset_round(true);
        assert_eq!(game.round_count(), 3);
        assert!(game.deposit_required());

        // A deposit credits the stack and clears the flag, the pot is not
        // touched.
        let pot = game.pot();
        game.deposit(0, Chips::new(500)).unwrap();
        assert!(!game.deposit_required());
        assert_eq!(game.players()[0].chips, Chips::new(1_500));
        assert_eq!(game.pot(), pot);

        assert_eq!(
            game.deposit(0, Chips::ZERO).unwrap_err(),
            GameError::InvalidAmount
        );
    }

    #[test]
    fn reset_round_reshuffles_and_clears() {
        let mut game = new_game();
        game.bet(0, Chips::new(50)).unwrap();
        game.draw_cards(0, &[0, 1, 2]).unwrap();

        game.reset_round(true);

        assert_eq!(game.stage(), DrawStage::Undealt);
        assert_eq!(game.pot(), Chips::ZERO);
        for player in game.players() {
            assert!(player.hand.is_empty());
            assert!(!player.has_drawn);
            assert!(!player.has_bet);
            assert!(!player.folded);
            assert_eq!(player.contribution, Chips::ZERO);
        }

        // The fresh deck deals full hands again on the next bet.
        game.bet(1, Chips::new(50)).unwrap();
        assert!(game.players().iter().all(|p| p.hand.len() == 5));
        assert_eq!(game.round_count(), 1);
    }
}
