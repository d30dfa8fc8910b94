// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use serde::Serialize;

use homegame_core::poker::{Card, Chips};

/// A table player state.
///
/// The same record backs human and scripted seats, what differs is who picks
/// the actions: seat 0 acts through the UI, the other seats through a bot
/// strategy.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// This player name.
    pub name: String,
    /// This player cards.
    pub hand: Vec<Card>,
    /// This player chips.
    pub chips: Chips,
    /// The player has folded this hand.
    pub folded: bool,
    /// Chips put into the pot during the current betting round.
    pub contribution: Chips,
    /// The player has exchanged cards this hand, draw variant only.
    pub has_drawn: bool,
    /// The player has placed a bet this hand, draw variant only.
    pub has_bet: bool,
}

impl Player {
    /// Creates a new player with a starting stack.
    pub(crate) fn new(name: impl Into<String>, chips: Chips) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            chips,
            folded: false,
            contribution: Chips::ZERO,
            has_drawn: false,
            has_bet: false,
        }
    }

    /// Reset state for a new hand.
    pub(crate) fn start_hand(&mut self) {
        self.hand.clear();
        self.folded = false;
        self.contribution = Chips::ZERO;
        self.has_drawn = false;
        self.has_bet = false;
    }

    /// Moves up to `amount` chips from the stack into this round contribution.
    ///
    /// Returns the chips actually paid, a short stack pays what it has.
    pub(crate) fn pay(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.contribution += paid;
        paid
    }

    /// The player can still act, not folded and has chips behind.
    pub fn is_active(&self) -> bool {
        !self.folded && self.chips > Chips::ZERO
    }
}
