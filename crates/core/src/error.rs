// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game engine errors.
use thiserror::Error;

use homegame_cards::DeckError;

/// Errors rejected by the game state machines.
///
/// A rejected operation never mutates game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The seat index does not exist at the table.
    #[error("seat {0} does not exist")]
    InvalidSeat(usize),

    /// The seat has folded this hand.
    #[error("seat {0} has folded")]
    SeatFolded(usize),

    /// The hand has reached showdown, no more actions are accepted.
    #[error("the hand is over")]
    HandOver,

    /// The action is not legal in the current stage.
    #[error("action not allowed in the current stage")]
    IllegalStage,

    /// The seat has already exchanged cards this hand.
    #[error("seat {0} has already drawn this hand")]
    AlreadyDrawn(usize),

    /// Bets and deposits must be positive.
    #[error("amount must be positive")]
    InvalidAmount,

    /// A game needs at least two seats.
    #[error("not enough players")]
    NotEnoughPlayers,

    /// The deck ran out of cards.
    #[error(transparent)]
    Deck(#[from] DeckError),
}
