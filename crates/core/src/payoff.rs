// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown payoff types.
use serde::Serialize;

use crate::poker::Chips;

/// A player payoff at the end of a hand.
///
/// A showdown returns one payoff per winning seat, tied seats split the pot
/// and each get their own entry. An empty payoff list means the hand had no
/// contenders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payoff {
    /// The winning player name.
    pub name: String,
    /// The chips awarded to the player.
    pub chips: Chips,
    /// The winning hand display name, if the hand was evaluated.
    pub hand: Option<&'static str>,
    /// The payout multiplier applied, draw variant only.
    pub multiplier: Option<f64>,
}

impl Payoff {
    /// Creates a payoff for a pot awarded without evaluation.
    pub fn uncontested(name: impl Into<String>, chips: Chips) -> Self {
        Self {
            name: name.into(),
            chips,
            hand: None,
            multiplier: None,
        }
    }
}
