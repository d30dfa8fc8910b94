// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Homegame Poker cards types.
//!
//! This crate defines types to create cards:
//!
//! ```
//! # use homegame_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd = Card::new(Rank::King, Suit::Diamonds);
//! assert!(ah != kd);
//! ```
//!
//! and a [Deck] type for shuffling and dealing:
//!
//! ```
//! # use homegame_cards::Deck;
//! let mut rng = rand::rng();
//! let mut deck = Deck::new_and_shuffled(&mut rng);
//! let hole = deck.deal_many(2).unwrap();
//! assert_eq!(hole.len(), 2);
//! assert_eq!(deck.count(), Deck::SIZE - 2);
//! ```
//!
//! Dealing past the 52nd card is a [DeckError::Exhausted], a deck is never
//! refilled implicitly, use [Deck::reset] between hands.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod cards;
pub use cards::{Card, Deck, DeckError, Rank, Suit};
