// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Homegame Poker table state machines.
//!
//! This crate implements the two game variants of a local single session
//! played against scripted opponents:
//!
//! - [TexasGame] a simplified Texas Hold'em table with betting streets,
//!   community cards, and a split pot showdown.
//! - [DrawGame] a Five-Card Draw table with a deferred deal, a one time card
//!   exchange, and a payout capped by the winning hand category.
//!
//! Both variants are synchronous and turn based, every operation is an
//! immediate call that either mutates the table or returns a
//! [GameError](homegame_core::GameError) leaving the table untouched. The UI
//! embedding drives the session and reads state through the query methods.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod draw;
pub mod player;
pub mod texas;

pub use draw::{DrawGame, DrawStage};
pub use player::Player;
pub use texas::{Stage, TexasGame};
