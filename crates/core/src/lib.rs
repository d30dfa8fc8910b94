// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Homegame Poker core types.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod error;
pub mod payoff;
pub mod poker;

pub use error::GameError;
pub use payoff::Payoff;
