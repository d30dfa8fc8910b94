// Copyright (C) 2025 Vince Vasta.
// SPDX-License-Identifier: Apache-2.0

//! Plays a scripted session of both game variants and logs the action.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;

use homegame_bot::{Heuristic, run_bot_turns};
use homegame_core::Payoff;
use homegame_table::{DrawGame, Stage, TexasGame};

fn print_payoffs(payoffs: &[Payoff]) {
    for payoff in payoffs {
        match payoff.hand {
            Some(hand) => println!("{} wins {} with {hand}", payoff.name, payoff.chips),
            None => println!("{} wins {} uncontested", payoff.name, payoff.chips),
        }
    }
}

fn texas_hand() -> Result<()> {
    println!("--- Texas Hold'em ---");

    let mut game = TexasGame::new(&["Alice", "Bob", "Carol", "Dave"])?;
    game.start_hand()?;

    let mut strategy = Heuristic;
    let payoffs = run_bot_turns(&mut game, &mut strategy, None)?;

    let payoffs = match payoffs {
        Some(payoffs) => payoffs,
        // The bots stalled each other, score whoever is left.
        None if game.stage() < Stage::Showdown => game.showdown(),
        None => Vec::new(),
    };

    print_payoffs(&payoffs);

    for player in game.players() {
        println!("{} has {}", player.name, player.chips);
    }

    Ok(())
}

fn draw_round() -> Result<()> {
    println!("--- Five-Card Draw ---");

    let mut game = DrawGame::new(&["Alice", "Bob"])?;
    let ante = game.ante();

    // The opening bets trigger the deal.
    game.bet(0, ante)?;
    game.bet(1, ante)?;

    // Alice exchanges three cards, Bob stands pat.
    game.draw_cards(0, &[2, 3, 4])?;
    game.draw_cards(1, &[])?;

    let payoffs = game.showdown();
    print_payoffs(&payoffs);
    println!("The house keeps {}", game.pot());

    game.reset_round(true);
    if game.deposit_required() {
        game.deposit(0, game.required_deposit())?;
    }

    for player in game.players() {
        println!("{} has {}", player.name, player.chips);
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    texas_hand()?;
    draw_round()?;

    Ok(())
}
