// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator maps a 5 to 7 cards hand to a [HandValue], a totally ordered
//! score that encodes the hand category and up to five tie-break kickers. For
//! hands larger than 5 cards the best 5 cards sub-selection is found with a
//! per-category candidate search instead of enumerating all 21 combinations.
use serde::{Deserialize, Serialize};
use std::fmt;

use homegame_cards::{Card, Suit};

/// The category of a Poker hand, ordered ascending by strength.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum HandRank {
    /// No pair, ranked by its five highest cards.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five consecutive ranks, aces play high or low.
    Straight,
    /// Five cards of one suit.
    Flush,
    /// Three of a kind plus a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// A straight in one suit.
    StraightFlush,
}

impl HandRank {
    /// The hand display name.
    pub fn name(&self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The value of a Poker hand.
///
/// A value packs the hand category and up to five kicker rank values in
/// descending significance:
///
/// ```text
///   +-------------+------+------+------+------+------+
///   |   category  |  k1  |  k2  |  k3  |  k4  |  k5  |
///   +-------------+------+------+------+------+------+
///    bits 20..24   16..20 12..16  8..12  4..8   0..4
/// ```
///
/// The category dominates the comparison, ties within a category are broken
/// lexicographically by the kickers. Two hands are equal iff category and all
/// kickers match.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandValue(u32);

impl HandValue {
    /// Evaluates a hand of up to 7 cards.
    ///
    /// Hands with fewer than 2 cards evaluate to the weakest possible value,
    /// this is a defensive path for callers holding incomplete hands.
    pub fn eval(cards: &[Card]) -> HandValue {
        if cards.len() < 2 {
            return HandValue(0);
        }

        let distinct = distinct_values(cards);

        let mut counts = [0u8; 15];
        for card in cards {
            counts[card.rank().value() as usize] += 1;
        }

        if let Some(high) = best_straight_flush(cards) {
            return Self::pack(HandRank::StraightFlush, &[high]);
        }

        if let Some(quad) = (2..=14).rev().find(|&v| counts[v] == 4) {
            let quad = quad as u8;
            let kicker = distinct.iter().copied().find(|&v| v != quad).unwrap_or(0);
            return Self::pack(HandRank::FourOfAKind, &[quad, kicker]);
        }

        let triples = (2..=14u8)
            .rev()
            .filter(|&v| counts[v as usize] == 3)
            .collect::<Vec<_>>();
        let paired = (2..=14u8)
            .rev()
            .filter(|&v| counts[v as usize] >= 2)
            .collect::<Vec<_>>();

        // A second triple can serve as the pair of a full house.
        if !triples.is_empty() && paired.len() >= 2 {
            let top = triples[0];
            if let Some(pair) = paired.iter().copied().find(|&v| v != top) {
                return Self::pack(HandRank::FullHouse, &[top, pair]);
            }
        }

        if let Some(flush) = best_flush(cards) {
            return Self::pack(HandRank::Flush, &flush);
        }

        if let Some(high) = detect_straight(&distinct) {
            return Self::pack(HandRank::Straight, &[high]);
        }

        if let Some(&top) = triples.first() {
            let mut kickers = vec![top];
            kickers.extend(distinct.iter().copied().filter(|&v| v != top).take(2));
            return Self::pack(HandRank::ThreeOfAKind, &kickers);
        }

        let pairs = (2..=14u8)
            .rev()
            .filter(|&v| counts[v as usize] == 2)
            .collect::<Vec<_>>();

        match pairs.as_slice() {
            [p1, p2, ..] => {
                let kicker = distinct
                    .iter()
                    .copied()
                    .find(|&v| v != *p1 && v != *p2)
                    .unwrap_or(0);
                Self::pack(HandRank::TwoPair, &[*p1, *p2, kicker])
            }
            [p] => {
                let mut kickers = vec![*p];
                kickers.extend(distinct.iter().copied().filter(|&v| v != *p).take(3));
                Self::pack(HandRank::OnePair, &kickers)
            }
            [] => Self::pack(HandRank::HighCard, &distinct[..distinct.len().min(5)]),
        }
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        match self.0 >> 20 {
            0 => HandRank::HighCard,
            1 => HandRank::OnePair,
            2 => HandRank::TwoPair,
            3 => HandRank::ThreeOfAKind,
            4 => HandRank::Straight,
            5 => HandRank::Flush,
            6 => HandRank::FullHouse,
            7 => HandRank::FourOfAKind,
            8 => HandRank::StraightFlush,
            _ => panic!("Invalid hand rank bits 0x{:x}", self.0),
        }
    }

    /// The hand display name.
    pub fn name(&self) -> &'static str {
        self.rank().name()
    }

    /// The packed comparison score, higher is better.
    pub fn score(&self) -> u32 {
        self.0
    }

    fn pack(rank: HandRank, kickers: &[u8]) -> HandValue {
        let mut score = (rank as u32) << 20;
        for (slot, &kicker) in kickers.iter().take(5).enumerate() {
            score |= (kicker as u32) << (16 - slot * 4);
        }
        HandValue(score)
    }
}

impl fmt::Debug for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandValue({} 0x{:06x})", self.name(), self.0)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The distinct rank values in descending order.
fn distinct_values(cards: &[Card]) -> Vec<u8> {
    let mut values = cards.iter().map(|c| c.rank().value()).collect::<Vec<_>>();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.dedup();
    values
}

/// Finds the top card value of a 5-long run in distinct descending values.
///
/// The wheel A-2-3-4-5 counts as a straight with top card 5 when no higher
/// run exists.
fn detect_straight(distinct: &[u8]) -> Option<u8> {
    let mut run = 1;
    for i in 1..distinct.len() {
        if distinct[i] + 1 == distinct[i - 1] {
            run += 1;
            if run == 5 {
                return Some(distinct[i] + 4);
            }
        } else {
            run = 1;
        }
    }

    let has = |v| distinct.contains(&v);
    if has(14) && has(5) && has(4) && has(3) && has(2) {
        return Some(5);
    }

    None
}

/// The five highest values of a suit with 5 or more cards.
fn best_flush(cards: &[Card]) -> Option<Vec<u8>> {
    Suit::suits().find_map(|suit| {
        let mut values = cards
            .iter()
            .filter(|c| c.suit() == suit)
            .map(|c| c.rank().value())
            .collect::<Vec<_>>();
        if values.len() < 5 {
            return None;
        }

        values.sort_unstable_by(|a, b| b.cmp(a));
        values.truncate(5);
        Some(values)
    })
}

/// The top card value of a straight restricted to one suit.
fn best_straight_flush(cards: &[Card]) -> Option<u8> {
    Suit::suits().find_map(|suit| {
        let suited = cards
            .iter()
            .copied()
            .filter(|c| c.suit() == suit)
            .collect::<Vec<_>>();
        if suited.len() < 5 {
            return None;
        }

        detect_straight(&distinct_values(&suited))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use homegame_cards::{Rank, Suit};
    use rand::prelude::*;

    /// Builds a hand from a "AS KD 5C" style string.
    fn hand(s: &str) -> Vec<Card> {
        s.split_whitespace()
            .map(|c| {
                let mut chars = c.chars();
                let rank = match chars.next().unwrap() {
                    '2' => Rank::Deuce,
                    '3' => Rank::Trey,
                    '4' => Rank::Four,
                    '5' => Rank::Five,
                    '6' => Rank::Six,
                    '7' => Rank::Seven,
                    '8' => Rank::Eight,
                    '9' => Rank::Nine,
                    'T' => Rank::Ten,
                    'J' => Rank::Jack,
                    'Q' => Rank::Queen,
                    'K' => Rank::King,
                    'A' => Rank::Ace,
                    r => panic!("invalid rank {r}"),
                };
                let suit = match chars.next().unwrap() {
                    'C' => Suit::Clubs,
                    'D' => Suit::Diamonds,
                    'H' => Suit::Hearts,
                    'S' => Suit::Spades,
                    s => panic!("invalid suit {s}"),
                };
                Card::new(rank, suit)
            })
            .collect()
    }

    fn eval(s: &str) -> HandValue {
        HandValue::eval(&hand(s))
    }

    #[test]
    fn categories() {
        assert_eq!(eval("AS KD QH JC 9S").rank(), HandRank::HighCard);
        assert_eq!(eval("AS AD QH JC 9S").rank(), HandRank::OnePair);
        assert_eq!(eval("AS AD QH QC 9S").rank(), HandRank::TwoPair);
        assert_eq!(eval("AS AD AH QC 9S").rank(), HandRank::ThreeOfAKind);
        assert_eq!(eval("2S 3H 4D 5C 6S").rank(), HandRank::Straight);
        assert_eq!(eval("AS KS QS JS 9S").rank(), HandRank::Flush);
        assert_eq!(eval("2C 2D 2H 3S 3C").rank(), HandRank::FullHouse);
        assert_eq!(eval("AS AD AH AC 9S").rank(), HandRank::FourOfAKind);
        assert_eq!(eval("5S 6S 7S 8S 9S").rank(), HandRank::StraightFlush);
    }

    #[test]
    fn category_monotonicity() {
        // A higher category always beats a lower one regardless of kickers.
        let full_house = eval("2C 2D 2H 3S 3C");
        let flush = eval("AS KS QS JS 9S");
        let high_card = eval("AS KD QH JC 9S");
        assert!(full_house > flush);
        assert!(flush > high_card);

        let straight_flush = eval("2S 3S 4S 5S 6S");
        let quads = eval("AS AD AH AC KS");
        assert!(straight_flush > quads);
    }

    #[test]
    fn wheel_straight() {
        let wheel = eval("AS 2H 3D 4C 5S");
        assert_eq!(wheel.rank(), HandRank::Straight);

        // The wheel plays its ace low and loses to a six high straight.
        let six_high = eval("2S 3H 4D 5C 6S");
        assert_eq!(six_high.rank(), HandRank::Straight);
        assert!(wheel < six_high);

        // Two wheels in different suits tie exactly.
        assert_eq!(wheel, eval("AD 2C 3S 4H 5D"));
    }

    #[test]
    fn six_card_run_beats_wheel() {
        // With A-2-3-4-5-6 the six high run wins over the wheel reading.
        let v = eval("AS 2H 3D 4C 5S 6H");
        assert_eq!(v.rank(), HandRank::Straight);
        assert_eq!(v, eval("2S 3H 4D 5C 6S"));
    }

    #[test]
    fn order_invariance() {
        let mut cards = hand("AS AD 7H 7C 2S KD 9C");
        let value = HandValue::eval(&cards);

        let mut rng = rand::rng();
        for _ in 0..20 {
            cards.shuffle(&mut rng);
            assert_eq!(HandValue::eval(&cards), value);
        }
    }

    #[test]
    fn seven_card_selection() {
        // Flush outranks the straight hiding in the same 7 cards.
        let v = eval("9S 8S 7S 6H 5S 4S TD");
        assert_eq!(v.rank(), HandRank::Flush);

        // The flush keeps only the five highest suited cards.
        assert_eq!(eval("AS KS QS JS 9S 2S 3S"), eval("AS KS QS JS 9S"));
    }

    #[test]
    fn two_triples_full_house() {
        let v = eval("AS AD AH KS KD KH 2C");
        assert_eq!(v.rank(), HandRank::FullHouse);
        assert_eq!(v, eval("AS AD AH KS KD"));
    }

    #[test]
    fn kickers_break_ties() {
        // Same pair, the higher kicker wins.
        assert!(eval("AS AD KH 7C 2S") > eval("AH AC QH 7D 2H"));

        // Same quads, kicker decides.
        assert!(eval("AS AD AH AC KS") > eval("AS AD AH AC QS"));

        // Two pair compares high pair, low pair, then kicker.
        assert!(eval("AS AD 3H 3C KS") > eval("KH KC QH QD AH"));

        // Identical ranks in different suits tie exactly.
        assert_eq!(eval("AS AD KH 7C 2S"), eval("AH AC KD 7S 2D"));
    }

    #[test]
    fn high_card_uses_five_kickers() {
        let v = eval("AS KD QH JC 9S 7D 5C");
        assert_eq!(v.rank(), HandRank::HighCard);
        assert_eq!(v, eval("AS KD QH JC 9S"));
    }

    #[test]
    fn short_hands_are_weakest() {
        let empty = HandValue::eval(&[]);
        let single = eval("AS");
        assert_eq!(empty, single);
        assert!(eval("2S 3H") > single);
    }

    #[test]
    fn names() {
        assert_eq!(eval("2C 2D 2H 3S 3C").name(), "Full House");
        assert_eq!(eval("AS 2H 3D 4C 5S").name(), "Straight");
        assert_eq!(HandRank::StraightFlush.name(), "Straight Flush");
    }
}
