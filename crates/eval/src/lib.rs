// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pokerank 5 cards hand evaluator.
//!
//! Assigns to each 5 cards hand a score in `1..=7462` such that a better hand
//! always has a higher score and hands of the same strength have the same
//! score. The scores come from a table built once by enumerating all distinct
//! rank patterns, keyed by the product of the cards rank primes.
//!
//! Cards are packed into integers with [encode_card] and scored with
//! [score_hand]:
//!
//! ```
//! # use pokerank_eval::*;
//! let royal = [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Ten]
//!     .map(|rank| encode_card(Suit::Spades, rank));
//! let [c1, c2, c3, c4, c5] = royal;
//! assert_eq!(score_hand(c1, c2, c3, c4, c5).unwrap(), 7462);
//! ```
//!
//! or with an [Evaluator] that owns its [RankTable]:
//!
//! ```
//! # use pokerank_eval::*;
//! let evaluator = Evaluator::new().unwrap();
//! let cards = ["AS", "AH", "AD", "AC", "KS"].map(|c| c.parse::<Card>().unwrap());
//! let value = evaluator.score(&cards).unwrap();
//! assert_eq!(value.rank(), HandRank::FourOfAKind);
//! assert_eq!(value.value(), 7452);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod error;
pub use error::{Error, Result};

pub mod eval;
pub use eval::{Evaluator, HandRank, HandValue, RankTable};

// Reexport cards types.
pub use pokerank_cards::{Card, CardError, Deck, Rank, Suit};

/// Packs a suit and a rank into a card integer.
pub fn encode_card(suit: Suit, rank: Rank) -> u32 {
    Card::new(rank, suit).id()
}

/// Scores 5 encoded cards with the shared evaluator.
///
/// Fails if a card is not a valid encoding or if a card is repeated.
pub fn score_hand(c1: u32, c2: u32, c3: u32, c4: u32, c5: u32) -> Result<u16> {
    let value = Evaluator::shared()?.score_ids([c1, c2, c3, c4, c5])?;
    Ok(value.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode() {
        for suit in Suit::suits() {
            for rank in Rank::ranks() {
                let card = Card::try_from(encode_card(suit, rank)).unwrap();
                assert_eq!((card.suit(), card.rank()), (suit, rank));
            }
        }

        assert_eq!(encode_card(Suit::Spades, Rank::Deuce), 0x102);
        assert_eq!(encode_card(Suit::Spades, Rank::Ace), 0x129);
        assert_eq!(encode_card(Suit::Hearts, Rank::Ace), 0x229);
        assert_eq!(encode_card(Suit::Clubs, Rank::Four), 0x805);
    }

    #[test]
    fn score_sample_hands() {
        let score = |suits: [Suit; 5], ranks: [Rank; 5]| {
            let c = [0, 1, 2, 3, 4].map(|i| encode_card(suits[i], ranks[i]));
            score_hand(c[0], c[1], c[2], c[3], c[4])
        };

        use Rank::*;
        use Suit::*;

        let spades = [Spades; 5];
        assert_eq!(score(spades, [Ace, King, Queen, Jack, Ten]), Ok(7462));
        assert_eq!(score(spades, [King, Queen, Jack, Ten, Nine]), Ok(7461));
        assert_eq!(
            score([Spades, Hearts, Diamonds, Clubs, Spades], [Ace, Ace, Ace, Ace, King]),
            Ok(7452)
        );

        assert_eq!(
            score(spades, [Ace, Ace, King, Queen, Jack]),
            Err(Error::DuplicateCard(Card::new(Ace, Spades)))
        );

        assert_eq!(
            score_hand(0x129, 0x125, 0x11f, 0x11d, 0x017),
            Err(Error::Card(CardError::InvalidEncoding(0x017)))
        );
    }
}
