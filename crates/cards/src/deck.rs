// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Primes used to encode a card rank.
const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Mask for the rank prime bits.
const PRIME_MASK: u32 = 0xFF;

/// Mask for the suit bits.
const SUIT_MASK: u32 = 0xF00;

/// Errors returned when decoding or parsing a card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// The integer is not one of the 52 card encodings.
    #[error("Invalid card encoding 0x{0:x}")]
    InvalidEncoding(u32),
    /// The string is not a rank character followed by a suit character.
    #[error("Invalid card string {0:?}")]
    InvalidString(String),
}

/// A Poker card.
///
/// A card is a 12 bits integer with the suit flag in the high nibble and the
/// prime number of the card rank in the low byte:
///
/// ```text
///   +--------+--------+
///   |xxxxcdhs|pppppppp|
///   +--------+--------+
///   p = prime number of rank (deuce=2,trey=3,four=5,five=7,...,ace=41)
///   cdhs = suit of card (spades=0x1,hearts=0x2,diamonds=0x4,clubs=0x8)
/// ```
///
/// For example `0x129` is the ace of spades and `0x802` the deuce of clubs.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Card(u32);

impl Card {
    /// Create a card given a suit and rank.
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Self(((suit as u32) << 8) | rank.prime())
    }

    /// This card encoding.
    pub fn id(&self) -> u32 {
        self.0
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match Suit::from_bits(self.suit_bits()) {
            Some(suit) => suit,
            None => panic!("Invalid suit value 0x{:x}", self.0),
        }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        match Rank::from_prime(self.prime()) {
            Some(rank) => rank,
            None => panic!("Invalid rank 0x{:x}", self.0),
        }
    }

    /// Returns the prime number of this card rank.
    #[inline]
    pub fn prime(&self) -> u32 {
        self.0 & PRIME_MASK
    }

    /// Returns the suit bits.
    #[inline]
    pub fn suit_bits(&self) -> u32 {
        (self.0 & SUIT_MASK) >> 8
    }
}

impl TryFrom<u32> for Card {
    type Error = CardError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        let valid = id & !(SUIT_MASK | PRIME_MASK) == 0
            && Suit::from_bits((id & SUIT_MASK) >> 8).is_some()
            && Rank::from_prime(id & PRIME_MASK).is_some();

        if valid {
            Ok(Card(id))
        } else {
            Err(CardError::InvalidEncoding(id))
        }
    }
}

impl From<Card> for u32 {
    fn from(card: Card) -> Self {
        card.0
    }
}

impl FromStr for Card {
    type Err = CardError;

    /// Parses a card from a string like "AS", "Td" or "2c".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CardError::InvalidString(s.to_string());

        let mut chars = s.chars();
        let (Some(r), Some(u), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let rank = Rank::ranks()
            .find(|rank| rank.to_string().eq_ignore_ascii_case(&r.to_string()))
            .ok_or_else(invalid)?;
        let suit = Suit::suits()
            .find(|suit| suit.to_string().eq_ignore_ascii_case(&u.to_string()))
            .ok_or_else(invalid)?;

        Ok(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The prime number bound to this rank.
    #[inline]
    pub fn prime(self) -> u32 {
        PRIMES[self as usize]
    }

    /// Returns the rank bound to the given prime.
    pub fn from_prime(prime: u32) -> Option<Rank> {
        PRIMES
            .iter()
            .position(|&p| p == prime)
            .and_then(|pos| Rank::ranks().nth(pos))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 8,
    /// Diamonds suit.
    Diamonds = 4,
    /// Hearts suit.
    Hearts = 2,
    /// Spades suit.
    Spades = 1,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    /// Returns the suit for a single bit suit flag.
    pub fn from_bits(bits: u32) -> Option<Suit> {
        match bits {
            0x8 => Some(Suit::Clubs),
            0x4 => Some(Suit::Diamonds),
            0x2 => Some(Suit::Hearts),
            0x1 => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// A cards Deck
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Panics if k is not 1 <= k <= 5.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((1..=5).contains(&k), "1 <= k <= 5");

        let n = self.cards.len();
        if k > n {
            return;
        }

        // Card positions of the current hand in increasing order.
        let mut pos = [0, 1, 2, 3, 4];
        let mut h = [self.cards[0]; 5];

        loop {
            for (idx, &p) in pos[..k].iter().enumerate() {
                h[idx] = self.cards[p];
            }

            f(&h[..k]);

            // Find the rightmost position that can still move right.
            let Some(j) = (0..k).rev().find(|&j| pos[j] < n - k + j) else {
                return;
            };

            pos[j] += 1;
            for i in (j + 1)..k {
                pos[i] = pos[i - 1] + 1;
            }
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;
    use rand::prelude::*;

    #[test]
    fn card_encoding() {
        let mut cards = HashSet::default();
        let mut deck = Deck::default().into_iter().collect::<Vec<_>>();
        deck.shuffle(&mut rand::rng());

        for card in deck {
            assert_eq!(card.id() & 0xFF, PRIMES[card.rank() as usize]);
            assert_eq!((card.id() >> 8) & 0xF, card.suit() as u32);
            assert_eq!(card.id() >> 12, 0);
            cards.insert(card.id());
        }

        // Check uniquness.
        assert_eq!(cards.len(), Deck::SIZE);

        let kd = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(kd.id(), 0x425);

        let fs = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(fs.id(), 0x107);

        let jc = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(jc.id(), 0x81d);

        let ah = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(ah.id(), 0x229);
    }

    #[test]
    fn card_decoding() {
        for suit in Suit::suits() {
            for rank in Rank::ranks() {
                let card = Card::try_from(Card::new(rank, suit).id()).unwrap();
                assert_eq!(card.rank(), rank);
                assert_eq!(card.suit(), suit);
                assert_eq!(card.prime(), rank.prime());
                assert_eq!(card.suit_bits(), suit as u32);
            }
        }
    }

    #[test]
    fn card_invalid_encoding() {
        // No suit.
        assert_eq!(Card::try_from(0x029u32), Err(CardError::InvalidEncoding(0x029)));
        // Two suits.
        assert_eq!(Card::try_from(0x329u32), Err(CardError::InvalidEncoding(0x329)));
        // Not a rank prime.
        assert_eq!(Card::try_from(0x104u32), Err(CardError::InvalidEncoding(0x104)));
        assert_eq!(Card::try_from(0x12bu32), Err(CardError::InvalidEncoding(0x12b)));
        // Bits above the suit.
        assert_eq!(Card::try_from(0x1129u32), Err(CardError::InvalidEncoding(0x1129)));
        assert!(Card::try_from(0u32).is_err());
    }

    #[test]
    fn rank_primes() {
        let primes = Rank::ranks().map(Rank::prime).collect::<Vec<_>>();
        assert_eq!(primes, PRIMES);
        assert!(primes.windows(2).all(|w| w[0] < w[1]));

        for rank in Rank::ranks() {
            assert_eq!(Rank::from_prime(rank.prime()), Some(rank));
        }

        assert_eq!(Rank::from_prime(1), None);
        assert_eq!(Rank::from_prime(4), None);
        assert_eq!(Rank::from_prime(43), None);
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "KD");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5S");

        let c = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(c.to_string(), "JC");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "TH");

        let c = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(c.to_string(), "AH");
    }

    #[test]
    fn card_from_string() {
        for card in Deck::default() {
            assert_eq!(card.to_string().parse::<Card>(), Ok(card));
        }

        assert_eq!("td".parse::<Card>(), Ok(Card::new(Rank::Ten, Suit::Diamonds)));
        assert_eq!("2c".parse::<Card>(), Ok(Card::new(Rank::Deuce, Suit::Clubs)));

        for s in ["", "A", "AX", "1S", "ASS", "10S"] {
            assert_eq!(
                s.parse::<Card>(),
                Err(CardError::InvalidString(s.to_string()))
            );
        }
    }

    #[test]
    fn card_serde() {
        type U32 = serde::de::value::U32Deserializer<serde::de::value::Error>;

        let card = Card::new(Rank::Queen, Suit::Hearts);
        assert_eq!(Card::deserialize(U32::new(card.id())), Ok(card));
        assert!(Card::deserialize(U32::new(0x30a)).is_err());
    }

    #[test]
    fn deck_for_each() {
        let deck = Deck::default();
        assert_eq!(deck.count(), Deck::SIZE);

        let mut hands = HashSet::default();
        deck.for_each(5, |cards| {
            assert_eq!(cards.len(), 5);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 2_598_960);

        hands.clear();
        deck.for_each(2, |cards| {
            assert_eq!(cards.len(), 2);
            assert_ne!(cards[0], cards[1]);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 1_326);

        hands.clear();
        deck.for_each(3, |cards| {
            assert_eq!(cards.len(), 3);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 22_100);

        let mut count = 0;
        deck.for_each(1, |_| count += 1);
        assert_eq!(count, Deck::SIZE);
    }

    #[test]
    #[should_panic]
    fn deck_for_each_too_many_cards() {
        Deck::default().for_each(6, |_| {});
    }
}
