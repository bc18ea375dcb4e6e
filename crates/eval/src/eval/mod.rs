// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator scores 5 cards hands using a [RankTable] keyed by the product
//! of the cards rank primes, as in the [Cactus Kev's][kevlink] evaluator.
//! Flushes and straight flushes share fingerprints with high cards and
//! straights, they are detected with the cards suit bits and scored by adding
//! the table bonuses to the base score.
//!
//! The [Evaluator] owns its table, use [Evaluator::new] to build a table,
//! [Evaluator::with_table] to inject one loaded from storage, or
//! [Evaluator::shared] for a process wide evaluator built on first use.
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
use std::sync::LazyLock;

use crate::{Card, Error, Rank, Result, Suit};

mod table;
pub use table::{RankTable, TOTAL_DISTINCT, fingerprint};

mod value;
pub use value::{HandRank, HandValue};

/// Process wide evaluator.
static SHARED: LazyLock<Result<Evaluator>> = LazyLock::new(Evaluator::new);

/// A 5 cards hand evaluator.
#[derive(Debug, Clone)]
pub struct Evaluator {
    table: RankTable,
}

impl Evaluator {
    /// Creates an evaluator building a new rank table.
    pub fn new() -> Result<Self> {
        RankTable::build().map(Self::with_table)
    }

    /// Creates an evaluator with a prebuilt rank table.
    pub fn with_table(table: RankTable) -> Self {
        Self { table }
    }

    /// Returns the process wide evaluator, the table is built only once.
    pub fn shared() -> Result<&'static Evaluator> {
        SHARED.as_ref().map_err(Clone::clone)
    }

    /// The evaluator rank table.
    pub fn table(&self) -> &RankTable {
        &self.table
    }

    /// Scores a 5 cards hand.
    ///
    /// Returns an error if the same card appears more than once or if the hand
    /// fingerprint is not in the table.
    pub fn score(&self, cards: &[Card; 5]) -> Result<HandValue> {
        for (pos, card) in cards.iter().enumerate() {
            if cards[pos + 1..].contains(card) {
                return Err(Error::DuplicateCard(*card));
            }
        }

        let fp = cards.iter().map(Card::prime).product::<u32>();
        let suits = cards.iter().fold(0xF, |acc, c| acc & c.suit_bits());

        let base = self
            .table
            .get(fp)
            .ok_or(Error::UnrecognizedHand(fp))?;

        let bonus = if suits == 0 {
            0
        } else if self.table.is_straight(fp) {
            self.table.straight_flush_bonus()
        } else {
            self.table.flush_bonus()
        };

        let value = base
            .checked_add(bonus)
            .ok_or(Error::UnrecognizedHand(fp))?;

        let rank = self
            .table
            .category(value)
            .ok_or(Error::UnrecognizedHand(fp))?;

        Ok(HandValue::new(rank, value))
    }

    /// Scores a hand of encoded cards, see [Card] for the encoding.
    pub fn score_ids(&self, ids: [u32; 5]) -> Result<HandValue> {
        let mut cards = [Card::new(Rank::Deuce, Suit::Clubs); 5];
        for (card, id) in cards.iter_mut().zip(ids) {
            *card = Card::try_from(id)?;
        }

        self.score(&cards)
    }
}
