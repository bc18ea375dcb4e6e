// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Pokerank cards types.
//!
//! This crate define types to create cards, each card is packed into an
//! integer with the suit flag and the prime number of its rank:
//!
//! ```
//! # use pokerank_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!(ah.id(), 0x229);
//! assert_eq!(Card::try_from(0x229u32), Ok(ah));
//! assert_eq!("Ah".parse::<Card>(), Ok(ah));
//! ```
//!
//! and a [Deck] type for iterating all k-cards hands in the deck:
//!
//! ```
//! # use pokerank_cards::Deck;
//! // Iterate through all 5 cards hands (2.6M hands).
//! let mut counter = 0;
//! Deck::default().for_each(5, |hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter += 1;
//! });
//! assert_eq!(counter, 2_598_960);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, CardError, Deck, Rank, Suit};
