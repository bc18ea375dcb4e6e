// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluator errors.
use pokerank_cards::{Card, CardError};
use thiserror::Error;

/// Errors returned by the table builder and the hand scorer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A card integer is not a valid encoding.
    #[error(transparent)]
    Card(#[from] CardError),
    /// The same card appears more than once in a hand.
    #[error("Duplicate card {0} in hand")]
    DuplicateCard(Card),
    /// The hand fingerprint is not in the rank table.
    #[error("Unrecognized hand with fingerprint {0}")]
    UnrecognizedHand(u32),
    /// Two patterns map to the same fingerprint.
    #[error("Duplicate fingerprint {0} in rank table")]
    DuplicateFingerprint(u32),
    /// The rank table breaks one of its invariants.
    #[error("Invalid rank table: {0}")]
    InvalidTable(String),
}

/// Result type for evaluator operations.
pub type Result<T> = std::result::Result<T, Error>;
