// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rank table construction.
//!
//! The table maps the product of the five rank primes of a hand, its
//! fingerprint, to a score. Each hand category takes a block of consecutive
//! scores, from the strongest category at the top down to 1:
//!
//! ```text
//!   straight flush   reserved, same fingerprints as straights
//!   four of a kind
//!   full house
//!   flush            reserved, same fingerprints as high cards
//!   straight
//!   three of a kind
//!   two pair
//!   one pair
//!   high card
//! ```
//!
//! A suited hand is scored by adding to its base score the distance between
//! the reserved block and the block that holds its fingerprint.
use ahash::{AHashMap, AHashSet};
use log::{debug, info, warn};
use pokerank_cards::Rank;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::ops::RangeInclusive;

use super::HandRank;
use crate::{Error, Result};

/// The number of distinct 5 cards hand values.
pub const TOTAL_DISTINCT: u16 = 7462;

/// Ranks of a hand pattern, suits are not relevant.
type Pattern = Vec<Rank>;

/// Scores assigned to a category during the build.
enum Block {
    /// Scores with no entries, used by suited hands.
    Reserved(usize),
    /// Patterns from strongest to weakest.
    Patterns(Vec<Pattern>),
}

impl Block {
    fn len(&self) -> usize {
        match self {
            Block::Reserved(len) => *len,
            Block::Patterns(patterns) => patterns.len(),
        }
    }
}

/// Immutable mapping from a hand fingerprint to its base score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable {
    entries: AHashMap<u32, u16>,
    spans: [RangeInclusive<u16>; HandRank::COUNT],
    straights: Vec<u32>,
    straight_flush_bonus: u16,
    flush_bonus: u16,
}

impl RankTable {
    /// Builds the table enumerating all distinct 5 ranks patterns.
    pub fn build() -> Result<Self> {
        let straights = straights();
        let straight_fingerprints = straights
            .iter()
            .map(Vec::as_slice)
            .map(fingerprint)
            .collect::<Vec<_>>();
        let high_cards = high_cards(&straight_fingerprints);

        let blocks = [
            (HandRank::StraightFlush, Block::Reserved(straights.len())),
            (HandRank::FourOfAKind, Block::Patterns(four_of_a_kind())),
            (HandRank::FullHouse, Block::Patterns(full_house())),
            (HandRank::Flush, Block::Reserved(high_cards.len())),
            (HandRank::Straight, Block::Patterns(straights)),
            (HandRank::ThreeOfAKind, Block::Patterns(three_of_a_kind())),
            (HandRank::TwoPair, Block::Patterns(two_pair())),
            (HandRank::OnePair, Block::Patterns(one_pair())),
            (HandRank::HighCard, Block::Patterns(high_cards)),
        ];

        let total = blocks.iter().map(|(_, block)| block.len()).sum::<usize>();
        let mut value = u16::try_from(total)
            .map_err(|_| Error::InvalidTable(format!("{total} scores overflow")))?;

        let mut entries = AHashMap::with_capacity(total);
        let mut spans: [RangeInclusive<u16>; HandRank::COUNT] = std::array::from_fn(|_| 1..=0);

        for (rank, block) in blocks {
            let high = value;

            match block {
                Block::Reserved(len) => value -= len as u16,
                Block::Patterns(patterns) => {
                    for pattern in patterns {
                        let fp = fingerprint(&pattern);
                        if entries.insert(fp, value).is_some() {
                            return Err(Error::DuplicateFingerprint(fp));
                        }

                        value -= 1;
                    }
                }
            }

            debug!("{rank} scores {}..={high}", value + 1);
            spans[rank as usize] = (value + 1)..=high;
        }

        let table = Self::new(entries, spans, straight_fingerprints)?;
        info!(
            "Rank table built with {} entries, flush bonus {} straight flush bonus {}",
            table.len(),
            table.flush_bonus,
            table.straight_flush_bonus
        );

        Ok(table)
    }

    /// Creates a table checking all its invariants.
    fn new(
        entries: AHashMap<u32, u16>,
        spans: [RangeInclusive<u16>; HandRank::COUNT],
        straights: Vec<u32>,
    ) -> Result<Self> {
        let invalid = |msg: String| Err(Error::InvalidTable(msg));
        let span = |rank: HandRank| &spans[rank as usize];
        let size = |rank: HandRank| span(rank).clone().count();

        let mut next = 1u16;
        for rank in HandRank::ranks() {
            let s = span(rank);
            if s.is_empty() || *s.start() != next {
                return invalid(format!("{rank} scores {s:?} are not contiguous"));
            }

            next = s.end().saturating_add(1);
        }

        let total = *span(HandRank::StraightFlush).end();
        if total != TOTAL_DISTINCT {
            return invalid(format!("{total} distinct scores, expected {TOTAL_DISTINCT}"));
        }

        if size(HandRank::StraightFlush) != size(HandRank::Straight) {
            return invalid("straight flush and straight sizes differ".to_string());
        }

        if size(HandRank::Flush) != size(HandRank::HighCard) {
            return invalid("flush and high card sizes differ".to_string());
        }

        let expected = total as usize - size(HandRank::StraightFlush) - size(HandRank::Flush);
        if entries.len() != expected {
            return invalid(format!("{} entries, expected {expected}", entries.len()));
        }

        // Straights from the ace high down to the wheel.
        let canonical = self::straights();
        if straights.len() != size(HandRank::Straight)
            || !straights
                .iter()
                .zip(&canonical)
                .all(|(&fp, pattern)| fp == fingerprint(pattern))
        {
            return invalid(format!("{} straights do not match", straights.len()));
        }

        // Each score must be in the span of its fingerprint pattern.
        let mut values = AHashSet::with_capacity(entries.len());
        let mut scored = Vec::with_capacity(entries.len());
        for (&fp, &value) in &entries {
            let groups = rank_groups(fp);
            let shape = groups
                .as_deref()
                .and_then(|g| pattern_rank(g, straights.contains(&fp)));
            let rank = HandRank::ranks().find(|&rank| span(rank).contains(&value));

            match (rank, shape, groups) {
                (Some(rank), Some(shape), Some(groups)) if rank == shape && values.insert(value) => {
                    scored.push((value, rank, groups));
                }
                _ => return invalid(format!("fingerprint {fp} has invalid score {value}")),
            }
        }

        // Within a span weaker patterns get lower scores.
        scored.sort_unstable_by_key(|(value, ..)| *value);
        for w in scored.windows(2) {
            let ((v0, r0, g0), (v1, r1, g1)) = (&w[0], &w[1]);
            if r0 == r1 && *r0 != HandRank::Straight && g0 >= g1 {
                return invalid(format!("{r0} scores {v0} and {v1} out of order"));
            }
        }

        for (pos, fp) in straights.iter().enumerate() {
            let expected = span(HandRank::Straight).end() - pos as u16;
            if entries.get(fp) != Some(&expected) {
                return invalid(format!("straight {fp} not scored {expected}"));
            }
        }

        let straight_flush_bonus =
            span(HandRank::StraightFlush).end() - span(HandRank::Straight).end();
        let flush_bonus = span(HandRank::Flush).end() - span(HandRank::HighCard).end();

        Ok(Self {
            entries,
            spans,
            straights,
            straight_flush_bonus,
            flush_bonus,
        })
    }

    /// Removes a fingerprint skipping validation.
    #[cfg(test)]
    pub(crate) fn without(mut self, fingerprint: u32) -> Self {
        self.entries.remove(&fingerprint);
        self
    }

    fn from_raw(raw: RawTable) -> Result<Self> {
        let mut entries = AHashMap::with_capacity(raw.entries.len());
        for (fp, value) in raw.entries {
            if entries.insert(fp, value).is_some() {
                return Err(Error::DuplicateFingerprint(fp));
            }
        }

        Self::new(entries, raw.spans, raw.straights)
    }

    /// The number of fingerprints in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the table is empty, a valid table never is.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highest score.
    pub fn total(&self) -> u16 {
        *self.spans[HandRank::StraightFlush as usize].end()
    }

    /// Returns the base score for a fingerprint.
    #[inline]
    pub fn get(&self, fingerprint: u32) -> Option<u16> {
        self.entries.get(&fingerprint).copied()
    }

    /// Checks if a fingerprint is one of the straights.
    #[inline]
    pub fn is_straight(&self, fingerprint: u32) -> bool {
        self.straights.contains(&fingerprint)
    }

    /// The straights fingerprints from ace high down to five high.
    pub fn straights(&self) -> &[u32] {
        &self.straights
    }

    /// The score added to a straight base score when all cards are suited.
    pub fn straight_flush_bonus(&self) -> u16 {
        self.straight_flush_bonus
    }

    /// The score added to a high card base score when all cards are suited.
    pub fn flush_bonus(&self) -> u16 {
        self.flush_bonus
    }

    /// The scores of a hand category.
    pub fn span(&self, rank: HandRank) -> RangeInclusive<u16> {
        self.spans[rank as usize].clone()
    }

    /// Returns the category of a score.
    pub fn category(&self, value: u16) -> Option<HandRank> {
        HandRank::ranks().find(|&rank| self.spans[rank as usize].contains(&value))
    }
}

/// Serialized form of a [RankTable].
#[derive(Serialize, Deserialize)]
struct RawTable {
    entries: Vec<(u32, u16)>,
    spans: [RangeInclusive<u16>; HandRank::COUNT],
    straights: Vec<u32>,
}

impl Serialize for RankTable {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut entries = self.entries.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1));

        RawTable {
            entries,
            spans: self.spans.clone(),
            straights: self.straights.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RankTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawTable::deserialize(deserializer)?;
        Self::from_raw(raw)
            .inspect_err(|e| warn!("Rejected rank table: {e}"))
            .map_err(de::Error::custom)
    }
}

/// Returns the fingerprint of a list of ranks.
pub fn fingerprint(ranks: &[Rank]) -> u32 {
    ranks.iter().map(|r| r.prime()).product()
}

/// Splits a fingerprint into groups of (count, rank index), the largest group
/// first and then by rank. Returns None if the fingerprint is not the product
/// of five rank primes.
fn rank_groups(fp: u32) -> Option<Vec<(u8, usize)>> {
    if fp == 0 {
        return None;
    }

    let mut rest = fp;
    let mut groups = Vec::with_capacity(5);
    for rank in Rank::ranks() {
        let mut count = 0u8;
        while rest % rank.prime() == 0 && count < 5 {
            rest /= rank.prime();
            count += 1;
        }

        if count > 0 {
            groups.push((count, rank as usize));
        }
    }

    groups.sort_unstable_by(|a, b| b.cmp(a));
    let cards = groups.iter().map(|&(count, _)| count as usize).sum::<usize>();
    (rest == 1 && cards == 5).then_some(groups)
}

/// The unsuited category of a pattern given its rank groups.
fn pattern_rank(groups: &[(u8, usize)], straight: bool) -> Option<HandRank> {
    let counts = groups.iter().map(|&(count, _)| count).collect::<Vec<_>>();
    match counts.as_slice() {
        [4, 1] => Some(HandRank::FourOfAKind),
        [3, 2] => Some(HandRank::FullHouse),
        [3, 1, 1] => Some(HandRank::ThreeOfAKind),
        [2, 2, 1] => Some(HandRank::TwoPair),
        [2, 1, 1, 1] => Some(HandRank::OnePair),
        [1, 1, 1, 1, 1] if straight => Some(HandRank::Straight),
        [1, 1, 1, 1, 1] => Some(HandRank::HighCard),
        _ => None,
    }
}

/// All ranks from ace down to deuce.
fn descending() -> Vec<Rank> {
    Rank::ranks().rev().collect()
}

/// Ranks from ace down to deuce without the excluded ones.
fn others(excluded: &[Rank]) -> Vec<Rank> {
    descending()
        .into_iter()
        .filter(|r| !excluded.contains(r))
        .collect()
}

/// Returns the k-subsets of ranks in lexicographic order of their positions.
fn combinations(ranks: &[Rank], k: usize) -> Vec<Pattern> {
    if k == 0 {
        return vec![vec![]];
    }

    let mut out = Vec::new();
    for (pos, &rank) in ranks.iter().enumerate() {
        for tail in combinations(&ranks[pos + 1..], k - 1) {
            let mut pattern = Vec::with_capacity(k);
            pattern.push(rank);
            pattern.extend(tail);
            out.push(pattern);
        }
    }

    out
}

fn four_of_a_kind() -> Vec<Pattern> {
    descending()
        .into_iter()
        .flat_map(|quad| {
            others(&[quad])
                .into_iter()
                .map(move |kicker| vec![quad, quad, quad, quad, kicker])
        })
        .collect()
}

fn full_house() -> Vec<Pattern> {
    descending()
        .into_iter()
        .flat_map(|trips| {
            others(&[trips])
                .into_iter()
                .map(move |pair| vec![trips, trips, trips, pair, pair])
        })
        .collect()
}

fn straights() -> Vec<Pattern> {
    let mut straights = descending().windows(5).map(<[Rank]>::to_vec).collect::<Vec<_>>();

    // The wheel, the ace plays low.
    straights.push(vec![Rank::Five, Rank::Four, Rank::Trey, Rank::Deuce, Rank::Ace]);
    straights
}

fn three_of_a_kind() -> Vec<Pattern> {
    descending()
        .into_iter()
        .flat_map(|trips| {
            combinations(&others(&[trips]), 2)
                .into_iter()
                .map(move |kickers| [vec![trips; 3], kickers].concat())
        })
        .collect()
}

fn two_pair() -> Vec<Pattern> {
    combinations(&descending(), 2)
        .into_iter()
        .flat_map(|pairs| {
            let (high, low) = (pairs[0], pairs[1]);
            others(&pairs)
                .into_iter()
                .map(move |kicker| vec![high, high, low, low, kicker])
        })
        .collect()
}

fn one_pair() -> Vec<Pattern> {
    descending()
        .into_iter()
        .flat_map(|pair| {
            combinations(&others(&[pair]), 3)
                .into_iter()
                .map(move |kickers| [vec![pair; 2], kickers].concat())
        })
        .collect()
}

fn high_cards(straights: &[u32]) -> Vec<Pattern> {
    combinations(&descending(), 5)
        .into_iter()
        .filter(|pattern| !straights.contains(&fingerprint(pattern)))
        .collect()
}
