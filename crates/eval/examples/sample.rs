// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --example sample
// Royal Flush                    AS KS QS JS TS  Straight Flush (7462)
// King-high Straight Flush       KS QS JS TS 9S  Straight Flush (7461)
// Four Aces with King            AS AH AD AC KS  Four of a Kind (7452)
//
// $ cargo r --example sample -- 5h 4d 3c 2s ah
// 5H 4D 3C 2S AH  Straight (5854)
// ```
use anyhow::{Result, bail};
use clap::Parser;
use log::info;

use pokerank_eval::*;

#[derive(Debug, Parser)]
struct Cli {
    /// Five cards to score, for example "AS KD 7H 7C 2S".
    cards: Vec<Card>,
    /// Print the hand value as JSON.
    #[clap(long)]
    json: bool,
}

fn print_hand(label: &str, cards: &[Card; 5], json: bool) -> Result<()> {
    let value = Evaluator::shared()?.score(cards)?;
    let cards = cards.map(|c| c.to_string()).join(" ");

    if json {
        let out = serde_json::json!({ "cards": cards, "value": value });
        println!("{out}");
    } else if label.is_empty() {
        println!("{cards}  {value}");
    } else {
        println!("{label:<30} {cards}  {value}");
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.cards.len() {
        0 => {
            info!("Scoring sample hands");

            let samples = [
                ("Royal Flush", "AS KS QS JS TS"),
                ("King-high Straight Flush", "KS QS JS TS 9S"),
                ("Four Aces with King", "AS AH AD AC KS"),
            ];

            for (label, hand) in samples {
                let cards = hand
                    .split_whitespace()
                    .map(str::parse)
                    .collect::<Result<Vec<Card>, _>>()?;
                let cards: [Card; 5] = cards.try_into().map_err(|_| anyhow::anyhow!("{hand}"))?;
                print_hand(label, &cards, cli.json)?;
            }
        }
        5 => {
            let cards: [Card; 5] = [
                cli.cards[0],
                cli.cards[1],
                cli.cards[2],
                cli.cards[3],
                cli.cards[4],
            ];
            print_hand("", &cards, cli.json)?;
        }
        n => bail!("Expected 5 cards, got {n}"),
    }

    Ok(())
}
