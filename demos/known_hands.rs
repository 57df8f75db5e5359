use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use pstars_hh::hand_history::{parse, ParseError};
use pstars_hh::stats::Game;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "known_hands",
    about = "List the hole cards and winnings of every hand a player won with known cards"
)]
struct Args {
    /// Hand history file to read
    file: PathBuf,

    /// Player to report on
    player: String,
}

#[derive(Debug, Error)]
enum KnownHandsError {
    #[error("unable to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

fn main() -> Result<(), KnownHandsError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let file = File::open(&args.file).map_err(|source| KnownHandsError::Open {
        path: args.file.display().to_string(),
        source,
    })?;

    println!("cards\t\twinnings");
    // Hands are printed as they are parsed, nothing is kept around.
    for hand in parse(BufReader::new(file)) {
        let hand = hand?;
        if let Some((cards, won)) = Game::new(&hand).known_hand(&args.player) {
            println!("{cards}\t\t{won}");
        }
    }

    Ok(())
}
