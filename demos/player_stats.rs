use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use pstars_hh::hand_history::{ParseError, Parser as HandParser, ParserConfig};
use pstars_hh::stats::try_aggregate;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "player_stats",
    about = "Print summary statistics for one player of a PokerStars hand history"
)]
struct Args {
    /// Hand history file to read
    file: PathBuf,

    /// Player to report on
    player: String,

    /// Extra text that marks a new hand; may be repeated
    #[arg(long = "hand-marker")]
    hand_markers: Vec<String>,

    /// Print the full summary as JSON instead of a table row
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum PlayerStatsError {
    #[error("unable to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() -> Result<(), PlayerStatsError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let file = File::open(&args.file).map_err(|source| PlayerStatsError::Open {
        path: args.file.display().to_string(),
        source,
    })?;

    let mut config = ParserConfig::default();
    config.hand_markers.extend(args.hand_markers);
    let parser = HandParser::with_config(BufReader::new(file), config)?;
    let summary = try_aggregate(&args.player, parser)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let rates = &summary.rates;
    println!("VP$IP\tPFR\tAf\tCC\tWTSD\tWSD\tH\tW\tWWSD");
    println!(
        "{:.1}\t{:.1}\t{:.2}\t{:.1}\t{:.1}\t{:.1}\t{}\t{:.1}\t{:.1}",
        rates.vpip_percent,
        rates.pfr_percent,
        rates.aggression_factor,
        rates.cold_call_percent,
        rates.wtsd_percent,
        rates.wsd_percent,
        summary.counts.hands,
        rates.won_percent,
        rates.won_without_showdown_percent,
    );

    Ok(())
}
