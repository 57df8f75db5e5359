//! # pstars_hh
//!
//! Parse PokerStars hand history logs and compute per player statistics.
//!
//! The crate is split in two halves:
//!
//! - [`hand_history`] turns the raw text log into a stream of typed
//!   [`hand_history::HandRecord`] values, one per hand.
//! - [`stats`] wraps a record in a positional [`stats::Game`] view that
//!   answers poker specific questions (who opened, who three bet, did the
//!   big blind defend) and folds those answers across many hands into a
//!   [`stats::StatsSummary`].
//!
//! ## Usage
//!
//! ```
//! use pstars_hh::hand_history::parse;
//! use pstars_hh::stats::{aggregate, Game};
//!
//! let log = "\
//! PokerStars Game #1: Hold'em No Limit ($1/$2) - 2009/05/05 12:06:55 ET
//! Table 'Alpha' 3-max Seat #2 is the button
//! Seat 1: Alice ($100 in chips)
//! Seat 2: Bob ($100 in chips)
//! Seat 3: Carl ($100 in chips)
//! Alice: posts small blind $1
//! Bob: posts big blind $2
//! *** HOLE CARDS ***
//! Carl: raises $2 to $4
//! Alice: folds
//! Bob: calls $2
//! *** SUMMARY ***
//! Seat 3: Carl collected ($9)
//! ";
//!
//! let hands: Vec<_> = parse(log.as_bytes()).collect::<Result<_, _>>().unwrap();
//! let summary = aggregate("Carl", hands.iter().map(Game::new));
//!
//! assert_eq!(summary.counts.hands, 1);
//! assert_eq!(summary.rates.pfr_percent, 100.0);
//! ```
pub mod hand_history;
pub mod stats;
