//! # PokerStars Hand History Parsing
//!
//! This module turns a PokerStars text log into typed hand records.
//!
//! ## Features
//!
//! - **Action Grammar**: [`ActionEvent::parse`] classifies a single action
//!   fragment such as `raises $2 to $4`.
//! - **Data Model**: [`HandRecord`] holds everything recovered from one hand.
//! - **Parser**: [`Parser`] is a line by line state machine yielding one
//!   finished [`HandRecord`] per hand header, lazily and in file order.
//! - **Serialization**: With the `serde` feature every record type can be
//!   converted to JSON.
//!
//! ## Leniency
//!
//! Lines that do not match any shape expected in the current section are
//! skipped. A capture that cannot be resolved (for example a summary line
//! naming a player that never sat down) leaves the affected field untouched.
//! The only error the parser reports is a failure of the underlying reader.
mod action;
mod config;
mod errors;
mod parser;
mod patterns;
mod record;
mod street;

#[cfg(test)]
pub(crate) mod test_util;

pub use action::*;
pub use config::*;
pub use errors::*;
pub use parser::{parse, LineUpdate, Parser, ParserState, SeatOutcome};
pub use record::{Bets, GameInfo, HandRecord};
pub use street::*;
