//! # Player Statistics
//!
//! [`Game`] is a positional view over one parsed hand that answers questions
//! about a named player. [`PlayerStats`] folds those answers over many hands
//! and [`aggregate`] turns a sequence of games into a [`StatsSummary`].
//!
//! [`try_aggregate`] takes the parser's output directly and holds one hand
//! at a time, so a whole log can be aggregated straight off the parser.
mod aggregator;
mod game;

pub use aggregator::*;
pub use game::*;
