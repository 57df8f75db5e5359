use tracing::{instrument, trace};

use super::game::{Aggression, Game};
use crate::hand_history::HandRecord;

/// Running counters for one player across many hands.
///
/// Only hands the player was in play for are counted. Every field is a raw
/// count so that totals from different sessions can be merged; the
/// percentages are derived on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    /// Hands the player acted in preflop
    pub hands: usize,
    /// Voluntarily put money in the pot
    pub vpip: usize,
    /// Raised preflop
    pub pfr: usize,
    /// Went to show down
    pub wtsd: usize,
    /// Won at show down
    pub wsd: usize,
    pub saw_flop: usize,
    /// Won any part of the pot
    pub won: usize,
    pub cold_calls: usize,
    pub aggression: Aggression,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one hand into the totals.
    ///
    /// Returns `false`, leaving the totals alone, when the player did not
    /// act preflop in this hand.
    pub fn record(&mut self, game: &Game<'_>, player: &str) -> bool {
        if !game.in_play(player) {
            return false;
        }

        self.hands += 1;
        if game.voluntarily_entered(player) {
            self.vpip += 1;
        }
        if game.raised(player) {
            self.pfr += 1;
        }
        if game.went_to_showdown(player) {
            self.wtsd += 1;
        }
        if game.won_at_showdown(player) {
            self.wsd += 1;
        }
        if game.saw_flop(player) {
            self.saw_flop += 1;
        }
        if game.won(player) {
            self.won += 1;
        }
        if game.cold_called(player) {
            self.cold_calls += 1;
        }
        self.aggression.merge(&game.aggression(player));

        trace!(hand_id = game.record().id, player, hands = self.hands, "Recorded hand");
        true
    }

    /// Merge counts from another PlayerStats
    pub fn merge(&mut self, other: &PlayerStats) {
        self.hands += other.hands;
        self.vpip += other.vpip;
        self.pfr += other.pfr;
        self.wtsd += other.wtsd;
        self.wsd += other.wsd;
        self.saw_flop += other.saw_flop;
        self.won += other.won;
        self.cold_calls += other.cold_calls;
        self.aggression.merge(&other.aggression);
    }

    /// Calculate VPIP percentage
    pub fn vpip_percent(&self) -> f64 {
        percentage(self.vpip, self.hands)
    }

    /// Calculate PFR (Pre-Flop Raise) percentage
    pub fn pfr_percent(&self) -> f64 {
        percentage(self.pfr, self.hands)
    }

    /// Cold calls per flop seen
    pub fn cold_call_percent(&self) -> f64 {
        percentage(self.cold_calls, self.saw_flop)
    }

    /// Went to show down per flop seen
    pub fn wtsd_percent(&self) -> f64 {
        percentage(self.wtsd, self.saw_flop)
    }

    /// Won at show down per show down reached
    pub fn wsd_percent(&self) -> f64 {
        percentage(self.wsd, self.wtsd)
    }

    pub fn won_percent(&self) -> f64 {
        percentage(self.won, self.hands)
    }

    /// Pots taken down without a show down
    pub fn won_without_showdown_percent(&self) -> f64 {
        percentage(self.won.saturating_sub(self.wsd), self.hands)
    }

    /// Calculate aggression factor
    /// (raises + bets) / calls
    pub fn aggression_factor(&self) -> f64 {
        self.aggression.factor()
    }

    pub fn rates(&self) -> DerivedRates {
        DerivedRates {
            vpip_percent: self.vpip_percent(),
            pfr_percent: self.pfr_percent(),
            aggression_factor: self.aggression_factor(),
            cold_call_percent: self.cold_call_percent(),
            wtsd_percent: self.wtsd_percent(),
            wsd_percent: self.wsd_percent(),
            won_percent: self.won_percent(),
            won_without_showdown_percent: self.won_without_showdown_percent(),
        }
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Percentages computed from a [`PlayerStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedRates {
    pub vpip_percent: f64,
    pub pfr_percent: f64,
    pub aggression_factor: f64,
    pub cold_call_percent: f64,
    pub wtsd_percent: f64,
    pub wsd_percent: f64,
    pub won_percent: f64,
    pub won_without_showdown_percent: f64,
}

/// Final counts and rates for one player.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSummary {
    pub player: String,
    pub counts: PlayerStats,
    pub rates: DerivedRates,
}

impl StatsSummary {
    pub fn new(player: &str, counts: PlayerStats) -> Self {
        Self {
            player: player.to_string(),
            rates: counts.rates(),
            counts,
        }
    }
}

/// Fold every hand into a summary for `player`.
///
/// ```
/// use pstars_hh::stats::{aggregate, Game};
/// use pstars_hh::hand_history::HandRecord;
///
/// let hands: Vec<HandRecord> = Vec::new();
/// let summary = aggregate("Alice", hands.iter().map(Game::new));
/// assert_eq!(summary.counts.hands, 0);
/// assert_eq!(summary.rates.vpip_percent, 0.0);
/// ```
#[instrument(level = "debug", skip(games))]
pub fn aggregate<'a, I>(player: &str, games: I) -> StatsSummary
where
    I: IntoIterator<Item = Game<'a>>,
{
    let mut counts = PlayerStats::new();
    for game in games {
        counts.record(&game, player);
    }
    StatsSummary::new(player, counts)
}

/// Fold hands into a summary for `player` as they come off a parser.
///
/// Each record is dropped as soon as it has been counted, so memory does not
/// grow with the length of the log. The first `Err` stops the fold and is
/// returned.
///
/// ```
/// use pstars_hh::hand_history::parse;
/// use pstars_hh::stats::try_aggregate;
///
/// let log = "\
/// PokerStars Game #1: Hold'em No Limit ($1/$2) - 2009/05/05 12:06:55 ET
/// Seat 1: Alice ($100 in chips)
/// *** HOLE CARDS ***
/// Alice: raises $2 to $4
/// ";
///
/// let summary = try_aggregate("Alice", parse(log.as_bytes())).unwrap();
/// assert_eq!(summary.counts.pfr, 1);
/// ```
#[instrument(level = "debug", skip(hands))]
pub fn try_aggregate<I, E>(player: &str, hands: I) -> Result<StatsSummary, E>
where
    I: IntoIterator<Item = Result<HandRecord, E>>,
{
    let mut counts = PlayerStats::new();
    for hand in hands {
        let hand = hand?;
        counts.record(&Game::new(&hand), player);
    }
    Ok(StatsSummary::new(player, counts))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::hand_history::test_util::{session, THREE_BET_HAND};
    use crate::hand_history::test_util::OPEN_RAISE_HAND;
    use crate::hand_history::{parse, Result};

    fn hands(text: &str) -> Vec<HandRecord> {
        parse(text.as_bytes()).collect::<Result<_>>().unwrap()
    }

    #[test_log::test]
    fn test_session_for_carl() {
        let hands = hands(&session());
        let summary = aggregate("Carl", hands.iter().map(Game::new));
        let counts = &summary.counts;

        assert_eq!(summary.player, "Carl");
        assert_eq!(counts.hands, 3);
        // Open raise, open raise, big blind check
        assert_eq!(counts.vpip, 2);
        assert_eq!(counts.pfr, 2);
        assert_eq!(counts.saw_flop, 3);
        assert_eq!(counts.wtsd, 1);
        assert_eq!(counts.wsd, 1);
        assert_eq!(counts.won, 3);
        assert_eq!(counts.cold_calls, 0);
        // Hand 1 raise; hand 2 raise, call, call, raise; hand 3 bet
        assert_eq!(
            counts.aggression,
            Aggression {
                bets_raises: 4,
                calls: 2
            }
        );

        let rates = &summary.rates;
        assert_relative_eq!(rates.vpip_percent, 200.0 / 3.0);
        assert_relative_eq!(rates.pfr_percent, 200.0 / 3.0);
        assert_relative_eq!(rates.aggression_factor, 2.0);
        assert_relative_eq!(rates.wtsd_percent, 100.0 / 3.0);
        assert_relative_eq!(rates.wsd_percent, 100.0);
        assert_relative_eq!(rates.won_percent, 100.0);
        assert_relative_eq!(rates.won_without_showdown_percent, 200.0 / 3.0);
        assert_eq!(rates.cold_call_percent, 0.0);
    }

    #[test]
    fn test_session_for_bob() {
        let hands = hands(&session());
        let summary = aggregate("Bob", hands.iter().map(Game::new));
        let counts = &summary.counts;

        assert_eq!(counts.hands, 3);
        // Called the open, folded to the three bet, limped
        assert_eq!(counts.vpip, 2);
        assert_eq!(counts.pfr, 0);
        assert_eq!(counts.saw_flop, 2);
        assert_eq!(counts.cold_calls, 2);
        assert_eq!(counts.won, 0);
        assert_relative_eq!(summary.rates.cold_call_percent, 100.0);
        assert_eq!(summary.rates.wsd_percent, 0.0);
    }

    #[test]
    fn test_hands_out_of_play_are_skipped() {
        let hands = hands(THREE_BET_HAND);
        let mut stats = PlayerStats::new();
        assert!(!stats.record(&Game::new(&hands[0]), "Nobody"));
        assert_eq!(stats, PlayerStats::default());

        assert!(stats.record(&Game::new(&hands[0]), "Alice"));
        assert_eq!(stats.hands, 1);
    }

    #[test]
    fn test_aggression_factor_with_calls() {
        let mut stats = PlayerStats::new();
        stats.aggression = Aggression {
            bets_raises: 1,
            calls: 2,
        };
        assert_relative_eq!(stats.aggression_factor(), 0.5);
    }

    #[test]
    fn test_aggression_factor_no_calls() {
        let mut stats = PlayerStats::new();
        stats.aggression.bets_raises = 5;
        assert_eq!(stats.aggression_factor(), 0.0);
    }

    #[test]
    fn test_edge_case_empty_stats() {
        let stats = PlayerStats::new();
        assert_eq!(stats.rates(), DerivedRates::default());
    }

    #[test]
    fn test_merge_stats() {
        let mut stats1 = PlayerStats::new();
        stats1.hands = 5;
        stats1.vpip = 3;
        stats1.aggression.calls = 2;

        let mut stats2 = PlayerStats::new();
        stats2.hands = 3;
        stats2.vpip = 2;
        stats2.wsd = 1;
        stats2.aggression.bets_raises = 4;

        stats1.merge(&stats2);

        assert_eq!(stats1.hands, 8);
        assert_eq!(stats1.vpip, 5);
        assert_eq!(stats1.wsd, 1);
        assert_eq!(
            stats1.aggression,
            Aggression {
                bets_raises: 4,
                calls: 2
            }
        );
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let hands = hands(&session());
        let whole = aggregate("Alice", hands.iter().map(Game::new));

        let mut split = aggregate("Alice", hands[..1].iter().map(Game::new)).counts;
        split.merge(&aggregate("Alice", hands[1..].iter().map(Game::new)).counts);

        assert_eq!(whole.counts, split);
    }

    #[test_log::test]
    fn test_try_aggregate_streams_off_the_parser() {
        let session = session();
        let streamed = try_aggregate("Carl", parse(session.as_bytes())).unwrap();

        let hands = hands(&session);
        let collected = aggregate("Carl", hands.iter().map(Game::new));
        assert_eq!(streamed, collected);
    }

    #[test]
    fn test_try_aggregate_stops_at_first_error() {
        let hand = hands(OPEN_RAISE_HAND).remove(0);
        let stream = vec![Ok(hand.clone()), Err("reader failed"), Ok(hand)];
        assert_eq!(try_aggregate("Carl", stream), Err("reader failed"));

        let empty: Vec<std::result::Result<HandRecord, &str>> = Vec::new();
        let summary = try_aggregate("Carl", empty).unwrap();
        assert_eq!(summary.counts, PlayerStats::default());
    }

    #[test]
    fn test_won_without_showdown_never_negative() {
        let mut stats = PlayerStats::new();
        stats.hands = 2;
        stats.wsd = 1;
        assert_eq!(stats.won_without_showdown_percent(), 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_summary_serializes() {
        let hands = hands(THREE_BET_HAND);
        let summary = aggregate("Alice", hands.iter().map(Game::new));
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["player"], "Alice");
        assert_eq!(value["counts"]["hands"], 1);
        assert_eq!(value["counts"]["aggression"]["bets_raises"], 3);
    }
}
