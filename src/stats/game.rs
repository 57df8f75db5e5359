use std::collections::BTreeMap;

use crate::hand_history::{ActionEvent, HandRecord, Street};

/// Aggressive versus passive actions of one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aggression {
    /// Number of bets and raises
    pub bets_raises: usize,
    /// Number of calls
    pub calls: usize,
}

impl Aggression {
    fn count<'a>(events: impl IntoIterator<Item = &'a ActionEvent>) -> Self {
        events
            .into_iter()
            .fold(Aggression::default(), |mut total, event| {
                if event.is_aggressive() {
                    total.bets_raises += 1;
                } else if event.is_call() {
                    total.calls += 1;
                }
                total
            })
    }

    pub fn merge(&mut self, other: &Aggression) {
        self.bets_raises += other.bets_raises;
        self.calls += other.calls;
    }

    /// (bets + raises) / calls, or 0.0 without any calls
    pub fn factor(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.bets_raises as f64 / self.calls as f64
        }
    }
}

impl From<Aggression> for (usize, usize) {
    fn from(aggression: Aggression) -> Self {
        (aggression.bets_raises, aggression.calls)
    }
}

/// A read only, position aware view of one [`HandRecord`].
///
/// On construction the seats are put in preflop acting order: sorted by seat
/// number and rotated so the list starts three seats after the button, the
/// first player to act preflop. Every "first" or "second" in the queries
/// below refers to that order rather than to the order lines appeared in
/// the log.
///
/// Queries taking a player name treat a name that is not seated at the
/// table as a player that did nothing.
#[derive(Debug, Clone)]
pub struct Game<'a> {
    record: &'a HandRecord,
    acting_order: Vec<&'a str>,
    seats: BTreeMap<&'a str, u32>,
    preflop_raisers: Vec<&'a str>,
}

impl<'a> Game<'a> {
    pub fn new(record: &'a HandRecord) -> Self {
        let positions: Vec<u32> = record.seats.keys().copied().collect();
        let mut acting_order: Vec<&'a str> = Vec::with_capacity(positions.len());

        if !positions.is_empty() {
            let dealer_idx = record
                .button_seat
                .and_then(|button| positions.iter().position(|&seat| seat == button))
                .unwrap_or(0);
            let first_to_act = (dealer_idx + 3) % positions.len();

            acting_order.extend(
                positions[first_to_act..]
                    .iter()
                    .chain(&positions[..first_to_act])
                    .filter_map(|seat| record.seats.get(seat))
                    .map(String::as_str),
            );
        }

        // Lowest seat wins for a repeated name, as with HandRecord::seat_of
        let seats = record
            .seats
            .iter()
            .rev()
            .map(|(&seat, name)| (name.as_str(), seat))
            .collect();

        let mut game = Self {
            record,
            acting_order,
            seats,
            preflop_raisers: Vec::new(),
        };
        game.preflop_raisers = game
            .acting_order
            .iter()
            .copied()
            .filter(|player| {
                game.first_preflop(player)
                    .is_some_and(ActionEvent::is_aggressive)
            })
            .collect();
        game
    }

    pub fn record(&self) -> &'a HandRecord {
        self.record
    }

    /// Player names in preflop acting order.
    pub fn acting_order(&self) -> &[&'a str] {
        &self.acting_order
    }

    fn seat(&self, player: &str) -> Option<u32> {
        self.seats.get(player).copied()
    }

    fn preflop(&self, player: &str) -> &'a [ActionEvent] {
        let record = self.record;
        self.seat(player)
            .map(|seat| record.preflop_actions(seat))
            .unwrap_or(&[])
    }

    fn first_preflop(&self, player: &str) -> Option<&'a ActionEvent> {
        self.preflop(player).first()
    }

    /// Did the player act at all preflop.
    pub fn in_play(&self, player: &str) -> bool {
        !self.preflop(player).is_empty()
    }

    /// Players whose first preflop action was a bet or a raise, in acting
    /// order.
    pub fn preflop_raisers(&self) -> &[&'a str] {
        &self.preflop_raisers
    }

    pub fn open_raiser(&self) -> Option<&'a str> {
        self.preflop_raisers.first().copied()
    }

    pub fn second_raiser(&self) -> Option<&'a str> {
        self.preflop_raisers.get(1).copied()
    }

    pub fn three_bet_pot(&self) -> bool {
        self.preflop_raisers.len() >= 2
    }

    pub fn raised(&self, player: &str) -> bool {
        self.preflop_raisers.iter().any(|&raiser| raiser == player)
    }

    pub fn is_open_raiser(&self, player: &str) -> bool {
        self.open_raiser() == Some(player)
    }

    /// Was the player the second preflop raiser.
    pub fn three_bet(&self, player: &str) -> bool {
        self.second_raiser() == Some(player)
    }

    pub fn is_last_raiser(&self, player: &str) -> bool {
        self.preflop_raisers.last().copied() == Some(player)
    }

    /// Did the player voluntarily put money in the pot.
    ///
    /// Any first preflop action except a fold counts, apart from the big
    /// blind checking the option which costs nothing.
    pub fn voluntarily_entered(&self, player: &str) -> bool {
        let big_blind = self.record.big_blind.as_deref() == Some(player);
        match self.first_preflop(player) {
            None | Some(ActionEvent::Fold) => false,
            Some(ActionEvent::Check) if big_blind => false,
            Some(_) => true,
        }
    }

    /// The VPIP set, in acting order.
    pub fn voluntarily_entered_pot(&self) -> Vec<&'a str> {
        self.acting_order
            .iter()
            .copied()
            .filter(|player| self.voluntarily_entered(player))
            .collect()
    }

    pub fn went_to_showdown(&self, player: &str) -> bool {
        self.record.went_to_showdown.contains(player)
    }

    pub fn won_at_showdown(&self, player: &str) -> bool {
        self.seat(player)
            .is_some_and(|seat| self.record.won_at_showdown.contains(&seat))
    }

    /// Did the player win any part of the pot.
    pub fn won(&self, player: &str) -> bool {
        self.seat(player)
            .is_some_and(|seat| self.record.winners.contains_key(&seat))
    }

    /// Was the player's last preflop action a fold.
    pub fn folded_preflop(&self, player: &str) -> bool {
        matches!(self.preflop(player).last(), Some(ActionEvent::Fold))
    }

    pub fn saw_flop(&self, player: &str) -> bool {
        self.seat(player).is_some() && !self.folded_preflop(player)
    }

    /// Did the player only ever call preflop.
    pub fn cold_called(&self, player: &str) -> bool {
        let actions = self.preflop(player);
        !actions.is_empty() && actions.iter().all(ActionEvent::is_call)
    }

    /// Bets and raises against calls over every street.
    pub fn aggression(&self, player: &str) -> Aggression {
        match self.seat(player) {
            Some(seat) => Aggression::count(
                Street::ALL
                    .iter()
                    .flat_map(|&street| self.record.actions_on(street, seat)),
            ),
            None => Aggression::default(),
        }
    }

    pub fn aggression_on(&self, street: Street, player: &str) -> Aggression {
        self.seat(player)
            .map(|seat| Aggression::count(self.record.actions_on(street, seat)))
            .unwrap_or_default()
    }

    /// [`Game::aggression`] broken down by street.
    pub fn aggression_by_street(&self, player: &str) -> BTreeMap<Street, Aggression> {
        Street::ALL
            .into_iter()
            .map(|street| (street, self.aggression_on(street, player)))
            .collect()
    }

    /// Blinds that folded preflop to an open raise.
    ///
    /// Without a raise nobody was stealing, so this is empty even when both
    /// blinds folded.
    pub fn folded_to_steal(&self) -> Vec<&'a str> {
        if self.open_raiser().is_none() {
            return Vec::new();
        }
        let record = self.record;
        [&record.small_blind, &record.big_blind]
            .into_iter()
            .filter_map(|blind| blind.as_deref())
            .filter(|blind| self.folded_preflop(blind))
            .collect()
    }

    /// The player's known hole cards and winnings, when both are known.
    pub fn known_hand(&self, player: &str) -> Option<(&'a str, f64)> {
        let record = self.record;
        let seat = self.seat(player)?;
        let cards = record.known_cards.get(&seat)?;
        let won = record.winners.get(&seat)?;
        Some((cards.as_str(), *won))
    }
}
