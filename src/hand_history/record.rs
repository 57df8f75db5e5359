use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Index, IndexMut};

use chrono::NaiveDateTime;

use super::action::ActionEvent;
use super::street::Street;

/// Actions per seat, in the order they appeared in the log.
pub type SeatActions = BTreeMap<u32, Vec<ActionEvent>>;

/// The betting of a hand, split by street.
///
/// There is always exactly one entry per street. A seat only appears on a
/// street once it has at least one recorded action there.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bets {
    pub preflop: SeatActions,
    pub flop: SeatActions,
    pub turn: SeatActions,
    pub river: SeatActions,
}

impl Bets {
    pub fn iter(&self) -> impl Iterator<Item = (Street, &SeatActions)> {
        Street::ALL.into_iter().map(move |street| (street, &self[street]))
    }
}

impl Index<Street> for Bets {
    type Output = SeatActions;

    fn index(&self, street: Street) -> &SeatActions {
        match street {
            Street::Preflop => &self.preflop,
            Street::Flop => &self.flop,
            Street::Turn => &self.turn,
            Street::River => &self.river,
        }
    }
}

impl IndexMut<Street> for Bets {
    fn index_mut(&mut self, street: Street) -> &mut SeatActions {
        match street {
            Street::Preflop => &mut self.preflop,
            Street::Flop => &mut self.flop,
            Street::Turn => &mut self.turn,
            Street::River => &mut self.river,
        }
    }
}

/// What kind of game the hand was dealt in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameInfo {
    Tournament {
        id: u64,
    },
    Cash {
        /// e.g. `Hold'em No Limit`
        game_type: String,
        /// Small and big blind, as written in the header
        stakes: Vec<f64>,
    },
}

/// Everything recovered from a single hand of the log.
///
/// Records are only handed out once the hand is complete and are never
/// modified afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandRecord {
    pub id: u64,
    pub table_name: Option<String>,
    pub game: Option<GameInfo>,
    pub dealt_at: Option<NaiveDateTime>,
    pub button_seat: Option<u32>,

    /// Seat number to player name
    pub seats: BTreeMap<u32, String>,
    /// Seat number to starting chips
    pub stacks: BTreeMap<u32, f64>,
    /// Player names in the order of the seat lines
    pub players: Vec<String>,
    pub small_blind: Option<String>,
    pub big_blind: Option<String>,

    pub bets: Bets,
    /// Hole cards that were dealt to us, shown or mucked
    pub known_cards: BTreeMap<u32, String>,
    /// Seat number to amount won
    pub winners: BTreeMap<u32, f64>,

    /// Player names with a line in the show down section
    pub went_to_showdown: BTreeSet<String>,
    pub won_at_showdown: BTreeSet<u32>,
    pub lost_at_showdown: BTreeSet<u32>,
    pub folded_before_flop: BTreeSet<u32>,

    pub pot: Option<f64>,
    pub rake: Option<f64>,

    // Only the cards revealed on each street, not the running board.
    pub flop: Option<String>,
    pub turn: Option<String>,
    pub river: Option<String>,
}

impl HandRecord {
    /// The seat a player sat in, if they sat down at all.
    pub fn seat_of(&self, player: &str) -> Option<u32> {
        self.seats
            .iter()
            .find(|(_, name)| name.as_str() == player)
            .map(|(seat, _)| *seat)
    }

    /// Preflop actions of a seat, empty if it never acted.
    pub fn preflop_actions(&self, seat: u32) -> &[ActionEvent] {
        self.actions_on(Street::Preflop, seat)
    }

    pub fn actions_on(&self, street: Street, seat: u32) -> &[ActionEvent] {
        self.bets[street]
            .get(&seat)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Pretty printed JSON of the whole record.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// The hand currently being read.
///
/// Only the parser holds one of these. Calling [`HandBuilder::build`] freezes
/// it into a [`HandRecord`].
#[derive(Debug, Default)]
pub(crate) struct HandBuilder {
    record: HandRecord,
}

impl HandBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            record: HandRecord {
                id,
                ..HandRecord::default()
            },
        }
    }

    pub fn id(&self) -> u64 {
        self.record.id
    }

    pub fn seat_of(&self, player: &str) -> Option<u32> {
        self.record.seat_of(player)
    }

    pub fn game(&mut self, game: GameInfo) {
        self.record.game = Some(game);
    }

    pub fn dealt_at(&mut self, dealt_at: NaiveDateTime) {
        self.record.dealt_at = Some(dealt_at);
    }

    pub fn table(&mut self, name: String, button_seat: u32) {
        self.record.table_name = Some(name);
        self.record.button_seat = Some(button_seat);
    }

    pub fn seat(&mut self, seat: u32, name: String, stack: f64) {
        self.record.players.push(name.clone());
        self.record.seats.insert(seat, name);
        self.record.stacks.insert(seat, stack);
    }

    pub fn small_blind(&mut self, player: String) {
        self.record.small_blind = Some(player);
    }

    pub fn big_blind(&mut self, player: String) {
        self.record.big_blind = Some(player);
    }

    pub fn board(&mut self, street: Street, cards: String) {
        match street {
            Street::Flop => self.record.flop = Some(cards),
            Street::Turn => self.record.turn = Some(cards),
            Street::River => self.record.river = Some(cards),
            Street::Preflop => {}
        }
    }

    pub fn action(&mut self, street: Street, seat: u32, event: ActionEvent) {
        self.record.bets[street].entry(seat).or_default().push(event);
    }

    pub fn known_cards(&mut self, seat: u32, cards: String) {
        self.record.known_cards.insert(seat, cards);
    }

    pub fn went_to_showdown(&mut self, player: String) {
        self.record.went_to_showdown.insert(player);
    }

    pub fn totals(&mut self, pot: Option<f64>, rake: Option<f64>) {
        if pot.is_some() {
            self.record.pot = pot;
        }
        if rake.is_some() {
            self.record.rake = rake;
        }
    }

    pub fn won(&mut self, seat: u32, amount: f64) {
        self.record.winners.insert(seat, amount);
    }

    pub fn won_at_showdown(&mut self, seat: u32) {
        self.record.won_at_showdown.insert(seat);
    }

    pub fn lost_at_showdown(&mut self, seat: u32) {
        self.record.lost_at_showdown.insert(seat);
    }

    pub fn folded_before_flop(&mut self, seat: u32) {
        self.record.folded_before_flop.insert(seat);
    }

    pub fn build(self) -> HandRecord {
        self.record
    }
}
