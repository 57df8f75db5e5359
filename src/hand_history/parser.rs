use std::io::{BufRead, Lines};
use std::iter::FusedIterator;

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use super::action::{amount, ActionEvent};
use super::config::ParserConfig;
use super::errors::Result;
use super::patterns::PATTERNS;
use super::record::{GameInfo, HandBuilder, HandRecord};
use super::street::Street;

/// The section of a hand the parser is currently reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserState {
    /// Table, seat and blind lines before the cards are dealt
    Headers,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Summary,
}

impl ParserState {
    /// The betting round whose actions are recorded in this state.
    pub fn street(self) -> Option<Street> {
        match self {
            ParserState::Preflop => Some(Street::Preflop),
            ParserState::Flop => Some(Street::Flop),
            ParserState::Turn => Some(Street::Turn),
            ParserState::River => Some(Street::River),
            _ => None,
        }
    }

    /// Run the line through every matcher of this state, in order.
    pub fn classify(self, line: &str) -> Vec<LineUpdate> {
        self.matchers().iter().filter_map(|m| m(line)).collect()
    }

    fn matchers(self) -> &'static [Matcher] {
        match self {
            ParserState::Headers => HEADERS,
            ParserState::Preflop => PREFLOP,
            ParserState::Flop | ParserState::Turn | ParserState::River => STREET,
            ParserState::Showdown => SHOWDOWN,
            ParserState::Summary => SUMMARY,
        }
    }
}

/// How a seat finished the hand according to the summary section.
#[derive(Debug, Clone, PartialEq)]
pub enum SeatOutcome {
    /// Won at show down, maybe with the cards shown
    Won { amount: f64, cards: Option<String> },
    /// Took down the pot without a show down
    Collected { amount: f64 },
    /// Lost at show down, maybe with the cards mucked face up
    Lost { cards: Option<String> },
    FoldedBeforeFlop,
}

/// A partial update to the hand being built, produced from a single line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineUpdate {
    Table { name: String, button_seat: u32 },
    Seat { seat: u32, player: String, stack: f64 },
    SmallBlind(String),
    BigBlind(String),
    HoleCards { player: String, cards: String },
    Shows { player: String, cards: String },
    Action { player: String, event: ActionEvent },
    Showdown(String),
    Totals { pot: Option<f64>, rake: Option<f64> },
    Summary { player: String, outcome: SeatOutcome },
}

type Matcher = fn(&str) -> Option<LineUpdate>;

// Each matcher recognises one line shape. Every matcher of a state is tried,
// so a preflop line can be both a hole card deal and an action.
const HEADERS: &[Matcher] = &[table_line, seat_line, blind_line];
const PREFLOP: &[Matcher] = &[dealt_line, street_line];
const STREET: &[Matcher] = &[street_line];
const SHOWDOWN: &[Matcher] = &[showdown_line];
const SUMMARY: &[Matcher] = &[totals_line, summary_seat_line];

fn table_line(line: &str) -> Option<LineUpdate> {
    let caps = PATTERNS.table.captures(line)?;
    Some(LineUpdate::Table {
        name: caps[1].to_string(),
        button_seat: caps[2].parse().ok()?,
    })
}

fn seat_line(line: &str) -> Option<LineUpdate> {
    let caps = PATTERNS.seat.captures(line)?;
    Some(LineUpdate::Seat {
        seat: caps[1].parse().ok()?,
        player: caps[2].to_string(),
        stack: amount(&caps, 3)?,
    })
}

fn blind_line(line: &str) -> Option<LineUpdate> {
    let caps = PATTERNS.player_action.captures(line)?;
    let player = caps[1].to_string();
    let action = &caps[2];
    if action.starts_with("posts small blind") {
        Some(LineUpdate::SmallBlind(player))
    } else if action.starts_with("posts big blind") {
        Some(LineUpdate::BigBlind(player))
    } else {
        None
    }
}

fn dealt_line(line: &str) -> Option<LineUpdate> {
    let caps = PATTERNS.dealt.captures(line)?;
    Some(LineUpdate::HoleCards {
        player: caps[1].to_string(),
        cards: caps[2].to_string(),
    })
}

fn street_line(line: &str) -> Option<LineUpdate> {
    let caps = PATTERNS.player_action.captures(line)?;
    let player = caps[1].to_string();
    let action = &caps[2];
    if action.starts_with("shows") {
        let cards = PATTERNS.cards.captures(action)?;
        Some(LineUpdate::Shows {
            player,
            cards: cards[1].to_string(),
        })
    } else {
        ActionEvent::parse(action).map(|event| LineUpdate::Action { player, event })
    }
}

fn showdown_line(line: &str) -> Option<LineUpdate> {
    let caps = PATTERNS.showdown_player.captures(line)?;
    Some(LineUpdate::Showdown(caps[1].to_string()))
}

fn totals_line(line: &str) -> Option<LineUpdate> {
    if !line.starts_with("Total pot") {
        return None;
    }
    let pot = PATTERNS.total_pot.captures(line).and_then(|c| amount(&c, 1));
    let rake = PATTERNS.rake.captures(line).and_then(|c| amount(&c, 1));
    Some(LineUpdate::Totals { pot, rake })
}

fn summary_seat_line(line: &str) -> Option<LineUpdate> {
    if !line.starts_with("Seat") {
        return None;
    }
    let p = &*PATTERNS;
    let line = p.position.replace_all(line, "");
    let caps = p.summary_player.captures(&line)?;
    let player = caps[1].to_string();
    // Only the outcome is classified, a name may contain any of the keywords.
    let outcome = &caps[2];
    let shown = |re: &regex::Regex| re.captures(outcome).map(|c| c[1].to_string());

    let outcome = if let Some(caps) = p.won.captures(outcome) {
        SeatOutcome::Won {
            amount: amount(&caps, 1)?,
            cards: shown(&p.showed),
        }
    } else if let Some(caps) = p.collected.captures(outcome) {
        SeatOutcome::Collected {
            amount: amount(&caps, 1)?,
        }
    } else if p.lost.is_match(outcome) {
        SeatOutcome::Lost {
            cards: shown(&p.mucked),
        }
    } else if p.folded_before_flop.is_match(outcome) {
        SeatOutcome::FoldedBeforeFlop
    } else {
        return None;
    };
    Some(LineUpdate::Summary { player, outcome })
}

/// Which section a `*** NAME ***` marker opens.
fn section_state(name: &str) -> Option<ParserState> {
    match name {
        "HOLE CARDS" => Some(ParserState::Preflop),
        "FLOP" => Some(ParserState::Flop),
        "TURN" => Some(ParserState::Turn),
        "RIVER" => Some(ParserState::River),
        "SHOW DOWN" => Some(ParserState::Showdown),
        "SUMMARY" => Some(ParserState::Summary),
        _ => None,
    }
}

/// Streams [`HandRecord`]s out of a PokerStars hand history.
///
/// The parser reads strictly forward, one line at a time, and only holds
/// the hand it is currently building. A hand is handed out when the next
/// hand header is seen or when the input ends.
///
/// # Errors
///
/// A failing reader yields a single `Err` after which the iterator is done.
/// The hand that was being read at that point is dropped; every hand
/// yielded before it is complete.
///
/// # Example
///
/// ```
/// use pstars_hh::hand_history::parse;
///
/// let log = "\
/// PokerStars Game #1: Hold'em No Limit ($1/$2) - 2009/05/05 12:06:55 ET
/// Seat 1: Alice ($100 in chips)
/// PokerStars Game #2: Hold'em No Limit ($1/$2) - 2009/05/05 12:07:30 ET
/// Seat 1: Alice ($98 in chips)
/// ";
///
/// let ids: Vec<u64> = parse(log.as_bytes()).map(|hand| hand.unwrap().id).collect();
/// assert_eq!(ids, vec![1, 2]);
/// ```
pub struct Parser<R> {
    lines: Lines<R>,
    config: ParserConfig,
    current: Option<HandBuilder>,
    state: Option<ParserState>,
    finished: bool,
}

/// Parse a hand history with the default configuration.
pub fn parse<R: BufRead>(reader: R) -> Parser<R> {
    Parser::new(reader)
}

impl<R: BufRead> Parser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            config: ParserConfig::default(),
            current: None,
            state: None,
            finished: false,
        }
    }

    /// Create a parser with a custom configuration, after validating it.
    pub fn with_config(reader: R, config: ParserConfig) -> Result<Self> {
        config.validate()?;
        debug!(?config, "Creating hand history parser");
        Ok(Self {
            config,
            ..Self::new(reader)
        })
    }

    /// The section being read, `None` before the first hand header.
    pub fn state(&self) -> Option<ParserState> {
        self.state
    }

    /// Feed one line, returning the previous hand if this line started a
    /// new one.
    fn consume(&mut self, line: &str) -> Option<HandRecord> {
        let line = line.trim_start_matches('\u{feff}').trim_end();

        if self.config.is_hand_header(line) {
            let builder = self.start_hand(line);
            self.state = Some(ParserState::Headers);
            return self.current.replace(builder).map(finish);
        }

        let (Some(builder), Some(state)) = (self.current.as_mut(), self.state) else {
            trace!(line, "Skipping line outside of a hand");
            return None;
        };

        if self.config.is_chat(line) {
            return None;
        }

        if let Some(caps) = PATTERNS.section.captures(line) {
            if let Some(next) = section_state(&caps[1]) {
                enter_section(builder, next, line);
                self.state = Some(next);
            }
            return None;
        }

        let updates = state.classify(line);
        if updates.is_empty() {
            trace!(line, ?state, "Skipping unrecognised line");
        }
        for update in updates {
            apply(builder, state, update);
        }
        None
    }

    fn start_hand(&self, line: &str) -> HandBuilder {
        let p = &*PATTERNS;
        let id = p
            .hand_id
            .captures(line)
            .and_then(|c| c[1].parse().ok())
            .unwrap_or_default();
        let mut builder = HandBuilder::new(id);

        let Some(details) = p.player_action.captures(line).map(|c| c[2].to_string()) else {
            return builder;
        };

        if let Some(caps) = p.tournament.captures(&details) {
            if let Ok(id) = caps[1].parse() {
                builder.game(GameInfo::Tournament { id });
            }
            return builder;
        }

        let (table, rest) = match details.split_once(" - ") {
            Some((table, rest)) => (table, Some(rest)),
            None => (details.as_str(), None),
        };

        if let Some(caps) = p.game_type.captures(table) {
            builder.game(GameInfo::Cash {
                game_type: caps[1].to_string(),
                stakes: caps[2].split('/').filter_map(parse_stake).collect(),
            });
        }

        if let Some(rest) = rest {
            let timestamp = p
                .bracketed
                .captures(rest)
                .map(|c| c[1].to_string())
                .unwrap_or_else(|| rest.trim().to_string());
            match NaiveDateTime::parse_from_str(&timestamp, &self.config.timestamp_format) {
                Ok(dealt_at) => builder.dealt_at(dealt_at),
                Err(error) => trace!(%timestamp, %error, "Unable to parse hand timestamp"),
            }
        }

        builder
    }
}

impl<R: BufRead> Iterator for Parser<R> {
    type Item = Result<HandRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    if let Some(hand) = self.consume(&line) {
                        return Some(Ok(hand));
                    }
                }
                Some(Err(error)) => {
                    debug!(%error, "Hand history reader failed");
                    self.finished = true;
                    self.current = None;
                    self.state = None;
                    return Some(Err(error.into()));
                }
                None => {
                    self.finished = true;
                    self.state = None;
                    return self.current.take().map(finish).map(Ok);
                }
            }
        }
    }
}

impl<R: BufRead> FusedIterator for Parser<R> {}

fn finish(builder: HandBuilder) -> HandRecord {
    let hand = builder.build();
    debug!(
        hand_id = hand.id,
        seats = hand.seats.len(),
        "Finished parsing hand"
    );
    hand
}

/// `$0.02 USD` -> `0.02`
fn parse_stake(stake: &str) -> Option<f64> {
    let stake = stake.trim().trim_start_matches('$');
    let end = stake
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(stake.len());
    stake[..end].parse().ok()
}

fn enter_section(builder: &mut HandBuilder, state: ParserState, line: &str) {
    let p = &*PATTERNS;
    let cards = match state {
        ParserState::Flop => p.all_cards.captures(line),
        ParserState::Turn | ParserState::River => p.last_cards.captures(line),
        _ => None,
    };
    if let (Some(street), Some(cards)) = (state.street(), cards) {
        builder.board(street, cards[1].to_string());
    }
}

fn apply(builder: &mut HandBuilder, state: ParserState, update: LineUpdate) {
    match update {
        LineUpdate::Table { name, button_seat } => builder.table(name, button_seat),
        LineUpdate::Seat {
            seat,
            player,
            stack,
        } => builder.seat(seat, player, stack),
        LineUpdate::SmallBlind(player) => builder.small_blind(player),
        LineUpdate::BigBlind(player) => builder.big_blind(player),
        LineUpdate::Showdown(player) => builder.went_to_showdown(player),
        LineUpdate::Totals { pot, rake } => builder.totals(pot, rake),
        LineUpdate::HoleCards { player, cards } | LineUpdate::Shows { player, cards } => {
            if let Some(seat) = resolve(builder, &player) {
                builder.known_cards(seat, cards);
            }
        }
        LineUpdate::Action { player, event } => {
            if let (Some(seat), Some(street)) = (resolve(builder, &player), state.street()) {
                builder.action(street, seat, event);
            }
        }
        LineUpdate::Summary { player, outcome } => {
            let Some(seat) = resolve(builder, &player) else {
                return;
            };
            match outcome {
                SeatOutcome::Won { amount, cards } => {
                    builder.won(seat, amount);
                    builder.won_at_showdown(seat);
                    if let Some(cards) = cards {
                        builder.known_cards(seat, cards);
                    }
                }
                SeatOutcome::Collected { amount } => builder.won(seat, amount),
                SeatOutcome::Lost { cards } => {
                    builder.lost_at_showdown(seat);
                    if let Some(cards) = cards {
                        builder.known_cards(seat, cards);
                    }
                }
                SeatOutcome::FoldedBeforeFlop => builder.folded_before_flop(seat),
            }
        }
    }
}

fn resolve(builder: &HandBuilder, player: &str) -> Option<u32> {
    let seat = builder.seat_of(player);
    if seat.is_none() {
        trace!(hand_id = builder.id(), player, "Player is not seated at the table");
    }
    seat
}
