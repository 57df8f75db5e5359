use regex::Captures;

use super::patterns::PATTERNS;

/// A single betting event recovered from a `Player: action` line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionEvent {
    /// Matches the current bet, putting `amount` more into the pot.
    Call { amount: f64 },
    /// Opens the betting on a street.
    Bet { amount: f64 },
    /// Raises by `from` making the total bet `to`.
    Raise { from: f64, to: f64 },
    /// Folds the current hand.
    Fold,
    /// Passes the action without wagering.
    Check,
    /// Forced small blind.
    PostSmallBlind,
    /// Forced big blind.
    PostBigBlind,
}

impl ActionEvent {
    /// Classify the text after `Player: ` into an event.
    ///
    /// Rules are tried in a fixed order: calls, bets, raises, small blind,
    /// big blind, folds and finally checks. Anything else (`shows`,
    /// `mucks hand`, `is sitting out`, ...) yields `None` and callers are
    /// expected to ignore the line.
    pub fn parse(text: &str) -> Option<ActionEvent> {
        let p = &*PATTERNS;

        if let Some(amount) = p.call.captures(text).and_then(|c| amount(&c, 1)) {
            return Some(ActionEvent::Call { amount });
        }
        if let Some(amount) = p.bet.captures(text).and_then(|c| amount(&c, 1)) {
            return Some(ActionEvent::Bet { amount });
        }
        if let Some(caps) = p.raise.captures(text) {
            if let (Some(from), Some(to)) = (amount(&caps, 1), amount(&caps, 2)) {
                return Some(ActionEvent::Raise { from, to });
            }
        }
        if text.contains("small blind") {
            return Some(ActionEvent::PostSmallBlind);
        }
        if text.contains("big blind") {
            return Some(ActionEvent::PostBigBlind);
        }
        if text.contains("folds") {
            return Some(ActionEvent::Fold);
        }
        if text.contains("checks") {
            return Some(ActionEvent::Check);
        }
        None
    }

    /// Bets and raises are the aggressive half of the aggression factor.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, ActionEvent::Bet { .. } | ActionEvent::Raise { .. })
    }

    pub fn is_call(&self) -> bool {
        matches!(self, ActionEvent::Call { .. })
    }
}

pub(crate) fn amount(caps: &Captures<'_>, group: usize) -> Option<f64> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}
