use once_cell::sync::Lazy;
use regex::Regex;

/// Every line shape the parser knows about, compiled once.
pub(crate) struct Patterns {
    // Action grammar
    pub call: Regex,
    pub bet: Regex,
    pub raise: Regex,

    // Hand header
    pub hand_id: Regex,
    pub tournament: Regex,
    pub game_type: Regex,
    pub bracketed: Regex,

    // Section markers
    pub section: Regex,
    pub all_cards: Regex,
    pub last_cards: Regex,

    // Headers section
    pub table: Regex,
    pub seat: Regex,

    // Streets
    pub dealt: Regex,
    pub player_action: Regex,
    pub cards: Regex,

    // Showdown
    pub showdown_player: Regex,

    // Summary
    pub total_pot: Regex,
    pub rake: Regex,
    pub position: Regex,
    pub summary_player: Regex,
    pub won: Regex,
    pub collected: Regex,
    pub lost: Regex,
    pub folded_before_flop: Regex,
    pub showed: Regex,
    pub mucked: Regex,
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("line patterns are constant and valid")
}

pub(crate) static PATTERNS: Lazy<Patterns> = Lazy::new(|| Patterns {
    call: re(r"calls \$?([\d.]+)"),
    bet: re(r"bets \$?([\d.]+)"),
    raise: re(r"raises \$?([\d.]+) to \$?([\d.]+)"),

    hand_id: re(r"#(\d+)"),
    tournament: re(r"Tournament #(\d+)"),
    game_type: re(r"(.*) \((.*?)\)"),
    bracketed: re(r"\[(.*?)\]"),

    section: re(r"\*\*\* (.*) \*\*\*"),
    all_cards: re(r"\[(.*)\]"),
    last_cards: re(r"\[([^\[]*?)\]$"),

    table: re(r"^Table (.*?) Seat #(\d+) is the button"),
    seat: re(r"^Seat (\d+): (.*?) \(\$?([\d.]+) in chips\)"),

    dealt: re(r"^Dealt to (.*?) \[(.*)\]"),
    player_action: re(r"^(.*?):\s+(.*)$"),
    cards: re(r"\[(.*)\]"),

    showdown_player: re(r"^(.*?):"),

    total_pot: re(r"Total pot \$?([\d.]+)"),
    rake: re(r"Rake \$?([\d.]+)"),
    position: re(r"\((small blind|big blind|button)\)\s+"),
    // Name and outcome, the outcome starting at the first keyword after the name
    summary_player: re(r"^Seat \d+: (.*?) ((?:showed|folded|mucked|collected).*)$"),
    won: re(r"won \(\$?([\d.]+?)\)"),
    collected: re(r"collected \(\$?([\d.]+?)\)"),
    lost: re(r"lost|mucked"),
    folded_before_flop: re(r"(?i)folded before flop"),
    showed: re(r"showed \[(.+?)\]"),
    mucked: re(r"mucked \[(.+?)\]"),
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        Lazy::force(&PATTERNS);
    }

    #[test]
    fn test_last_cards_only_takes_trailing_group() {
        let caps = PATTERNS
            .last_cards
            .captures("*** TURN *** [2c 7d Ts] [Kh]")
            .unwrap();
        assert_eq!(&caps[1], "Kh");
    }

    #[test]
    fn test_position_annotation_is_stripped() {
        let line = PATTERNS
            .position
            .replace_all("Seat 3: Carl (button) showed [Tc Th] and won ($196)", "");
        assert_eq!(line, "Seat 3: Carl showed [Tc Th] and won ($196)");
    }

    #[test]
    fn test_summary_player_splits_name_from_outcome() {
        let caps = PATTERNS
            .summary_player
            .captures("Seat 2: lostboy folded before Flop")
            .unwrap();
        assert_eq!(&caps[1], "lostboy");
        assert_eq!(&caps[2], "folded before Flop");
    }

    #[test]
    fn test_won_amount() {
        let caps = PATTERNS.won.captures("and won ($196.50) with").unwrap();
        assert_eq!(&caps[1], "196.50");
    }
}
