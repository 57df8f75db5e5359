//! Hand histories shared by the tests of this crate.

/// Carl opens, the small blind folds and the big blind calls.
pub const OPEN_RAISE_HAND: &str = "\
PokerStars Game #1: Hold'em No Limit ($1/$2) - 2009/05/05 12:06:55 ET
Table 'Alpha' 3-max Seat #2 is the button
Seat 1: Alice ($100 in chips)
Seat 2: Bob ($100 in chips)
Seat 3: Carl ($100 in chips)
Alice: posts small blind $1
Bob: posts big blind $2
*** HOLE CARDS ***
Carl: raises $2 to $4
Alice: folds
Bob: calls $2
*** SUMMARY ***
Seat 3: Carl collected ($9)
";

/// Carl opens from the button, Alice three bets from the small blind and
/// the hand goes to a show down that Carl wins.
pub const THREE_BET_HAND: &str = "\
PokerStars Game #2: Hold'em No Limit ($1/$2) - 2009/05/05 18:08:10 CET [2009/05/05 12:08:10 ET]
Table 'Alpha' 3-max Seat #3 is the button
Seat 1: Alice ($99 in chips)
Seat 2: Bob ($96 in chips)
Seat 3: Carl ($105 in chips)
Alice: posts small blind $1
Bob: posts big blind $2
*** HOLE CARDS ***
Dealt to Alice [Ah Kd]
Carl: raises $4 to $6
Alice: raises $12 to $18
Bob: folds
Carl said, \"nice try\"
Carl: calls $12
*** FLOP *** [2c 7d Ts]
Alice: bets $20
Carl: calls $20
*** TURN *** [2c 7d Ts] [Kh]
Alice: checks
Carl: checks
*** RIVER *** [2c 7d Ts Kh] [3s]
Alice: bets $30
Carl: raises $30 to $60
Alice: calls $30
*** SHOW DOWN ***
Carl: shows [Tc Th] (three of a kind, Tens)
Alice: mucks hand
Carl collected $196 from pot
*** SUMMARY ***
Total pot $198 | Rake $2
Board [2c 7d Ts Kh 3s]
Seat 1: Alice (small blind) mucked [Ah Kd]
Seat 2: Bob (big blind) folded before Flop
Seat 3: Carl (button) showed [Tc Th] and won ($196) with three of a kind, Tens
";

/// A limped tournament pot where the big blind checks the option.
pub const LIMPED_TOURNAMENT_HAND: &str = "\
PokerStars Game #3: Tournament #160417133, $0.25+$0.00 Hold'em No Limit - Level I (10/20) - 2009/05/05 12:10:00 ET
Table '160417133 1' 9-max Seat #1 is the button
Seat 1: Alice (1500 in chips)
Seat 2: Bob (1500 in chips)
Seat 3: Carl (1500 in chips)
Bob: posts small blind 10
Carl: posts big blind 20
*** HOLE CARDS ***
Alice: calls 20
Bob: calls 10
Carl: checks
*** FLOP *** [9h 8h 2s]
Bob: checks
Carl: bets 40
Alice: folds
Bob: folds
Uncalled bet (40) returned to Carl
Carl collected 60 from pot
*** SUMMARY ***
Total pot 60 | Rake 0
Board [9h 8h 2s]
Seat 1: Alice (button) folded on the Flop
Seat 2: Bob (small blind) folded on the Flop
Seat 3: Carl (big blind) collected (60)
";

/// The three hands above, one after the other, as they would be in a log.
pub fn session() -> String {
    [OPEN_RAISE_HAND, THREE_BET_HAND, LIMPED_TOURNAMENT_HAND].join("\n\n")
}
