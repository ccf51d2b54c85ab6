use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    card::card_value,
    config::{validate_decks, AdvisorConfig, Language},
    counter::{BetTier, CardCounter},
    error::AdvisorError,
    hand::Hand,
    strategy::{recommend, Recommendation},
};

/// Where the next entered card goes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputMode {
    Dealer,
    Player,
    /// Cards seen at other seats; counted but never part of a hand.
    Others,
}

impl FromStr for InputMode {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dealer" => Ok(InputMode::Dealer),
            "player" => Ok(InputMode::Player),
            "others" => Ok(InputMode::Others),
            _ => Err(AdvisorError::UnknownInputMode(s.to_string())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandResult {
    Win,
    Loss,
    Push,
}

impl FromStr for HandResult {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(HandResult::Win),
            "loss" | "lose" => Ok(HandResult::Loss),
            "push" => Ok(HandResult::Push),
            _ => Err(AdvisorError::UnknownHandResult(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub hands_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub pushes: u32,
    pub blackjacks: u32,
}

impl SessionStats {
    pub fn record(&mut self, result: HandResult, blackjack: bool) {
        self.hands_played += 1;
        match result {
            HandResult::Win => {
                self.wins += 1;
                if blackjack {
                    self.blackjacks += 1;
                }
            }
            HandResult::Loss => self.losses += 1,
            HandResult::Push => self.pushes += 1,
        }
    }

    /// Percentage of hands won, zero before any hand is played.
    pub fn win_rate(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.hands_played) * 100.0
        }
    }

    pub fn reset(&mut self) {
        *self = SessionStats::default();
    }
}

#[derive(Debug, Copy, Clone)]
struct Entry {
    zone: InputMode,
    // Cleared when the shoe changes under a deal that is still on the table.
    counted: bool,
}

/// One player's view of the table: the current deal, the shoe count and the
/// running session tally.
#[derive(Debug, Clone)]
pub struct Session {
    language: Language,
    dealer: Hand,
    player: Hand,
    others: Vec<String>,
    mode: InputMode,
    history: Vec<Entry>,
    counter: CardCounter,
    stats: SessionStats,
}

impl Session {
    pub fn new(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        config.validate()?;
        log::info!(
            "session started with {} decks ({:?})",
            config.num_decks,
            config.language
        );
        Ok(Session {
            language: config.language,
            dealer: Hand::new(),
            player: Hand::new(),
            others: Vec::new(),
            mode: InputMode::Dealer,
            history: Vec::new(),
            counter: CardCounter::new(config.num_decks),
            stats: SessionStats::default(),
        })
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn others(&self) -> &[String] {
        &self.others
    }

    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    pub fn counter(&self) -> &CardCounter {
        &self.counter
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// Route a card to the current input zone and count it.
    ///
    /// The first card entered in dealer mode is the upcard; after it the
    /// session switches to the player. Further cards in dealer mode also go
    /// to the player.
    pub fn add_card(&mut self, rank: &str) -> InputMode {
        let zone = match self.mode {
            InputMode::Dealer if self.dealer.is_empty() => {
                self.dealer.push(rank);
                self.mode = InputMode::Player;
                InputMode::Dealer
            }
            InputMode::Others => {
                self.others.push(rank.to_string());
                InputMode::Others
            }
            _ => {
                self.player.push(rank);
                InputMode::Player
            }
        };
        self.counter.record(card_value(rank));
        self.history.push(Entry { zone, counted: true });
        zone
    }

    /// Take back the most recently entered card of this deal.
    ///
    /// Returns false when the deal is empty.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.pop() else {
            return false;
        };
        let removed = match entry.zone {
            InputMode::Dealer => {
                self.mode = InputMode::Dealer;
                self.dealer.pop()
            }
            InputMode::Player => self.player.pop(),
            InputMode::Others => self.others.pop(),
        };
        if let (Some(rank), true) = (removed, entry.counted) {
            self.counter.undo_record(card_value(&rank));
        }
        true
    }

    /// Clear the table for the next deal; the shoe count carries over.
    pub fn new_hand(&mut self) {
        self.dealer.clear();
        self.player.clear();
        self.others.clear();
        self.history.clear();
        self.mode = InputMode::Dealer;
    }

    pub fn new_shoe(&mut self) {
        log::info!(
            "new shoe: previous shoe ended at RC {} after {} cards",
            self.counter.running_count(),
            self.counter.cards_dealt()
        );
        self.counter.reset_shoe();
        self.new_hand();
    }

    /// Switch the shoe size. The count restarts; cards already on the table
    /// stay visible but no longer belong to the count.
    pub fn set_decks(&mut self, num_decks: u32) -> Result<(), AdvisorError> {
        if let Err(err) = validate_decks(num_decks) {
            log::warn!("rejected deck count: {err}");
            return Err(err);
        }
        log::info!("deck count set to {num_decks}");
        self.counter.set_decks(num_decks);
        for entry in &mut self.history {
            entry.counted = false;
        }
        Ok(())
    }

    /// Enough cards for advice: the dealer upcard and two player cards.
    pub fn is_ready(&self) -> bool {
        !self.dealer.is_empty() && self.player.len() >= 2
    }

    pub fn recommendation(&self) -> Option<Recommendation> {
        if !self.is_ready() {
            return None;
        }
        let upcard = self.dealer.first()?;
        Some(recommend(
            self.player.cards(),
            upcard,
            self.player.can_double(),
            self.player.can_split(),
            self.language,
        ))
    }

    /// Tally the finished deal and clear the table.
    pub fn record_result(&mut self, result: HandResult) {
        let blackjack = self.player.is_blackjack();
        self.stats.record(result, blackjack);
        log::info!(
            "hand recorded: {result:?}{} ({} played)",
            if blackjack && result == HandResult::Win { " with blackjack" } else { "" },
            self.stats.hands_played
        );
        self.new_hand();
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let bet = self.counter.bet_recommendation();
        SessionSnapshot {
            input_mode: self.mode,
            dealer: HandView::from_hand(&self.dealer),
            dealer_upcard_value: self.dealer.first().map(card_value),
            player: HandView::from_hand(&self.player),
            others: self.others.clone(),
            ready: self.is_ready(),
            recommendation: self.recommendation(),
            count: CountView {
                total_decks: self.counter.total_decks(),
                running_count: self.counter.running_count(),
                true_count: self.counter.true_count(),
                cards_dealt: self.counter.cards_dealt(),
                decks_remaining: self.counter.decks_remaining(),
                penetration: self.counter.penetration(),
                bet_tier: bet,
                bet_label: bet.label(self.language),
                bet_multiplier: bet.multiplier(),
                player_advantage: self.counter.player_advantage(),
            },
            stats: self.stats.clone(),
            win_rate: self.stats.win_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandView {
    pub cards: Vec<String>,
    pub display: String,
    pub total: u32,
    pub is_soft: bool,
    pub is_pair: bool,
    pub is_blackjack: bool,
    pub is_bust: bool,
}

impl HandView {
    fn from_hand(hand: &Hand) -> Self {
        HandView {
            cards: hand.cards().to_vec(),
            display: hand.display(),
            total: hand.total(),
            is_soft: hand.is_soft(),
            is_pair: hand.is_pair(),
            is_blackjack: hand.is_blackjack(),
            is_bust: hand.is_bust(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountView {
    pub total_decks: u32,
    pub running_count: i32,
    pub true_count: f64,
    pub cards_dealt: u32,
    pub decks_remaining: f64,
    pub penetration: f64,
    pub bet_tier: BetTier,
    pub bet_label: String,
    pub bet_multiplier: u32,
    pub player_advantage: f64,
}

/// Everything the shell renders after an input event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub input_mode: InputMode,
    pub dealer: HandView,
    pub dealer_upcard_value: Option<u8>,
    pub player: HandView,
    pub others: Vec<String>,
    pub ready: bool,
    pub recommendation: Option<Recommendation>,
    pub count: CountView,
    pub stats: SessionStats,
    pub win_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Action;

    fn session() -> Session {
        Session::new(&AdvisorConfig::default()).unwrap()
    }

    fn deal(session: &mut Session, ranks: &[&str]) {
        for rank in ranks {
            session.add_card(rank);
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = AdvisorConfig { num_decks: 0, ..AdvisorConfig::default() };
        assert_eq!(Session::new(&config).unwrap_err(), AdvisorError::InvalidDeckCount(0));
    }

    #[test]
    fn first_card_goes_to_dealer_then_player() {
        let mut s = session();
        assert_eq!(s.input_mode(), InputMode::Dealer);
        assert_eq!(s.add_card("6"), InputMode::Dealer);
        assert_eq!(s.input_mode(), InputMode::Player);
        assert_eq!(s.add_card("8"), InputMode::Player);
        assert_eq!(s.add_card("8"), InputMode::Player);
        assert_eq!(s.dealer().cards(), ["6"]);
        assert_eq!(s.player().cards(), ["8", "8"]);
        assert_eq!(s.counter().cards_dealt(), 3);
        assert_eq!(s.counter().running_count(), 1);
    }

    #[test]
    fn dealer_mode_with_upcard_routes_to_player() {
        let mut s = session();
        deal(&mut s, &["6"]);
        s.set_input_mode(InputMode::Dealer);
        assert_eq!(s.add_card("K"), InputMode::Player);
        assert_eq!(s.dealer().len(), 1);
    }

    #[test]
    fn others_are_counted_but_not_played() {
        let mut s = session();
        deal(&mut s, &["10", "5", "6"]);
        s.set_input_mode(InputMode::Others);
        deal(&mut s, &["2", "3"]);
        assert_eq!(s.others(), ["2", "3"]);
        assert_eq!(s.player().len(), 2);
        assert_eq!(s.counter().running_count(), 3);
        assert_eq!(s.counter().cards_dealt(), 5);
    }

    #[test]
    fn recommendation_needs_dealer_and_two_player_cards() {
        let mut s = session();
        assert!(s.recommendation().is_none());
        deal(&mut s, &["6", "8"]);
        assert!(!s.is_ready());
        assert!(s.recommendation().is_none());
        s.add_card("8");
        let rec = s.recommendation().unwrap();
        assert_eq!(rec.action, Action::Split);
    }

    #[test]
    fn three_card_hand_loses_double_and_split() {
        let mut s = session();
        deal(&mut s, &["5", "4", "5"]);
        assert_eq!(s.recommendation().unwrap().action, Action::Double);
        s.add_card("2");
        let rec = s.recommendation().unwrap();
        assert_eq!(rec.total, 11);
        assert_eq!(rec.action, Action::Hit);
    }

    #[test]
    fn undo_reverses_hand_and_count() {
        let mut s = session();
        deal(&mut s, &["A", "10", "5"]);
        s.set_input_mode(InputMode::Others);
        s.add_card("4");
        let before = s.counter().clone();
        s.add_card("K");

        assert!(s.undo());
        assert_eq!(s.counter(), &before);
        assert_eq!(s.others(), ["4"]);

        assert!(s.undo());
        assert!(s.others().is_empty());
        assert!(s.undo());
        assert_eq!(s.player().cards(), ["10"]);
        assert!(s.undo());
        assert!(s.player().is_empty());
        assert!(s.undo());
        assert!(s.dealer().is_empty());
        assert_eq!(s.input_mode(), InputMode::Dealer);
        assert_eq!(s.counter(), &CardCounter::new(6));
        assert!(!s.undo());
    }

    #[test]
    fn undo_follows_entry_order_not_current_mode() {
        let mut s = session();
        deal(&mut s, &["9", "7"]);
        s.set_input_mode(InputMode::Others);
        s.add_card("2");
        s.set_input_mode(InputMode::Player);
        s.add_card("J");
        s.set_input_mode(InputMode::Others);

        assert!(s.undo());
        assert_eq!(s.player().cards(), ["7"]);
        assert_eq!(s.others(), ["2"]);
    }

    #[test]
    fn new_hand_keeps_count() {
        let mut s = session();
        deal(&mut s, &["2", "3", "4"]);
        s.new_hand();
        assert!(s.dealer().is_empty());
        assert!(s.player().is_empty());
        assert_eq!(s.input_mode(), InputMode::Dealer);
        assert_eq!(s.counter().running_count(), 3);
        assert!(!s.undo());
        assert_eq!(s.counter().running_count(), 3);
    }

    #[test]
    fn new_shoe_resets_count_and_table() {
        let mut s = session();
        deal(&mut s, &["2", "3", "4"]);
        s.new_shoe();
        assert_eq!(s.counter(), &CardCounter::new(6));
        assert!(s.player().is_empty());
    }

    #[test]
    fn set_decks_resets_count_and_uncounts_table() {
        let mut s = session();
        deal(&mut s, &["2", "3", "4"]);
        s.set_decks(2).unwrap();
        assert_eq!(s.counter(), &CardCounter::new(2));
        assert_eq!(s.player().len(), 2);

        s.add_card("5");
        assert!(s.undo());
        assert!(s.undo());
        assert_eq!(s.counter(), &CardCounter::new(2));
        assert_eq!(s.player().cards(), ["3"]);
    }

    #[test]
    fn set_decks_rejects_out_of_range() {
        let mut s = session();
        deal(&mut s, &["2"]);
        assert_eq!(s.set_decks(9), Err(AdvisorError::InvalidDeckCount(9)));
        assert_eq!(s.counter().total_decks(), 6);
        assert_eq!(s.counter().running_count(), 1);
    }

    #[test]
    fn record_result_tallies_and_clears() {
        let mut s = session();
        deal(&mut s, &["9", "A", "K"]);
        s.record_result(HandResult::Win);
        deal(&mut s, &["9", "10", "7"]);
        s.record_result(HandResult::Loss);
        deal(&mut s, &["9", "10", "9"]);
        s.record_result(HandResult::Push);

        let stats = s.stats();
        assert_eq!(stats.hands_played, 3);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.blackjacks, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.pushes, 1);
        assert!((stats.win_rate() - 100.0 / 3.0).abs() < 1e-9);
        assert!(s.player().is_empty());

        s.reset_stats();
        assert_eq!(s.stats(), &SessionStats::default());
        assert_eq!(s.stats().win_rate(), 0.0);
    }

    #[test]
    fn parses_modes_and_results() {
        assert_eq!("Others".parse::<InputMode>(), Ok(InputMode::Others));
        assert_eq!(" dealer ".parse::<InputMode>(), Ok(InputMode::Dealer));
        assert_eq!(
            "table".parse::<InputMode>(),
            Err(AdvisorError::UnknownInputMode("table".to_string()))
        );
        assert_eq!("lose".parse::<HandResult>(), Ok(HandResult::Loss));
        assert_eq!("WIN".parse::<HandResult>(), Ok(HandResult::Win));
        assert!("surrender".parse::<HandResult>().is_err());
    }

    #[test]
    fn snapshot_shape() {
        let mut s = session();
        deal(&mut s, &["A", "10", "6"]);
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(json["inputMode"], "player");
        assert_eq!(json["dealerUpcardValue"], 11);
        assert_eq!(json["dealer"]["display"], "A");
        assert_eq!(json["player"]["total"], 16);
        assert_eq!(json["ready"], true);
        assert_eq!(json["recommendation"]["action"], "Hit");
        assert_eq!(json["count"]["runningCount"], -1);
        assert_eq!(json["count"]["betTier"], "minimum");
        assert_eq!(json["count"]["betMultiplier"], 1);
        assert_eq!(json["count"]["betLabel"], "Minimum");
        assert_eq!(json["stats"]["handsPlayed"], 0);
        assert_eq!(json["winRate"], 0.0);
    }

    #[test]
    fn empty_snapshot() {
        let s = session();
        let snapshot = s.snapshot();
        assert!(snapshot.recommendation.is_none());
        assert_eq!(snapshot.dealer.display, "—");
        assert_eq!(snapshot.dealer_upcard_value, None);
        assert!(!snapshot.ready);
    }
}
