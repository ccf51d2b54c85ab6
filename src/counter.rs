use serde::Serialize;

use crate::card::{card_value, hi_lo_tag, DECK_SIZE};
use crate::config::Language;

/// Fewest decks the true count is ever divided by.
const MIN_DECKS_REMAINING: f64 = 0.25;

/// Discrete bet sizing ladder driven by the true count.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BetTier {
    Minimum,
    Double,
    Triple,
    Quintuple,
    Maximum,
}

impl BetTier {
    /// Lower bounds are inclusive: a true count of exactly 2.0 is already `Triple`.
    pub fn from_true_count(true_count: f64) -> Self {
        if true_count <= 0.0 {
            BetTier::Minimum
        } else if true_count < 2.0 {
            BetTier::Double
        } else if true_count < 4.0 {
            BetTier::Triple
        } else if true_count < 6.0 {
            BetTier::Quintuple
        } else {
            BetTier::Maximum
        }
    }

    pub fn multiplier(&self) -> u32 {
        match self {
            BetTier::Minimum => 1,
            BetTier::Double => 2,
            BetTier::Triple => 3,
            BetTier::Quintuple => 5,
            BetTier::Maximum => 8,
        }
    }

    pub fn label(&self, language: Language) -> String {
        match (language, self) {
            (Language::English, BetTier::Minimum) => "Minimum".to_string(),
            (Language::English, BetTier::Maximum) => "Maximum! 8x".to_string(),
            (Language::English, tier) => format!("{}x minimum", tier.multiplier()),
            (Language::Russian, BetTier::Minimum) => "Минимум".to_string(),
            (Language::Russian, BetTier::Maximum) => "Максимум! 8x".to_string(),
            (Language::Russian, tier) => format!("{}x от минимума", tier.multiplier()),
        }
    }
}

/// Hi-Lo running count over a shoe of `total_decks` decks.
#[derive(Debug, Clone, PartialEq)]
pub struct CardCounter {
    total_decks: u32,
    running_count: i32,
    cards_dealt: u32,
}

impl CardCounter {
    pub fn new(total_decks: u32) -> Self {
        CardCounter {
            total_decks,
            running_count: 0,
            cards_dealt: 0,
        }
    }

    /// Count a card by its resolved value.
    pub fn record(&mut self, value: u8) {
        self.running_count += hi_lo_tag(value);
        self.cards_dealt += 1;
    }

    pub fn record_rank(&mut self, rank: &str) {
        self.record(card_value(rank));
    }

    /// Exact inverse of [`record`](Self::record); the dealt count never goes below zero.
    pub fn undo_record(&mut self, value: u8) {
        self.running_count -= hi_lo_tag(value);
        self.cards_dealt = self.cards_dealt.saturating_sub(1);
    }

    pub fn undo_rank(&mut self, rank: &str) {
        self.undo_record(card_value(rank));
    }

    pub fn running_count(&self) -> i32 {
        self.running_count
    }

    pub fn cards_dealt(&self) -> u32 {
        self.cards_dealt
    }

    pub fn total_decks(&self) -> u32 {
        self.total_decks
    }

    fn total_cards(&self) -> u32 {
        self.total_decks * DECK_SIZE
    }

    /// Never below one card, even once more cards were seen than the shoe holds.
    pub fn cards_remaining(&self) -> u32 {
        self.total_cards().saturating_sub(self.cards_dealt).max(1)
    }

    pub fn decks_remaining(&self) -> f64 {
        f64::from(self.cards_remaining()) / f64::from(DECK_SIZE)
    }

    pub fn true_count(&self) -> f64 {
        let decks = self.decks_remaining().max(MIN_DECKS_REMAINING);
        f64::from(self.running_count) / decks
    }

    /// Fraction of the shoe already dealt.
    pub fn penetration(&self) -> f64 {
        match self.total_cards() {
            0 => 0.0,
            total => f64::from(self.cards_dealt) / f64::from(total),
        }
    }

    pub fn bet_recommendation(&self) -> BetTier {
        BetTier::from_true_count(self.true_count())
    }

    /// Rough player edge in percent: a 0.5% house edge offset by 0.5% per true count.
    pub fn player_advantage(&self) -> f64 {
        -0.5 + self.true_count() * 0.5
    }

    pub fn reset_shoe(&mut self) {
        log::debug!(
            "shoe reset at running count {} after {} cards",
            self.running_count,
            self.cards_dealt
        );
        self.running_count = 0;
        self.cards_dealt = 0;
    }

    pub fn set_decks(&mut self, total_decks: u32) {
        self.total_decks = total_decks;
        self.reset_shoe();
    }
}

impl Default for CardCounter {
    fn default() -> Self {
        CardCounter::new(6)
    }
}
