use serde::Serialize;

use crate::card::card_value;

/// Total and softness of a hand, reducing aces from 11 to 1 while bust.
pub fn hand_value<S: AsRef<str>>(cards: &[S]) -> (u32, bool) {
    let mut total = 0u32;
    let mut aces = 0;

    for card in cards {
        let value = card_value(card.as_ref());
        total += u32::from(value);
        if value == 11 { aces += 1; }
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    (total, aces > 0)
}

/// Exactly two cards of equal resolved value.
pub fn is_pair<S: AsRef<str>>(cards: &[S]) -> bool {
    cards.len() == 2 && card_value(cards[0].as_ref()) == card_value(cards[1].as_ref())
}

pub fn is_blackjack<S: AsRef<str>>(cards: &[S]) -> bool {
    cards.len() == 2 && hand_value(cards).0 == 21
}

pub fn is_bust<S: AsRef<str>>(cards: &[S]) -> bool {
    hand_value(cards).0 > 21
}

/// Cards of one seat in the current deal, in the order they were entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hand {
    cards: Vec<String>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rank: &str) {
        self.cards.push(rank.to_string());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.cards.pop()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[String] {
        &self.cards
    }

    pub fn first(&self) -> Option<&str> {
        self.cards.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn total(&self) -> u32 {
        hand_value(&self.cards).0
    }

    pub fn is_soft(&self) -> bool {
        hand_value(&self.cards).1
    }

    pub fn is_pair(&self) -> bool {
        is_pair(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }

    /// Doubling is only offered on the first two cards.
    pub fn can_double(&self) -> bool {
        self.cards.len() == 2
    }

    pub fn can_split(&self) -> bool {
        self.is_pair()
    }

    /// Space separated ranks, or a dash for an empty hand.
    pub fn display(&self) -> String {
        if self.cards.is_empty() {
            return "—".to_string();
        }
        self.cards.join(" ")
    }
}
