use serde::Serialize;

use crate::card::{card_value, value_symbol};
use crate::config::Language;
use crate::hand::{hand_value, is_pair};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
}

impl Action {
    pub fn from_code(code: &str) -> Action {
        match code {
            "S" => Action::Stand,
            "D" => Action::Double,
            "P" => Action::Split,
            _ => Action::Hit,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Action::Hit => "H",
            Action::Stand => "S",
            Action::Double => "D",
            Action::Split => "P",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::English, Action::Hit) => "HIT",
            (Language::English, Action::Stand) => "STAND",
            (Language::English, Action::Double) => "DOUBLE",
            (Language::English, Action::Split) => "SPLIT",
            (Language::Russian, Action::Hit) => "ЕЩЁ",
            (Language::Russian, Action::Stand) => "ХВАТИТ",
            (Language::Russian, Action::Double) => "ДАБЛ",
            (Language::Russian, Action::Split) => "СПЛИТ",
        }
    }
}

/// Which step of the decision produced the action.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Basis {
    Blackjack,
    Bust,
    PairSplit,
    SoftTable,
    HardTable,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub action: Action,
    pub action_code: &'static str,
    pub action_label: &'static str,
    pub rationale: String,
    pub basis: Basis,
    pub total: u32,
    pub is_soft: bool,
    pub is_pair: bool,
}

/// One row per player key, one column per dealer value 2..=11.
type StrategyRow = (u32, [Action; 10]);

use Action::{Double as D, Hit as H, Split as P, Stand as S};

static HARD_TABLE: [StrategyRow; 17] = [
    (5, [H, H, H, H, H, H, H, H, H, H]),
    (6, [H, H, H, H, H, H, H, H, H, H]),
    (7, [H, H, H, H, H, H, H, H, H, H]),
    (8, [H, H, H, H, H, H, H, H, H, H]),
    (9, [H, D, D, D, D, H, H, H, H, H]),
    (10, [D, D, D, D, D, D, D, D, H, H]),
    (11, [D, D, D, D, D, D, D, D, D, H]),
    (12, [H, H, S, S, S, H, H, H, H, H]),
    (13, [S, S, S, S, S, H, H, H, H, H]),
    (14, [S, S, S, S, S, H, H, H, H, H]),
    (15, [S, S, S, S, S, H, H, H, H, H]),
    (16, [S, S, S, S, S, H, H, H, H, H]),
    (17, [S, S, S, S, S, S, S, S, S, S]),
    (18, [S, S, S, S, S, S, S, S, S, S]),
    (19, [S, S, S, S, S, S, S, S, S, S]),
    (20, [S, S, S, S, S, S, S, S, S, S]),
    (21, [S, S, S, S, S, S, S, S, S, S]),
];

// Keyed by the soft total, so A-2 is soft 13.
static SOFT_TABLE: [StrategyRow; 9] = [
    (13, [H, H, H, D, D, H, H, H, H, H]),
    (14, [H, H, H, D, D, H, H, H, H, H]),
    (15, [H, H, D, D, D, H, H, H, H, H]),
    (16, [H, H, D, D, D, H, H, H, H, H]),
    (17, [H, D, D, D, D, H, H, H, H, H]),
    (18, [D, D, D, D, D, S, S, H, H, H]),
    (19, [S, S, S, S, S, S, S, S, S, S]),
    (20, [S, S, S, S, S, S, S, S, S, S]),
    (21, [S, S, S, S, S, S, S, S, S, S]),
];

// Keyed by the value of one card of the pair. Only `P` entries are acted on;
// anything else means the hand is played from the soft or hard table.
static PAIR_TABLE: [StrategyRow; 10] = [
    (2, [P, P, P, P, P, P, H, H, H, H]),
    (3, [P, P, P, P, P, P, H, H, H, H]),
    (4, [H, H, H, P, P, H, H, H, H, H]),
    (5, [D, D, D, D, D, D, D, D, H, H]),
    (6, [P, P, P, P, P, H, H, H, H, H]),
    (7, [P, P, P, P, P, P, H, H, H, H]),
    (8, [P, P, P, P, P, P, P, P, P, P]),
    (9, [P, P, P, P, P, S, P, P, S, S]),
    (10, [S, S, S, S, S, S, S, S, S, S]),
    (11, [P, P, P, P, P, P, P, P, P, P]),
];

fn find_row(table: &'static [StrategyRow], key: u32) -> Option<&'static [Action; 10]> {
    table.iter().find(|(row_key, _)| *row_key == key).map(|(_, row)| row)
}

/// Action for `dealer` within a row; a missing column falls back to Hit.
fn lookup_column(row: &[Action; 10], dealer: u8) -> Action {
    match dealer {
        2..=11 => row[usize::from(dealer - 2)],
        _ => Action::Hit,
    }
}

fn lookup_pair(pair_value: u8, dealer: u8) -> Option<Action> {
    find_row(&PAIR_TABLE, u32::from(pair_value)).map(|row| lookup_column(row, dealer))
}

fn lookup_soft_or_hard(total: u32, is_soft: bool, dealer: u8) -> (Action, Basis) {
    if is_soft {
        if let Some(row) = find_row(&SOFT_TABLE, total) {
            return (lookup_column(row, dealer), Basis::SoftTable);
        }
    }
    if let Some(row) = find_row(&HARD_TABLE, total) {
        return (lookup_column(row, dealer), Basis::HardTable);
    }
    (default_action(total), Basis::Fallback)
}

fn default_action(total: u32) -> Action {
    if total >= 17 {
        Action::Stand
    } else {
        Action::Hit
    }
}

/// Basic-strategy recommendation for the player's hand against the dealer upcard.
///
/// Callers must supply at least two player cards and the dealer's upcard; the
/// result for fewer cards is well defined but meaningless. Decision order:
///
/// 1. two-card 21 stands as blackjack
/// 2. a bust hand stands, reported as neither soft nor a pair
/// 3. a splittable pair splits when the pair table says so
/// 4. the soft table, then the hard table, then stand on 17+ / hit below
/// 5. a Double that cannot be taken becomes Hit
pub fn recommend<C: AsRef<str>>(
    player_cards: &[C],
    dealer_upcard: &str,
    can_double: bool,
    can_split: bool,
    language: Language,
) -> Recommendation {
    let dealer = card_value(dealer_upcard);
    let (total, is_soft) = hand_value(player_cards);
    let two_cards = player_cards.len() == 2;
    let pair = two_cards && is_pair(player_cards);

    if two_cards && total == 21 {
        let rationale = blackjack_rationale(language);
        return build(Action::Stand, Basis::Blackjack, rationale, total, is_soft, pair, language);
    }

    if total > 21 {
        let rationale = bust_rationale(language);
        return build(Action::Stand, Basis::Bust, rationale, total, false, false, language);
    }

    if pair && can_split {
        let pair_value = card_value(player_cards[0].as_ref());
        if lookup_pair(pair_value, dealer) == Some(Action::Split) {
            let rationale = pair_rationale(pair_value, dealer, language);
            return build(Action::Split, Basis::PairSplit, rationale, total, is_soft, true, language);
        }
    }

    let (mut action, basis) = lookup_soft_or_hard(total, is_soft, dealer);
    if action == Action::Double && !can_double {
        action = Action::Hit;
    }

    let rationale = table_rationale(action, total, is_soft, dealer, language);
    build(action, basis, rationale, total, is_soft, pair, language)
}

fn build(
    action: Action,
    basis: Basis,
    rationale: String,
    total: u32,
    is_soft: bool,
    is_pair: bool,
    language: Language,
) -> Recommendation {
    log::debug!(
        "recommend: total={total} soft={is_soft} pair={is_pair} -> {} ({basis:?})",
        action.as_code()
    );
    Recommendation {
        action,
        action_code: action.as_code(),
        action_label: action.label(language),
        rationale,
        basis,
        total,
        is_soft,
        is_pair,
    }
}

fn blackjack_rationale(language: Language) -> String {
    match language {
        Language::English => "Blackjack!".to_string(),
        Language::Russian => "Блэкджек!".to_string(),
    }
}

fn bust_rationale(language: Language) -> String {
    match language {
        Language::English => "Bust!".to_string(),
        Language::Russian => "Перебор!".to_string(),
    }
}

fn pair_rationale(pair_value: u8, dealer: u8, language: Language) -> String {
    let dealer = dealer_symbol(dealer, language);
    match language {
        Language::English => match pair_value {
            11 => "Aces: always split".to_string(),
            8 => "Eights: always split".to_string(),
            v => format!("Split {} against dealer {dealer}", pair_name_en(v)),
        },
        Language::Russian => match pair_value {
            11 => "Тузы: всегда делим".to_string(),
            8 => "Восьмёрки: всегда делим".to_string(),
            v => format!("Делим {} против дилера {dealer}", pair_name_ru(v)),
        },
    }
}

fn pair_name_en(value: u8) -> String {
    match value {
        2 => "twos".to_string(),
        3 => "threes".to_string(),
        4 => "fours".to_string(),
        6 => "sixes".to_string(),
        7 => "sevens".to_string(),
        9 => "nines".to_string(),
        v => format!("{v}-{v}"),
    }
}

fn pair_name_ru(value: u8) -> String {
    match value {
        2 => "двойки".to_string(),
        3 => "тройки".to_string(),
        4 => "четвёрки".to_string(),
        6 => "шестёрки".to_string(),
        7 => "семёрки".to_string(),
        9 => "девятки".to_string(),
        v => format!("{v}-{v}"),
    }
}

fn dealer_symbol(dealer: u8, language: Language) -> String {
    match (language, dealer) {
        (Language::Russian, 11) => "Т".to_string(),
        _ => value_symbol(dealer),
    }
}

fn table_rationale(action: Action, total: u32, is_soft: bool, dealer: u8, language: Language) -> String {
    let hand_type = if is_soft { "Soft" } else { "Hard" };
    let dealer_str = dealer_symbol(dealer, language);
    let label = action.label(language);
    let (strong, weak_dealer, strong_dealer, weak_hand, double) = match language {
        Language::English => (
            "strong hand, stand",
            "dealer is weak, stand",
            "dealer is strong, hit",
            "weak hand, hit",
            "favourable spot, double!",
        ),
        Language::Russian => (
            "сильная рука, стоим",
            "дилер слабый, стоим",
            "дилер сильный, берём",
            "рука слабая, берём",
            "выгодная позиция, удваиваем!",
        ),
    };

    match action {
        Action::Stand if total >= 17 => format!("{hand_type} {total}: {strong}"),
        Action::Stand if dealer <= 6 => format!("{hand_type} {total} vs {dealer_str}: {weak_dealer}"),
        Action::Hit if dealer >= 7 => format!("{hand_type} {total} vs {dealer_str}: {strong_dealer}"),
        Action::Hit => format!("{hand_type} {total} vs {dealer_str}: {weak_hand}"),
        Action::Double => format!("{hand_type} {total} vs {dealer_str}: {double}"),
        _ => format!("{hand_type} {total} vs {dealer_str} → {label}"),
    }
}
