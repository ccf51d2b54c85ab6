/// Cards per standard deck.
pub const DECK_SIZE: u32 = 52;

/// Resolve a rank token to its blackjack value.
///
/// Tokens are trimmed and uppercased first. Accepted alphabets:
///
/// * Latin: `2`..`9`, `10`, `J`, `Q`, `K`, `T` (ten) and `A`, `1`, `ACE` (ace)
/// * Cyrillic: `В`, `Д`, `К` (ten-value faces) and `Т` (туз, ace)
///
/// Ten-value cards collapse to 10 and the ace is 11. Any other all-digit
/// token resolves to its numeric value; everything else resolves to 0.
pub fn card_value(rank: &str) -> u8 {
    let rank = rank.trim().to_uppercase();
    match rank.as_str() {
        "10" | "J" | "Q" | "K" | "T" | "В" | "Д" | "К" => 10,
        "A" | "1" | "ACE" | "Т" => 11,
        digits if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
            digits.parse::<u8>().unwrap_or(0)
        }
        _ => 0,
    }
}

/// Hi-Lo weight of a resolved card value.
pub fn hi_lo_tag(value: u8) -> i32 {
    match value {
        2..=6 => 1,
        7..=9 => 0,
        10 | 11 => -1,
        _ => 0,
    }
}

/// Label used for a dealer value in rationale text.
pub(crate) fn value_symbol(value: u8) -> String {
    if value == 11 {
        "A".to_string()
    } else {
        value.to_string()
    }
}
