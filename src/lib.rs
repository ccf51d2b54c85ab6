use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

mod card;
mod config;
mod counter;
mod error;
mod hand;
mod logger;
mod session;
mod strategy;

pub use card::{card_value, hi_lo_tag, DECK_SIZE};
pub use config::{AdvisorConfig, Language, MAX_DECKS, MIN_DECKS};
pub use counter::{BetTier, CardCounter};
pub use error::AdvisorError;
pub use hand::{hand_value, is_blackjack, is_bust, is_pair, Hand};
pub use session::{
    CountView, HandResult, HandView, InputMode, Session, SessionSnapshot, SessionStats,
};
pub use strategy::{recommend, Action, Basis, Recommendation};

fn init() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HandValue {
    total: u32,
    is_soft: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendInput {
    player_cards: Vec<String>,
    dealer_upcard: String,
    #[serde(default)]
    can_double: Option<bool>,
    #[serde(default)]
    can_split: Option<bool>,
    #[serde(default)]
    language: Language,
}

#[wasm_bindgen]
pub fn resolve_card_value(rank: &str) -> u8 {
    card_value(rank)
}

#[wasm_bindgen]
pub fn evaluate_hand(ranks: &JsValue) -> Result<JsValue, JsValue> {
    init();
    let ranks: Vec<String> = serde_wasm_bindgen::from_value(ranks.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let (total, is_soft) = hand_value(&ranks);

    serde_wasm_bindgen::to_value(&HandValue { total, is_soft })
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

/// Stateless advice. Double and split eligibility default to what the hand allows.
#[wasm_bindgen]
pub fn recommend_action(params: &JsValue) -> Result<JsValue, JsValue> {
    init();
    let input: RecommendInput = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;

    let can_double = input.can_double.unwrap_or(input.player_cards.len() == 2);
    let can_split = input.can_split.unwrap_or_else(|| is_pair(&input.player_cards));
    let result = recommend(
        &input.player_cards,
        &input.dealer_upcard,
        can_double,
        can_split,
        input.language,
    );

    serde_wasm_bindgen::to_value(&result)
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

/// Stateful handle for a shell: one deal, one shoe, one session tally.
#[wasm_bindgen]
pub struct Advisor {
    session: Session,
}

#[wasm_bindgen]
impl Advisor {
    #[wasm_bindgen(constructor)]
    pub fn new(config: &JsValue) -> Result<Advisor, JsValue> {
        init();
        let config: AdvisorConfig = if config.is_undefined() || config.is_null() {
            AdvisorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config.clone())
                .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?
        };

        let session = Session::new(&config)
            .map_err(|err| JsValue::from_str(&format!("Invalid config: {err}")))?;
        Ok(Advisor { session })
    }

    #[wasm_bindgen(js_name = addCard)]
    pub fn add_card(&mut self, rank: &str) -> Result<JsValue, JsValue> {
        let zone = self.session.add_card(rank);
        serde_wasm_bindgen::to_value(&zone)
            .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    #[wasm_bindgen(js_name = setInputMode)]
    pub fn set_input_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: InputMode = mode
            .parse()
            .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;
        self.session.set_input_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(js_name = newHand)]
    pub fn new_hand(&mut self) {
        self.session.new_hand();
    }

    #[wasm_bindgen(js_name = newShoe)]
    pub fn new_shoe(&mut self) {
        self.session.new_shoe();
    }

    #[wasm_bindgen(js_name = setDecks)]
    pub fn set_decks(&mut self, num_decks: u32) -> Result<(), JsValue> {
        self.session
            .set_decks(num_decks)
            .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))
    }

    #[wasm_bindgen(js_name = setLanguage)]
    pub fn set_language(&mut self, language: &JsValue) -> Result<(), JsValue> {
        let language: Language = serde_wasm_bindgen::from_value(language.clone())
            .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;
        self.session.set_language(language);
        Ok(())
    }

    #[wasm_bindgen(js_name = recordResult)]
    pub fn record_result(&mut self, result: &str) -> Result<(), JsValue> {
        let result: HandResult = result
            .parse()
            .map_err(|err| JsValue::from_str(&format!("Invalid input: {err}")))?;
        self.session.record_result(result);
        Ok(())
    }

    #[wasm_bindgen(js_name = resetStats)]
    pub fn reset_stats(&mut self) {
        self.session.reset_stats();
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.snapshot())
            .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
    }
}
