use js_sys::Array;
use wasm_bindgen::prelude::*;

pub mod advisor;
pub mod config;
pub mod counter;
pub mod deviation;
pub mod error;
pub mod hand;
pub mod logging;
pub mod rank;
pub mod strategy;

pub use advisor::{advise, recommend, Advice, AdviceRequest, Recommendation, TableState};
pub use config::{ShoeConfig, TableConfig};
pub use counter::{compute_count, compute_count_with, CountState, CountingSystem};
pub use deviation::{insurance_advice, resolve_deviation, Deviation, InsuranceAdvice};
pub use error::AdvisorError;
pub use hand::{evaluate, is_pair, pair_rank_key, HandValue};
pub use rank::{counting_weight, dealer_upcard_value, is_ten_valued, Rank};
pub use strategy::{resolve_baseline, Action, CapabilityFlags};

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{context}: {err}"))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| js_error("Serialization failed", err))
}

#[wasm_bindgen]
pub fn init_logging(level: &str) {
    console_error_panic_hook::set_once();
    logging::init(logging::parse_level(level));
}

#[wasm_bindgen]
pub fn compute_count_state(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: advisor::CountRequest = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| js_error("Invalid input", err))?;

    let result = advisor::count_from_request(&input).map_err(|err| js_error("Count failed", err))?;

    to_js(&result)
}

#[wasm_bindgen]
pub fn evaluate_hand(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: advisor::HandRequest = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| js_error("Invalid input", err))?;

    let result = advisor::hand_from_request(&input).map_err(|err| js_error("Invalid hand", err))?;

    to_js(&result)
}

#[wasm_bindgen]
pub fn recommend_action(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: advisor::RecommendRequest = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| js_error("Invalid input", err))?;

    let result = advisor::recommend_from_request(&input)
        .map_err(|err| js_error("Recommendation failed", err))?;

    to_js(&result)
}

#[wasm_bindgen]
pub fn advise_table(params: &JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let input: AdviceRequest = serde_wasm_bindgen::from_value(params.clone())
        .map_err(|err| js_error("Invalid input", err))?;

    let result = advise(&input).map_err(|err| js_error("Advice failed", err))?;

    to_js(&result)
}

/// Browser-side handle on a `TableState`. The page holds exactly one per
/// seat and funnels every card button through it.
#[wasm_bindgen]
pub struct TableSession {
    state: TableState,
}

#[wasm_bindgen]
impl TableSession {
    #[wasm_bindgen(constructor)]
    pub fn new(config: &JsValue) -> Result<TableSession, JsValue> {
        console_error_panic_hook::set_once();
        let config: TableConfig = if config.is_undefined() || config.is_null() {
            TableConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config.clone())
                .map_err(|err| js_error("Invalid config", err))?
        };
        let state = TableState::new(config).map_err(|err| js_error("Invalid config", err))?;
        Ok(TableSession { state })
    }

    pub fn add_observed_card(&mut self, rank: &str) -> Result<(), JsValue> {
        let rank: Rank = rank.parse().map_err(|err| js_error("Invalid card", err))?;
        self.state
            .add_observed_card(rank)
            .map_err(|err| js_error("Card rejected", err))
    }

    pub fn add_own_card(&mut self, rank: &str) -> Result<(), JsValue> {
        let rank: Rank = rank.parse().map_err(|err| js_error("Invalid card", err))?;
        self.state
            .add_own_card(rank)
            .map_err(|err| js_error("Card rejected", err))
    }

    pub fn set_dealer_up(&mut self, rank: &str) -> Result<(), JsValue> {
        let rank: Rank = rank.parse().map_err(|err| js_error("Invalid card", err))?;
        self.state
            .set_dealer_up(rank)
            .map_err(|err| js_error("Card rejected", err))
    }

    pub fn new_round(&mut self) {
        self.state.new_round();
    }

    pub fn new_shoe(&mut self) {
        self.state.new_shoe();
    }

    pub fn seen_cards(&self) -> Array {
        ranks_to_array(self.state.seen_cards())
    }

    pub fn hand(&self) -> Array {
        ranks_to_array(self.state.hand())
    }

    pub fn count(&self) -> Result<JsValue, JsValue> {
        to_js(&self.state.count())
    }

    pub fn recommend(&self) -> Result<JsValue, JsValue> {
        let result = self
            .state
            .recommend()
            .map_err(|err| js_error("Recommendation failed", err))?;
        to_js(&result)
    }
}

fn ranks_to_array(ranks: &[Rank]) -> Array {
    ranks
        .iter()
        .map(|rank| JsValue::from_str(rank.symbol()))
        .collect()
}
