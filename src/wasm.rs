use crate::parse;
use crate::session::{self, AppState, SessionSignals};
use wasm_bindgen::prelude::*;

/// Parse recipient text and return `[{address, value}]` as JSON.
/// Values are base-unit decimal strings.
#[wasm_bindgen]
pub fn parse_recipients_json(text: &str, decimals: u8) -> String {
    let recipients: Vec<serde_json::Value> = parse::parse_recipients(text, decimals)
        .iter()
        .map(|r| {
            serde_json::json!({
                "address": r.address_hex(),
                "value": r.value.to_string(),
            })
        })
        .collect();
    serde_json::Value::Array(recipients).to_string()
}

/// Run one reduction step: `prior` is a state name such as
/// `"UNLOCK_WALLET"`, `signals` a JSON signal tuple.
#[wasm_bindgen]
pub fn reduce_state_json(prior: &str, signals: &str) -> String {
    let prior: AppState = match serde_json::from_value(serde_json::Value::String(prior.to_string())) {
        Ok(p) => p,
        Err(e) => {
            return serde_json::json!({
                "error": format!("unknown state: {}", e)
            })
            .to_string();
        }
    };
    let signals: SessionSignals = match serde_json::from_str(signals) {
        Ok(s) => s,
        Err(e) => {
            return serde_json::json!({
                "error": format!("JSON parse error: {}", e)
            })
            .to_string();
        }
    };
    serde_json::json!({ "state": session::reduce(prior, &signals) }).to_string()
}

/// Signal tuple accepted by [`reduce_state_json`], as a JS object.
#[wasm_bindgen]
pub fn default_signals() -> Result<JsValue, JsValue> {
    let signals = SessionSignals {
        provider_available: true,
        status: session::WalletStatus::Disconnected,
        chain_id: None,
        chain_supported: false,
        contract_deployed: false,
        bytecode_loading: false,
        has_contract_address: false,
        mode: None,
        token: Default::default(),
    };
    serde_wasm_bindgen::to_value(&signals).map_err(|e| JsValue::from_str(&e.to_string()))
}
