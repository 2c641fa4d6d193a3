//! WASM bindings for recurrence-engine.
//!
//! Rules cross the boundary as JSON strings in the same shape the engine's
//! serde derives accept; results come back as a JSON array of `YYYY-MM-DD`
//! strings. Errors are thrown as string `JsValue`s.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p recurrence-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/recurrence_wasm.wasm
//! ```

use chrono::NaiveDate;
use recurrence_engine::{evaluate_batch, evaluate_single, DateRange, RecurrenceRule};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Boundary helpers
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn parse_rule(json: &str) -> Result<RecurrenceRule, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid rule JSON: {}", e))
}

fn parse_rules(json: &str) -> Result<Vec<RecurrenceRule>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid rules JSON: {}", e))
}

/// Both ends or neither; a half-open window is a caller mistake.
fn parse_window(start: Option<&str>, end: Option<&str>) -> Result<Option<DateRange>, String> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(DateRange::new(parse_date(start)?, parse_date(end)?))),
        (None, None) => Ok(None),
        _ => Err("Window start and end must be given together".to_string()),
    }
}

fn to_json(dates: &[NaiveDate]) -> Result<String, String> {
    serde_json::to_string(dates).map_err(|e| format!("Serialization error: {}", e))
}

fn evaluate_json(
    rule_json: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<String, String> {
    let rule = parse_rule(rule_json)?;
    let window = parse_window(start, end)?;
    let dates = evaluate_single(&rule, window).map_err(|e| e.to_string())?;
    to_json(&dates)
}

fn evaluate_batch_json(rules_json: &str, start: &str, end: &str) -> Result<String, String> {
    let rules = parse_rules(rules_json)?;
    let window = DateRange::new(parse_date(start)?, parse_date(end)?);
    let dates = evaluate_batch(&rules, window).map_err(|e| e.to_string())?;
    to_json(&dates)
}

fn validate_json(rule_json: &str) -> Result<(), String> {
    parse_rule(rule_json)?.validate().map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Expand one rule into its occurrence dates.
///
/// `start`/`end` (`YYYY-MM-DD`) bound the result inclusively. When both are
/// omitted the rule's own effective and expiration dates are used, which
/// fails for a rule with no expiration date.
#[wasm_bindgen(js_name = "evaluate")]
pub fn evaluate(
    rule_json: &str,
    start: Option<String>,
    end: Option<String>,
) -> Result<String, JsValue> {
    evaluate_json(rule_json, start.as_deref(), end.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Expand a JSON array of rules against one shared window, concatenated in
/// rule order. Duplicates across rules are kept.
#[wasm_bindgen(js_name = "evaluateBatch")]
pub fn evaluate_batch_rules(rules_json: &str, start: &str, end: &str) -> Result<String, JsValue> {
    evaluate_batch_json(rules_json, start, end).map_err(|e| JsValue::from_str(&e))
}

/// Throw if the rule is malformed (expiration before effective date, zero
/// interval, impossible month/day).
#[wasm_bindgen(js_name = "validateRule")]
pub fn validate_rule(rule_json: &str) -> Result<(), JsValue> {
    validate_json(rule_json).map_err(|e| JsValue::from_str(&e))
}
