//! Progress Tracker WASM Module
//!
//! Exposes the pure parts of the report pipeline to a browser shell: weight
//! input parsing and history computation over a raw database snapshot.

use progress_tracker_shared::validation::parse_weight_input;
use progress_tracker_shared::{compute_history, DisplayOrder, Report, ReportRecord};
use serde_json::Value;
use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;

/// Parse the weight text field; throws the validation message on failure
#[wasm_bindgen]
pub fn parse_weight(input: &str) -> Result<f64, JsValue> {
    parse_weight_input(input).map_err(|e| JsValue::from_str(&e))
}

/// Percent change from `previous` to `current`, one decimal place
///
/// `undefined` when there is nothing meaningful to show.
#[wasm_bindgen]
pub fn percentage_change(previous: f64, current: f64) -> Option<f64> {
    progress_tracker_shared::percentage_change(previous, current)
}

/// Turn a `reports/{user_id}` snapshot (key → record JSON) into the
/// history list JSON, newest first unless `newest_first` is false
#[wasm_bindgen]
pub fn history(snapshot_json: &str, newest_first: bool) -> Result<String, JsValue> {
    history_json(snapshot_json, newest_first).map_err(|e| JsValue::from_str(&e))
}

fn history_json(snapshot_json: &str, newest_first: bool) -> Result<String, String> {
    let snapshot: Option<BTreeMap<String, Value>> =
        serde_json::from_str(snapshot_json).map_err(|e| format!("invalid snapshot: {e}"))?;

    let reports = snapshot
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| {
            let record: ReportRecord = serde_json::from_value(value).ok()?;
            Report::from_record(key, record).ok()
        });

    let order = if newest_first {
        DisplayOrder::NewestFirst
    } else {
        DisplayOrder::OldestFirst
    };

    serde_json::to_string(&compute_history(reports, order)).map_err(|e| e.to_string())
}
