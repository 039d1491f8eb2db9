use serde_json::Value;

use studio_ledger::config::{EnginesConfig, TtsEngine, VideoEngine};
use studio_ledger::display::{build_estimate_json, build_status_json};
use studio_ledger::models::{BudgetStatus, LedgerState, Transaction};
use studio_ledger::pricing::estimate_pipeline;

#[test]
fn status_json_shape() {
    let mut state = LedgerState::default();
    state.append(Transaction::new("claude", 3.0, "a"));
    state.append(Transaction::new("chatterbox", 8.0, "b"));
    let status = BudgetStatus::new(10.0, &state);

    let json: Value = build_status_json(&status, &state.transactions[1..]);

    for key in [
        "monthly_limit",
        "monthly_spent",
        "remaining",
        "total_spent",
        "transaction_count",
        "over_budget",
        "recent",
    ] {
        assert!(json.get(key).is_some(), "missing key: {}", key);
    }

    assert_eq!(json["monthly_limit"], 10.0);
    assert_eq!(json["monthly_spent"], 11.0);
    assert_eq!(json["remaining"], -1.0);
    assert_eq!(json["transaction_count"], 2);
    assert_eq!(json["over_budget"], true);

    let recent = json["recent"].as_array().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["service"], "chatterbox");
    assert_eq!(recent[0]["description"], "b");
    assert!(recent[0]["id"].as_str().is_some_and(|s| !s.is_empty()));
    assert!(recent[0]["timestamp"].is_string());
}

#[test]
fn estimate_json_shape() {
    let est = estimate_pipeline(
        20,
        TtsEngine::Elevenlabs,
        VideoEngine::Seedance,
        &EnginesConfig::default(),
    );
    let json = build_estimate_json(&est);

    assert_eq!(json["duration_secs"], 20);
    assert_eq!(json["tts"]["engine"], "elevenlabs");
    assert_eq!(json["tts"]["chars"], 200);
    assert_eq!(json["video"]["engine"], "seedance");
    assert!(json["total"].is_number());
    let total = json["total"].as_f64().unwrap();
    assert!((total - (20.0 * 0.12 + 0.01)).abs() < 1e-9);
}
