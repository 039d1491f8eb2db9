use std::fs;
use std::path::PathBuf;

use studio_ledger::LedgerError;
use studio_ledger::ledger::CostLedger;
use tempfile::TempDir;

fn store(dir: &TempDir) -> PathBuf {
    dir.path().join("outputs").join("expenses.json")
}

/// Two records against a 10.0 limit: only the second crosses it.
fn seeded(dir: &TempDir) -> CostLedger {
    let mut ledger = CostLedger::open(store(dir), 10.0).unwrap();
    let first = ledger.record("claude", 3.0, "a").unwrap();
    assert!(!first.budget_exceeded);
    let second = ledger.record("chatterbox", 8.0, "b").unwrap();
    assert!(second.budget_exceeded);
    ledger
}

#[test]
fn test_threshold_crossing_scenario() {
    let dir = TempDir::new().unwrap();
    let ledger = seeded(&dir);

    let status = ledger.status();
    assert_eq!(status.monthly_spent, 11.0);
    assert_eq!(status.total_spent, 11.0);
    assert_eq!(status.transaction_count, 2);
    assert_eq!(status.remaining, -1.0);
    assert!(status.is_over_budget());
}

#[test]
fn test_reset_monthly_keeps_history() {
    let dir = TempDir::new().unwrap();
    let mut ledger = seeded(&dir);

    ledger.reset_monthly().unwrap();

    let status = ledger.status();
    assert_eq!(status.monthly_spent, 0.0);
    assert_eq!(status.total_spent, 11.0);
    assert_eq!(ledger.transactions().len(), 2);

    // Reset is durable too
    let reopened = CostLedger::open(store(&dir), 10.0).unwrap();
    assert_eq!(reopened.status().monthly_spent, 0.0);
    assert_eq!(reopened.status().total_spent, 11.0);

    // Monthly counts only what follows the reset
    let mut ledger = reopened;
    let outcome = ledger.record("seedance", 2.5, "").unwrap();
    assert_eq!(outcome.monthly_spent, 2.5);
    assert!(!outcome.budget_exceeded);
    assert_eq!(ledger.status().total_spent, 13.5);
}

#[test]
fn test_negative_cost_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let mut ledger = seeded(&dir);
    let before = fs::read(store(&dir)).unwrap();
    let state_before = ledger.state().clone();

    let err = ledger.record("claude", -1.0, "refund").unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput { field: "cost", .. }));

    assert_eq!(fs::read(store(&dir)).unwrap(), before);
    assert_eq!(ledger.state(), &state_before);
}

#[test]
fn test_empty_service_rejected() {
    let dir = TempDir::new().unwrap();
    let mut ledger = seeded(&dir);
    let before = fs::read(store(&dir)).unwrap();

    let err = ledger.record("", 1.0, "").unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput { field: "service", .. }));
    assert_eq!(fs::read(store(&dir)).unwrap(), before);
}

#[test]
fn test_reload_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut ledger = seeded(&dir);
    ledger.record("pipeline", 0.0, "dry run").unwrap();
    ledger.record("elevenlabs", 0.0437, "TTS for script 17").unwrap();

    let reopened = CostLedger::open(store(&dir), 10.0).unwrap();
    assert_eq!(reopened.state(), ledger.state());
    assert_eq!(reopened.status(), ledger.status());
}

/// Costs derived from per-char and per-second prices rarely have short
/// decimal forms; every one must reload bit-for-bit.
#[test]
fn test_reload_round_trip_non_terminating_costs() {
    let dir = TempDir::new().unwrap();
    let mut ledger = CostLedger::open(store(&dir), 1_000_000.0).unwrap();
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
    for i in 0..200 {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let cost = ((seed >> 33) % 1_000_000) as f64 / 7919.0;
        ledger.record("elevenlabs", cost, &format!("take {i}")).unwrap();

        let reopened = CostLedger::open(store(&dir), 1_000_000.0).unwrap();
        assert_eq!(reopened.state(), ledger.state(), "diverged after record {i}");
    }
}

#[test]
fn test_totals_reconcile_with_history() {
    let dir = TempDir::new().unwrap();
    let mut ledger = CostLedger::open(store(&dir), 100.0).unwrap();
    let costs = [0.015, 0.01, 0.0912, 3.6, 0.0, 1.25, 0.007];
    for (i, cost) in costs.iter().enumerate() {
        ledger.record("claude", *cost, &format!("step {i}")).unwrap();
        let state = ledger.state();
        assert!((state.total_spent - state.reconciled_total()).abs() < 1e-9);
        assert!((state.monthly_spent - state.reconciled_total()).abs() < 1e-9);
    }

    ledger.reset_monthly().unwrap();
    ledger.record("seedance", 0.36, "").unwrap();
    ledger.record("seedance", 0.12, "").unwrap();
    let state = ledger.state();
    assert!((state.monthly_spent - 0.48).abs() < 1e-9);
    assert!((state.total_spent - state.reconciled_total()).abs() < 1e-9);
}

#[test]
fn test_recent_is_chronological_suffix() {
    let dir = TempDir::new().unwrap();
    let mut ledger = CostLedger::open(store(&dir), 100.0).unwrap();
    for i in 0..8 {
        ledger.record("claude", 0.01, &format!("#{i}")).unwrap();
    }
    let all = ledger.transactions().to_vec();
    for n in [0, 1, 5, 8, 20] {
        let recent = ledger.recent_transactions(n);
        assert!(recent.len() <= n);
        assert!(all.ends_with(recent));
        assert!(recent.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }
}

#[test]
fn test_export_csv_rows() {
    let dir = TempDir::new().unwrap();
    let ledger = seeded(&dir);
    let dest = dir.path().join("exports").join("expenses.csv");

    let rows = ledger.export_csv(&dest).unwrap();
    assert_eq!(rows, 2);

    let mut reader = csv::Reader::from_path(&dest).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["Date", "Service", "Cost", "Description", "Transaction ID"]
    );

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][1], "claude");
    assert_eq!(records[0][2].parse::<f64>().unwrap(), 3.0);
    assert_eq!(&records[0][3], "a");
    assert_eq!(&records[1][1], "chatterbox");
    assert_eq!(records[1][2].parse::<f64>().unwrap(), 8.0);
    assert_eq!(&records[1][3], "b");
    assert!(!records[0][4].is_empty());
    assert_ne!(&records[0][4], &records[1][4]);
    assert_eq!(&records[0][4], ledger.transactions()[0].id.as_str());
}

#[test]
fn test_reads_legacy_store() {
    let dir = TempDir::new().unwrap();
    let path = store(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        r#"{
  "total_spent": 0.615,
  "monthly_spent": 0.615,
  "transactions": [
    {
      "id": "0b0f2f7e-8d0a-4a61-9d5e-1f4f5ad9c7a1",
      "timestamp": "2025-06-02T14:03:11.482913",
      "service": "claude",
      "cost": 0.015,
      "description": "Generated 5 hooks"
    },
    {
      "id": "5c1e7a52-2f0b-4c8a-8f39-0a6c1b7d2e44",
      "timestamp": "2025-06-02T14:09:40.002145",
      "service": "seedance",
      "cost": 0.6,
      "description": "Video generation for sophie"
    }
  ]
}"#,
    )
    .unwrap();

    let mut ledger = CostLedger::open(&path, 100.0).unwrap();
    assert_eq!(ledger.transactions().len(), 2);
    assert_eq!(ledger.transactions()[1].service, "seedance");

    ledger.record("claude", 0.01, "Script generation for 30s").unwrap();
    let reopened = CostLedger::open(&path, 100.0).unwrap();
    assert_eq!(reopened.transactions().len(), 3);
    assert!((reopened.status().total_spent - 0.625).abs() < 1e-9);
}
