use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::EnvFilter;

use studio_ledger::cli::{Args, BudgetAction, Command};
use studio_ledger::config::{self, StudioConfig};
use studio_ledger::display::{
    build_estimate_json, build_status_json, print_actors, print_budget_status, print_estimate,
    print_exported, print_json, print_record_outcome, print_transactions, transaction_json,
};
use studio_ledger::ledger::CostLedger;
use studio_ledger::pricing::estimate_pipeline;
use studio_ledger::utils::{StudioPaths, default_export_path, studio_paths};

const RECENT_IN_STATUS: usize = 5;

fn init_logging(debug: bool) {
    let fallback = if debug { "studio_ledger=debug,studio=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_ledger(paths: &StudioPaths, config: &StudioConfig) -> Result<CostLedger> {
    CostLedger::open(&paths.ledger, config.monthly_limit())
        .with_context(|| format!("open ledger {}", paths.ledger.display()))
}

fn run_budget(args: &Args, action: &BudgetAction, paths: &StudioPaths) -> Result<()> {
    let config = StudioConfig::load(&paths.config)?;
    match action {
        BudgetAction::Show => {
            let ledger = open_ledger(paths, &config)?;
            let status = ledger.status();
            let recent = ledger.recent_transactions(RECENT_IN_STATUS);
            if args.json {
                print_json(&build_status_json(&status, recent))?;
            } else {
                print_budget_status(&status);
                if !recent.is_empty() {
                    println!();
                    print_transactions("Recent Transactions", recent);
                }
            }
        }
        BudgetAction::Set { amount } => {
            config::set_monthly_limit(&paths.config, *amount)?;
            if args.json {
                print_json(&serde_json::json!({ "monthly_limit": amount }))?;
            } else {
                println!("✅ Monthly budget limit set to ${amount:.2}");
            }
        }
        BudgetAction::Reset => {
            let mut ledger = open_ledger(paths, &config)?;
            ledger.reset_monthly().context("reset monthly spend")?;
            if args.json {
                print_json(&build_status_json(&ledger.status(), &[]))?;
            } else {
                println!("✅ Monthly spending reset to $0.00");
            }
        }
        BudgetAction::Export { file } => {
            let ledger = open_ledger(paths, &config)?;
            let dest = file
                .clone()
                .unwrap_or_else(|| default_export_path(&paths.data_dir, Local::now()));
            let rows = ledger.export_csv(&dest)?;
            if args.json {
                print_json(&serde_json::json!({
                    "path": dest.display().to_string(),
                    "rows": rows,
                }))?;
            } else {
                print_exported(&dest, rows);
            }
        }
        BudgetAction::Recent { count } => {
            let ledger = open_ledger(paths, &config)?;
            let recent = ledger.recent_transactions(*count);
            if args.json {
                print_json(&serde_json::Value::Array(
                    recent.iter().map(transaction_json).collect(),
                ))?;
            } else {
                print_transactions("Recent Transactions", recent);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let paths = studio_paths(args.data_dir.as_deref(), args.config.as_deref());
    tracing::debug!(
        ledger = %paths.ledger.display(),
        config = %paths.config.display(),
        "resolved paths"
    );

    match &args.command {
        Command::Budget { action } => {
            run_budget(&args, action.as_ref().unwrap_or(&BudgetAction::Show), &paths)?;
        }
        Command::Record {
            service,
            cost,
            description,
        } => {
            let config = StudioConfig::load(&paths.config)?;
            let mut ledger = open_ledger(&paths, &config)?;
            let outcome = ledger
                .record(service, *cost, description)
                .context("expense was NOT recorded")?;
            if args.json {
                print_json(&serde_json::to_value(&outcome)?)?;
            } else {
                print_record_outcome(&outcome);
            }
        }
        Command::Estimate {
            duration,
            tts,
            video,
        } => {
            let config = StudioConfig::load(&paths.config)?;
            let est = estimate_pipeline(*duration, (*tts).into(), (*video).into(), &config.engines);
            if args.json {
                print_json(&build_estimate_json(&est))?;
            } else {
                print_estimate(&est);
            }
        }
        Command::Actors => {
            let config = StudioConfig::load(&paths.config)?;
            if args.json {
                print_json(&serde_json::to_value(&config.actors)?)?;
            } else {
                print_actors(&config);
            }
        }
    }
    Ok(())
}
