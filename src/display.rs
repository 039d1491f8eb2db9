#[cfg(feature = "colors")]
use owo_colors::OwoColorize;

// Provide a no-op color shim when "colors" feature is disabled
#[cfg(not(feature = "colors"))]
pub mod color_shim {
    use std::fmt::{self, Display, Formatter};

    #[derive(Clone)]
    pub struct Plain(pub String);

    impl Display for Plain {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    pub trait ColorizeShim {
        fn as_str(&self) -> &str;

        fn bright_black(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn blue(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn cyan(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn magenta(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn red(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn yellow(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn green(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn white(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn bold(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn dimmed(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
    }

    impl ColorizeShim for &str {
        fn as_str(&self) -> &str {
            self
        }
    }
    impl ColorizeShim for String {
        fn as_str(&self) -> &str {
            self.as_str()
        }
    }
    impl ColorizeShim for Plain {
        fn as_str(&self) -> &str {
            &self.0
        }
    }
}

#[cfg(not(feature = "colors"))]
use color_shim::ColorizeShim as OwoColorize;

use serde_json::{Value, json};
use std::path::Path;

use crate::config::StudioConfig;
use crate::models::{BudgetStatus, RecordOutcome, Transaction};
use crate::pricing::PipelineEstimate;
use crate::utils::{
    DESCRIPTION_DISPLAY_CHARS, format_cost, format_currency, format_timestamp,
    truncate_description,
};

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn transaction_json(t: &Transaction) -> Value {
    json!({
        "id": t.id,
        "timestamp": t.timestamp.to_rfc3339(),
        "service": t.service,
        "cost": t.cost,
        "description": t.description,
    })
}

/// Machine-readable budget status, including the latest transactions.
pub fn build_status_json(status: &BudgetStatus, recent: &[Transaction]) -> Value {
    json!({
        "monthly_limit": status.monthly_limit,
        "monthly_spent": round2(status.monthly_spent),
        "remaining": round2(status.remaining),
        "total_spent": round2(status.total_spent),
        "transaction_count": status.transaction_count,
        "over_budget": status.is_over_budget(),
        "recent": recent.iter().map(transaction_json).collect::<Vec<_>>(),
    })
}

pub fn build_estimate_json(est: &PipelineEstimate) -> Value {
    json!({
        "duration_secs": est.duration_secs,
        "tts": {
            "engine": est.tts_engine.as_str(),
            "chars": est.tts_chars,
            "cost": est.tts_cost,
        },
        "video": {
            "engine": est.video_engine.as_str(),
            "cost": est.video_cost,
        },
        "claude": { "cost": est.claude_cost },
        "total": est.total,
    })
}

pub fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_budget_status(status: &BudgetStatus) {
    let over = status.is_over_budget();
    println!("{}", "Budget Status".bold());
    println!(
        "  {:<20} {:>12}  {}",
        "Monthly Limit".cyan(),
        format_currency(status.monthly_limit),
        "✅"
    );
    let spent = format!("{:>12}", format_currency(status.monthly_spent));
    println!(
        "  {:<20} {}  {}",
        "Current Spent".cyan(),
        if over {
            spent.yellow().bold().to_string()
        } else {
            spent.white().to_string()
        },
        if over { "⚠️" } else { "✅" }
    );
    let remaining = format!("{:>12}", format_currency(status.remaining));
    println!(
        "  {:<20} {}  {}",
        "Remaining".cyan(),
        if over {
            remaining.red().bold().to_string()
        } else {
            remaining.green().to_string()
        },
        if over { "❌" } else { "✅" }
    );
    println!(
        "  {:<20} {:>12}  {}",
        "Lifetime Spent".cyan(),
        format_currency(status.total_spent),
        "💰"
    );
    println!(
        "  {:<20} {:>12}  {}",
        "Total Transactions".cyan(),
        status.transaction_count,
        "📊"
    );
}

pub fn print_transactions(title: &str, transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("{}", "No transactions recorded".dimmed());
        return;
    }
    println!("{}", title.bold());
    println!(
        "  {:<16}  {:<12}  {:>9}  {}",
        "Date".cyan(),
        "Service".cyan(),
        "Cost".cyan(),
        "Description".cyan()
    );
    for t in transactions {
        println!(
            "  {:<16}  {:<12}  {:>9}  {}",
            format_timestamp(&t.timestamp),
            t.service,
            format_cost(t.cost).green().to_string(),
            truncate_description(&t.description, DESCRIPTION_DISPLAY_CHARS).yellow()
        );
    }
}

/// The over-budget advisory itself is logged by the ledger; this only
/// colors the running total.
pub fn print_record_outcome(outcome: &RecordOutcome) {
    let t = &outcome.transaction;
    println!(
        "{} {} {} {}",
        "✅ Recorded".green(),
        t.service.bold(),
        format_cost(t.cost),
        format!("({})", t.id).bright_black()
    );
    let month = format!(
        "{} / {}",
        format_currency(outcome.monthly_spent),
        format_currency(outcome.monthly_limit)
    );
    println!(
        "   monthly: {}",
        if outcome.budget_exceeded {
            month.red().bold().to_string()
        } else {
            month.dimmed().to_string()
        }
    );
}

pub fn print_estimate(est: &PipelineEstimate) {
    println!(
        "{} {}s clip",
        "💰 Pipeline estimate for".bold(),
        est.duration_secs
    );
    println!(
        "  {:<8} {:<12} {:>9}  {}",
        "TTS".cyan(),
        est.tts_engine.as_str(),
        format_cost(est.tts_cost),
        format!("({} chars)", est.tts_chars).dimmed()
    );
    println!(
        "  {:<8} {:<12} {:>9}",
        "Video".cyan(),
        est.video_engine.as_str(),
        format_cost(est.video_cost)
    );
    println!(
        "  {:<8} {:<12} {:>9}",
        "Claude".cyan(),
        "claude",
        format_cost(est.claude_cost)
    );
    println!(
        "  {:<8} {:<12} {}",
        "Total".bold(),
        "",
        format_cost(est.total).yellow().bold()
    );
}

pub fn print_actors(config: &StudioConfig) {
    if config.actors.is_empty() {
        println!("{}", "No actors configured".dimmed());
        return;
    }
    println!("{}", "Available Actors".bold());
    for (id, actor) in &config.actors {
        println!(
            "  {:<12} {:<12} {:<8} {:<10} {:<8} {}",
            id.cyan(),
            actor.name,
            actor.age_range.green(),
            actor.category.yellow(),
            actor.languages.join(", ").blue(),
            truncate_description(&actor.persona, DESCRIPTION_DISPLAY_CHARS).magenta()
        );
    }
}

pub fn print_exported(path: &Path, rows: usize) {
    println!(
        "{} {} {}",
        "✅ Expenses exported to:".green(),
        path.display(),
        format!("({rows} rows)").dimmed()
    );
}
