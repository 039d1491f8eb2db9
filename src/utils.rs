use chrono::{DateTime, Local};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const LEDGER_FILE_NAME: &str = "expenses.json";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DESCRIPTION_DISPLAY_CHARS: usize = 30;

/// Resolved on-disk locations for one invocation.
#[derive(Debug, Clone)]
pub struct StudioPaths {
    pub data_dir: PathBuf,
    pub ledger: PathBuf,
    pub config: PathBuf,
}

/// Resolve data and config locations. Explicit overrides win. The data dir
/// defaults to `<platform data dir>/outputs` (or `./outputs` without a home
/// directory) and the config sits next to it at `<data>/../config.json`.
pub fn studio_paths(data_dir: Option<&Path>, config: Option<&Path>) -> StudioPaths {
    let data_dir = match data_dir {
        Some(p) => p.to_path_buf(),
        None => directories::ProjectDirs::from("", "", "studio")
            .map(|p| p.data_dir().join("outputs"))
            .unwrap_or_else(|| PathBuf::from("outputs")),
    };
    let config = match config {
        Some(p) => p.to_path_buf(),
        None => data_dir
            .parent()
            .unwrap_or(Path::new(""))
            .join(CONFIG_FILE_NAME),
    };
    StudioPaths {
        ledger: data_dir.join(LEDGER_FILE_NAME),
        data_dir,
        config,
    }
}

pub fn default_export_path(data_dir: &Path, now: DateTime<Local>) -> PathBuf {
    data_dir.join(format!(
        "expenses_export_{}.csv",
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// Replace `path` with `bytes` in one step: write a sibling temp file, fsync
/// it, then rename over the destination. Readers never see a partial file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn format_currency(v: f64) -> String {
    format!("${v:.2}")
}

/// Per-transaction amounts are small, so they get an extra digit.
pub fn format_cost(v: f64) -> String {
    format!("${v:.3}")
}

pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Truncate on a char boundary, appending "..." when shortened.
pub fn truncate_description(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let head: String = s.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        s.to_owned()
    }
}

pub fn parse_f64_env(var: &str) -> Option<f64> {
    std::env::var(var)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
