//! # Studio configuration
//!
//! Typed view of `config.json`: budget limit, actor roster, per-engine
//! pricing and output formats. Every section is optional; a missing file
//! yields the defaults (monthly limit of 100.0).
//!
//! The monthly limit can be overridden with `STUDIO_MONTHLY_LIMIT`.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::ledger::DEFAULT_MONTHLY_LIMIT;
use crate::utils::{parse_f64_env, write_atomic};

pub const DEFAULT_VIDEO_COST_PER_SECOND: f64 = 0.12;

fn default_monthly_limit() -> f64 {
    DEFAULT_MONTHLY_LIMIT
}

fn default_video_cost_per_second() -> f64 {
    DEFAULT_VIDEO_COST_PER_SECOND
}

fn default_language() -> String {
    "fr".to_string()
}

fn default_gender() -> String {
    "female".to_string()
}

fn default_voice_style() -> String {
    "neutral".to_string()
}

fn default_resolution() -> String {
    "1080x1920".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    #[serde(default = "default_monthly_limit")]
    pub monthly_limit: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            monthly_limit: DEFAULT_MONTHLY_LIMIT,
        }
    }
}

/// An on-screen persona the video stages can render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorConfig {
    pub name: String,
    #[serde(default)]
    pub age_range: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub persona: String,
    /// Portrait image, relative to the config file when not absolute
    #[serde(default)]
    pub portrait: String,
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default = "default_voice_style")]
    pub voice_style: String,
}

impl ActorConfig {
    pub fn speaks(&self, lang: &str) -> bool {
        self.languages.iter().any(|l| l.eq_ignore_ascii_case(lang))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TtsPricing {
    #[serde(default)]
    pub cost_per_char: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoPricing {
    #[serde(default = "default_video_cost_per_second")]
    pub cost_per_second: f64,
}

impl Default for VideoPricing {
    fn default() -> Self {
        Self {
            cost_per_second: DEFAULT_VIDEO_COST_PER_SECOND,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsEngine {
    Chatterbox,
    Elevenlabs,
}

impl TtsEngine {
    /// Service name used for ledger entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chatterbox => "chatterbox",
            Self::Elevenlabs => "elevenlabs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoEngine {
    Seedance,
    Kling,
}

impl VideoEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seedance => "seedance",
            Self::Kling => "kling",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TtsEngines {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chatterbox: Option<TtsPricing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevenlabs: Option<TtsPricing>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoEngines {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seedance: Option<VideoPricing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kling: Option<VideoPricing>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnginesConfig {
    #[serde(default)]
    pub tts: TtsEngines,
    #[serde(default)]
    pub video: VideoEngines,
}

impl EnginesConfig {
    /// Configured pricing, or the zero-cost default when the engine is absent.
    pub fn tts(&self, engine: TtsEngine) -> TtsPricing {
        match engine {
            TtsEngine::Chatterbox => self.tts.chatterbox,
            TtsEngine::Elevenlabs => self.tts.elevenlabs,
        }
        .unwrap_or_default()
    }

    pub fn video(&self, engine: VideoEngine) -> VideoPricing {
        match engine {
            VideoEngine::Seedance => self.video.seedance,
            VideoEngine::Kling => self.video.kling,
        }
        .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    #[serde(default = "default_resolution")]
    pub resolution: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub budget: BudgetConfig,
    #[serde(default)]
    pub actors: BTreeMap<String, ActorConfig>,
    #[serde(default)]
    pub engines: EnginesConfig,
    #[serde(default)]
    pub formats: BTreeMap<String, FormatConfig>,
}

impl StudioConfig {
    /// Load from `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read config {}", path.display()));
            }
        };
        let config: Self = serde_json::from_slice(&raw)
            .with_context(|| format!("parse config {}", path.display()))?;
        debug!(
            path = %path.display(),
            actors = config.actors.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Effective monthly limit; `STUDIO_MONTHLY_LIMIT` wins over the file.
    pub fn monthly_limit(&self) -> f64 {
        parse_f64_env("STUDIO_MONTHLY_LIMIT").unwrap_or(self.budget.monthly_limit)
    }

    pub fn actor(&self, id: &str) -> Option<&ActorConfig> {
        self.actors.get(id)
    }

    pub fn resolution(&self, format: &str) -> String {
        self.formats
            .get(format)
            .map(|f| f.resolution.clone())
            .unwrap_or_else(default_resolution)
    }
}

/// Persist a new monthly limit into the config file.
///
/// Only `budget.monthly_limit` is touched; every other key in the file,
/// including ones this crate does not model, is written back unchanged.
pub fn set_monthly_limit(path: &Path, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        bail!("monthly limit must be a non-negative number, got {amount}");
    }

    let mut root = match fs::read(path) {
        Ok(raw) => serde_json::from_slice::<Value>(&raw)
            .with_context(|| format!("parse config {}", path.display()))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Value::Object(Map::new()),
        Err(e) => return Err(e).with_context(|| format!("read config {}", path.display())),
    };

    let Some(obj) = root.as_object_mut() else {
        bail!("config {} is not a JSON object", path.display());
    };
    let budget = obj
        .entry("budget")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(budget) = budget.as_object_mut() else {
        bail!("config {}: \"budget\" is not an object", path.display());
    };
    budget.insert("monthly_limit".to_string(), Value::from(amount));

    let body = serde_json::to_vec_pretty(&root)?;
    write_atomic(path, &body).with_context(|| format!("write config {}", path.display()))?;
    debug!(path = %path.display(), amount, "monthly limit updated");
    Ok(())
}
