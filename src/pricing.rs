//! # Pricing Module
//!
//! Cost estimates for the billable pipeline stages. Callers compute the
//! amount here and hand it to [`crate::ledger::CostLedger::record`]; the
//! ledger itself never prices anything.
//!
//! ## Pricing Structure
//!
//! - Hooks: flat base plus a per-hook amount
//! - Script: flat amount per generation
//! - TTS: characters synthesized × engine `cost_per_char`
//! - Video: seconds rendered × engine `cost_per_second`
//!
//! Engine prices can be overridden via environment variables:
//! - `STUDIO_TTS_COST_PER_CHAR`
//! - `STUDIO_VIDEO_COST_PER_SECOND`

use serde::Serialize;

use crate::config::{EnginesConfig, TtsEngine, VideoEngine};
use crate::utils::parse_f64_env;

pub const HOOKS_BASE_COST: f64 = 0.005;
pub const HOOKS_PER_HOOK_COST: f64 = 0.002;
pub const SCRIPT_COST: f64 = 0.01;
/// Claude share of a full pipeline run (hooks + script, roughly)
pub const PIPELINE_CLAUDE_COST: f64 = 0.01;
/// Speech density used to size TTS for a target duration
pub const TTS_CHARS_PER_SECOND: u64 = 10;

pub fn hooks_cost(count: u32) -> f64 {
    HOOKS_BASE_COST + f64::from(count) * HOOKS_PER_HOOK_COST
}

pub fn tts_cost_per_char(engine: TtsEngine, engines: &EnginesConfig) -> f64 {
    parse_f64_env("STUDIO_TTS_COST_PER_CHAR").unwrap_or(engines.tts(engine).cost_per_char)
}

pub fn video_cost_per_second(engine: VideoEngine, engines: &EnginesConfig) -> f64 {
    parse_f64_env("STUDIO_VIDEO_COST_PER_SECOND")
        .unwrap_or(engines.video(engine).cost_per_second)
}

pub fn tts_cost(engine: TtsEngine, chars: u64, engines: &EnginesConfig) -> f64 {
    chars as f64 * tts_cost_per_char(engine, engines)
}

pub fn video_cost(engine: VideoEngine, seconds: f64, engines: &EnginesConfig) -> f64 {
    seconds * video_cost_per_second(engine, engines)
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineEstimate {
    pub duration_secs: u32,
    pub tts_engine: TtsEngine,
    pub video_engine: VideoEngine,
    pub tts_chars: u64,
    pub tts_cost: f64,
    pub video_cost: f64,
    pub claude_cost: f64,
    pub total: f64,
}

/// Up-front estimate for a full brief-to-clip run of `duration_secs`.
pub fn estimate_pipeline(
    duration_secs: u32,
    tts_engine: TtsEngine,
    video_engine: VideoEngine,
    engines: &EnginesConfig,
) -> PipelineEstimate {
    let tts_chars = u64::from(duration_secs) * TTS_CHARS_PER_SECOND;
    let tts = tts_cost(tts_engine, tts_chars, engines);
    let video = video_cost(video_engine, f64::from(duration_secs), engines);
    PipelineEstimate {
        duration_secs,
        tts_engine,
        video_engine,
        tts_chars,
        tts_cost: tts,
        video_cost: video,
        claude_cost: PIPELINE_CLAUDE_COST,
        total: tts + video + PIPELINE_CLAUDE_COST,
    }
}
