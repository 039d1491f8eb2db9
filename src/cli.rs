use std::path::PathBuf;

use crate::config::{TtsEngine, VideoEngine};

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum TtsEngineArg {
    Chatterbox,
    Elevenlabs,
}

impl From<TtsEngineArg> for TtsEngine {
    fn from(arg: TtsEngineArg) -> Self {
        match arg {
            TtsEngineArg::Chatterbox => TtsEngine::Chatterbox,
            TtsEngineArg::Elevenlabs => TtsEngine::Elevenlabs,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum VideoEngineArg {
    Seedance,
    Kling,
}

impl From<VideoEngineArg> for VideoEngine {
    fn from(arg: VideoEngineArg) -> Self {
        match arg {
            VideoEngineArg::Seedance => VideoEngine::Seedance,
            VideoEngineArg::Kling => VideoEngine::Kling,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum BudgetAction {
    /// Show limit, spend, remaining budget and the latest transactions
    Show,
    /// Persist a new monthly limit to the config file
    Set { amount: f64 },
    /// Zero the monthly counter (history and lifetime total are kept)
    Reset,
    /// Export every transaction to CSV
    Export {
        /// Destination file. Defaults to <data-dir>/expenses_export_<timestamp>.csv
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },
    /// List the most recent transactions, oldest first
    Recent {
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Manage the budget and inspect expenses
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },
    /// Record a billable operation that has already been incurred
    Record {
        /// Billed service, e.g. claude|chatterbox|elevenlabs|seedance|pipeline
        service: String,
        /// Cost in currency units (zero allowed for dry runs)
        #[arg(allow_negative_numbers = true)]
        cost: f64,
        #[arg(default_value = "")]
        description: String,
    },
    /// Estimate the cost of a full pipeline run before starting it
    Estimate {
        /// Target clip duration in seconds
        #[arg(long, short = 'd', default_value_t = 30)]
        duration: u32,
        #[arg(long, value_enum, default_value_t = TtsEngineArg::Chatterbox)]
        tts: TtsEngineArg,
        #[arg(long, value_enum, default_value_t = VideoEngineArg::Seedance)]
        video: VideoEngineArg,
    },
    /// List configured actors
    Actors,
}

#[derive(clap::Parser, Debug)]
#[command(
    name = "studio",
    version,
    about = "Cost ledger and budget tracking for the ads studio pipeline"
)]
pub struct Args {
    /// Directory holding expenses.json and exports
    #[arg(long, global = true, env = "STUDIO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Studio config file (budget, actors, engine pricing)
    #[arg(long, global = true, env = "STUDIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit JSON instead of colored text
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug mode: verbose logging to stderr
    #[arg(long, global = true, env = "STUDIO_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
