//! Headless runner: argument parsing, logging setup and a bot-driven game summary.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::Serialize;

use crate::core::{RulesConfig, Session};
use crate::engine::{run_autoplay, HeuristicPolicy};
use crate::types::CatalogVariant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub variant: CatalogVariant,
    pub seed: u32,
    pub max_pieces: u32,
    /// JSON rules file; replaces the variant preset when given
    pub rules_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            variant: CatalogVariant::Classic,
            seed: 1,
            max_pieces: 500,
            rules_path: None,
            log_level: LevelFilter::Warn,
        }
    }
}

pub fn parse_run_args(args: &[String]) -> Result<RunConfig> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = |i: usize| {
            args.get(i)
                .ok_or_else(|| anyhow!("missing value for {}", flag))
        };
        match flag {
            "--variant" => {
                i += 1;
                let v = value(i)?;
                config.variant = CatalogVariant::from_str(v)
                    .ok_or_else(|| anyhow!("invalid --variant value: {}", v))?;
            }
            "--seed" => {
                i += 1;
                let v = value(i)?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--max-pieces" => {
                i += 1;
                let v = value(i)?;
                config.max_pieces = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --max-pieces value: {}", v))?;
            }
            "--rules" => {
                i += 1;
                config.rules_path = Some(PathBuf::from(value(i)?));
            }
            "--log-level" => {
                i += 1;
                let v = value(i)?;
                config.log_level = v
                    .parse::<LevelFilter>()
                    .map_err(|_| anyhow!("invalid --log-level value: {}", v))?;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

pub fn load_rules(config: &RunConfig) -> Result<RulesConfig> {
    match &config.rules_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading rules file {}", path.display()))?;
            RulesConfig::from_json(&text)
                .with_context(|| format!("loading rules file {}", path.display()))
        }
        None => Ok(RulesConfig::for_variant(config.variant)),
    }
}

/// Final state of a headless game, printed as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub variant: CatalogVariant,
    pub seed: u32,
    pub pieces: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
    pub board_hash: u64,
}

pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let rules = load_rules(config)?;
    let variant = rules.catalog;
    let mut session = Session::new(rules, config.seed)?;

    let report = run_autoplay(&mut session, &mut HeuristicPolicy::default(), config.max_pieces);

    Ok(RunSummary {
        variant,
        seed: config.seed,
        pieces: report.pieces,
        score: report.score,
        level: report.level,
        lines: report.lines,
        game_over: report.game_over,
        board_hash: session.snapshot().board_hash(),
    })
}

/// Install the stderr logger at `level`
pub fn init_logging(level: LevelFilter) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .try_init()
        .context("failed to install logger")
}
