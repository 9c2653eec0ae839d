//! Headless runner (default binary).
//!
//! Plays one game with the greedy placement bot and prints a JSON summary to stdout.
//! Diagnostics go to stderr at the level given by `--log-level` (default `warn`).

use anyhow::Result;

use retro_blocks::runner::{init_logging, parse_run_args, run};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_run_args(&args)?;
    init_logging(config.log_level)?;

    let summary = run(&config)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
