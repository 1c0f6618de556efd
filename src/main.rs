mod layout;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracks::config::{ConfigError, TrackGraphConfig};

use crate::layout::{Layout, Report};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid layout: {0}")]
    InvalidLayout(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("operation {index} ({op}) refused: {code}")]
    Refused { index: usize, op: &'static str, code: &'static str },
}

#[derive(Parser, Debug)]
#[command(name = "trackyard", about = "Replay and query track graph layouts")]
struct Cli {
    /// Fail on the first refused operation instead of reporting it.
    #[arg(long, env = "TRACKYARD_STRICT", default_value_t = false)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply every operation in a layout file and print the resulting graph.
    Replay {
        layout: PathBuf,
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
    /// Replay a layout, then snap one point onto the finished graph.
    Project {
        layout: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },
}

fn main() -> Result<(), CliError> {
    // stdout carries the JSON report.
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay { layout, compact } => run_replay(&layout, cli.strict, compact),
        Command::Project { layout, x, y } => run_project(&layout, cli.strict, x, y),
    }
}

fn run_replay(path: &Path, strict: bool, compact: bool) -> Result<(), CliError> {
    let layout = read_layout(path)?;
    let (graph, steps) = layout::replay(&layout, TrackGraphConfig::from_env()?)?;
    if strict {
        check_strict(&steps)?;
    }
    print_json(&Report::new(&graph, &steps), compact)
}

fn run_project(path: &Path, strict: bool, x: f64, y: f64) -> Result<(), CliError> {
    let layout = read_layout(path)?;
    let (graph, steps) = layout::replay(&layout, TrackGraphConfig::from_env()?)?;
    if strict {
        check_strict(&steps)?;
    }
    let result = graph.project(tracks::point::Point::new(x, y));
    print_json(&result, false)
}

fn read_layout(path: &Path) -> Result<Layout, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    Ok(serde_json::from_str(&raw)?)
}

fn check_strict(steps: &[layout::Step]) -> Result<(), CliError> {
    for step in steps {
        if let layout::Outcome::Refused { code, .. } = step.outcome {
            return Err(CliError::Refused { index: step.index, op: step.op, code });
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<(), CliError> {
    let rendered = if compact { serde_json::to_string(value)? } else { serde_json::to_string_pretty(value)? };
    println!("{rendered}");
    Ok(())
}
