#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for the Mars Rover simulation.
//!
//! Without arguments the adapter runs an interactive console session. Passing
//! `--plateau` or `--scenario` runs a single batch simulation and prints its
//! report.

mod report;
mod session;

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use mars_rover_core::ExecutionLog;
use mars_rover_system_intake::{RoverPlan, Scenario};
use tracing_subscriber::EnvFilter;

use crate::{report::SimulationReport, session::ConsoleSession};

/// Command-line arguments accepted by the Mars Rover binary.
#[derive(Debug, Parser)]
#[command(name = "mars-rover", about = "Mars Rover plateau simulation")]
struct CliArgs {
    /// TOML scenario file describing the plateau and its rovers.
    #[arg(long, value_name = "PATH", conflicts_with = "plateau")]
    scenario: Option<PathBuf>,

    /// Plateau dimensions as "W H".
    #[arg(long, value_name = "W H")]
    plateau: Option<String>,

    /// Rover starting position as "X Y D". Repeat for several rovers.
    #[arg(long = "rover", value_name = "X Y D", requires = "plateau")]
    rovers: Vec<String>,

    /// Instructions for the rover at the same position in the list.
    #[arg(long = "instructions", value_name = "LRM", requires = "plateau")]
    instructions: Vec<String>,

    /// Output format for batch runs.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increases log verbosity on stderr. Repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Report formats supported by batch runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Execution log followed by final positions.
    Text,
    /// Pretty-printed JSON report.
    Json,
}

/// Entry point for the Mars Rover command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match load_scenario(&args)? {
        Some(scenario) => run_batch(&scenario, args.format),
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            ConsoleSession::new(stdin.lock(), stdout.lock())
                .run()
                .context("interactive session failed")
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        1 => EnvFilter::new("warn"),
        2 => EnvFilter::new("info"),
        3 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

// `None` selects the interactive session.
fn load_scenario(args: &CliArgs) -> Result<Option<Scenario>> {
    if let Some(path) = &args.scenario {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        let scenario = Scenario::from_toml_str(&text)
            .with_context(|| format!("failed to load scenario {}", path.display()))?;
        return Ok(Some(scenario));
    }

    let Some(plateau) = &args.plateau else {
        return Ok(None);
    };

    if args.rovers.len() != args.instructions.len() {
        bail!(
            "every --rover needs a matching --instructions ({} rovers, {} instruction lists)",
            args.rovers.len(),
            args.instructions.len()
        );
    }

    let rovers = args
        .rovers
        .iter()
        .zip(&args.instructions)
        .map(|(position, instructions)| RoverPlan {
            position: position.clone(),
            instructions: instructions.clone(),
        })
        .collect();

    Ok(Some(Scenario {
        plateau: plateau.clone(),
        rovers,
    }))
}

fn run_batch(scenario: &Scenario, format: OutputFormat) -> Result<()> {
    let mut plateau = scenario.build(ExecutionLog::new())?;
    let summary = plateau.execute_instructions();
    let report = SimulationReport::new(summary, plateau.rovers(), plateau.log().entries());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => report.write_text(&mut out)?,
        OutputFormat::Json => report.write_json(&mut out)?,
    }
    out.flush().context("failed to flush report")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("mars-rover").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn no_arguments_select_interactive_mode() {
        let args = parse(&[]);
        assert!(load_scenario(&args).expect("no scenario").is_none());
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn rover_flags_pair_up_in_order() {
        let args = parse(&[
            "--plateau",
            "5 5",
            "--rover",
            "1 2 N",
            "--instructions",
            "LM",
            "--rover",
            "3 3 E",
            "--instructions",
            "",
        ]);

        let scenario = load_scenario(&args)
            .expect("scenario assembles")
            .expect("batch mode");
        assert_eq!(scenario.plateau, "5 5");
        assert_eq!(
            scenario.rovers,
            vec![
                RoverPlan {
                    position: "1 2 N".to_owned(),
                    instructions: "LM".to_owned(),
                },
                RoverPlan {
                    position: "3 3 E".to_owned(),
                    instructions: String::new(),
                },
            ]
        );
    }

    #[test]
    fn unmatched_rover_flags_are_rejected() {
        let args = parse(&["--plateau", "5 5", "--rover", "1 2 N"]);
        let error = load_scenario(&args).expect_err("missing instructions");
        assert!(error.to_string().contains("matching --instructions"));
    }

    #[test]
    fn scenario_conflicts_with_plateau() {
        let result = CliArgs::try_parse_from([
            "mars-rover",
            "--scenario",
            "run.toml",
            "--plateau",
            "5 5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn verbosity_flags_accumulate() {
        assert_eq!(parse(&["-vv", "--format", "json"]).verbose, 2);
        assert_eq!(parse(&["--format", "json"]).format, OutputFormat::Json);
    }
}
