use mars_rover_core::LogSink;
use mars_rover_world::Plateau;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{parse_instructions, parse_plateau, parse_rover, IntakeError};

/// Declarative description of one simulation run, usually loaded from TOML.
///
/// ```toml
/// plateau = "5 5"
///
/// [[rovers]]
/// position = "1 2 N"
/// instructions = "LMLMLMLMM"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Plateau dimensions as `"W H"`.
    pub plateau: String,
    /// Rovers in insertion order.
    #[serde(default)]
    pub rovers: Vec<RoverPlan>,
}

/// Starting position and instructions for a single rover.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverPlan {
    /// Starting position as `"X Y D"`.
    pub position: String,
    /// Instruction letters; empty when omitted.
    #[serde(default)]
    pub instructions: String,
}

/// Errors raised while loading or validating a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The document was not valid TOML or did not match the schema.
    #[error("could not parse scenario: {0}")]
    Parse(#[from] toml::de::Error),
    /// The plateau description was rejected.
    #[error("invalid plateau: {}", join(.0))]
    Plateau(Vec<IntakeError>),
    /// A rover description was rejected.
    #[error("invalid rover {rover}: {}", join(.errors))]
    Rover {
        /// One-based number of the rover within the scenario.
        rover: usize,
        /// Problems found in the rover's position or instructions.
        errors: Vec<IntakeError>,
    },
}

impl ScenarioError {
    /// Individual validation problems, empty for parse failures.
    #[must_use]
    pub fn intake_errors(&self) -> &[IntakeError] {
        match self {
            Self::Parse(_) => &[],
            Self::Plateau(errors) => errors,
            Self::Rover { errors, .. } => errors,
        }
    }
}

impl Scenario {
    /// Parses a scenario from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(text)?)
    }

    /// Validates every field and assembles a plateau recording into `log`.
    ///
    /// Rovers are added in the order they are listed.
    pub fn build<L>(&self, log: L) -> Result<Plateau<L>, ScenarioError>
    where
        L: LogSink,
    {
        let size = parse_plateau(&self.plateau).map_err(ScenarioError::Plateau)?;
        let mut plateau = size.plateau(log);

        for (index, plan) in self.rovers.iter().enumerate() {
            let position = parse_rover(&plan.position, size);
            let instructions = parse_instructions(&plan.instructions);
            match (position, instructions) {
                (Ok(position), Ok(instructions)) => {
                    let _ = plateau.add_rover(position, instructions);
                }
                (position, instructions) => {
                    let errors = position
                        .err()
                        .into_iter()
                        .chain(instructions.err())
                        .flatten()
                        .collect();
                    return Err(ScenarioError::Rover {
                        rover: index + 1,
                        errors,
                    });
                }
            }
        }

        Ok(plateau)
    }
}

fn join(errors: &[IntakeError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
