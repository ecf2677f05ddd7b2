#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure intake system that validates textual plateau, rover, and instruction
//! descriptions before they reach the simulation engine.
//!
//! Every parser reports all of the problems it finds at once so adapters can
//! show them together.

use std::fmt;

use mars_rover_core::{Direction, Instruction, LogSink, Position};
use mars_rover_world::Plateau;
use thiserror::Error;

mod scenario;

pub use scenario::{RoverPlan, Scenario, ScenarioError};

/// Plateau dimensions offered when the user provides none.
pub const DEFAULT_PLATEAU: &str = "5 5";
/// Starting position offered when the user provides none.
pub const DEFAULT_ROVER: &str = "1 2 N";
/// Instruction sequence offered when the user provides none.
pub const DEFAULT_INSTRUCTIONS: &str = "LMLMLMLMM";

/// Smallest accepted plateau width or height.
pub const MIN_DIMENSION: i32 = 1;
/// Largest accepted plateau width or height.
pub const MAX_DIMENSION: i32 = 100;

/// Plateau axis named in validation messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Horizontal extent.
    Width,
    /// Vertical extent.
    Height,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => f.write_str("width"),
            Self::Height => f.write_str("height"),
        }
    }
}

/// Rover coordinate named in validation messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal coordinate.
    X,
    /// Vertical coordinate.
    Y,
}

impl Axis {
    /// Plateau dimension that bounds this coordinate.
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::X => Dimension::Width,
            Self::Y => Dimension::Height,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("X"),
            Self::Y => f.write_str("Y"),
        }
    }
}

/// Reasons textual input is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// The plateau description did not contain exactly two values.
    #[error("Plateau input must have two parts.")]
    PlateauShape,
    /// A plateau dimension was not an integer.
    #[error("Plateau {0} must be an integer.")]
    DimensionNotInteger(Dimension),
    /// A plateau dimension was below the minimum.
    #[error("Plateau {0} must be greater than 0.")]
    DimensionTooSmall(Dimension),
    /// A plateau dimension exceeded the maximum.
    #[error("Plateau {0} must be less than or equal to 100.")]
    DimensionTooLarge(Dimension),
    /// The rover description did not contain exactly three values.
    #[error("Rover input must have three parts.")]
    RoverShape,
    /// A rover coordinate was not an integer.
    #[error("Rover {0} coordinate must be an integer.")]
    CoordinateNotInteger(Axis),
    /// A rover coordinate was negative.
    #[error("Rover {0} coordinate must be greater than or equal to 0.")]
    CoordinateNegative(Axis),
    /// A rover coordinate lay beyond the plateau.
    #[error("Rover {0} coordinate must be less than or equal to the plateau {dimension}.", dimension = bounding_dimension(.0))]
    CoordinateOffPlateau(Axis),
    /// The rover heading was not a compass letter.
    #[error("Rover direction must be a valid direction.")]
    InvalidDirection,
    /// A character of the instruction sequence was not `L`, `R` or `M`.
    #[error("Invalid instruction '{letter}' at position {index}.")]
    InvalidInstruction {
        /// Offending character.
        letter: char,
        /// Zero-based character position within the sequence.
        index: usize,
    },
}

fn bounding_dimension(axis: &Axis) -> Dimension {
    axis.dimension()
}

/// Validated plateau dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlateauSize {
    width: u32,
    height: u32,
}

impl PlateauSize {
    /// Largest valid `x` coordinate.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Largest valid `y` coordinate.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Creates an empty plateau of this size recording into `log`.
    #[must_use]
    pub fn plateau<L>(self, log: L) -> Plateau<L>
    where
        L: LogSink,
    {
        Plateau::new(self.width, self.height, log)
    }
}

/// Substitutes `default` when `input` is blank.
#[must_use]
pub fn or_default<'a>(input: &'a str, default: &'a str) -> &'a str {
    if input.trim().is_empty() {
        default
    } else {
        input
    }
}

/// Parses `"W H"` into plateau dimensions within `1..=100`.
pub fn parse_plateau(input: &str) -> Result<PlateauSize, Vec<IntakeError>> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let [width, height] = parts.as_slice() else {
        return Err(vec![IntakeError::PlateauShape]);
    };

    let mut errors = Vec::new();
    let width = parse_dimension(width, Dimension::Width, &mut errors);
    let height = parse_dimension(height, Dimension::Height, &mut errors);

    match (width, height) {
        (Some(width), Some(height)) => Ok(PlateauSize { width, height }),
        _ => Err(errors),
    }
}

/// Parses `"X Y D"` into a starting position on a plateau of `size`.
///
/// Direction letters are accepted in either case.
pub fn parse_rover(input: &str, size: PlateauSize) -> Result<Position, Vec<IntakeError>> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let [x, y, direction] = parts.as_slice() else {
        return Err(vec![IntakeError::RoverShape]);
    };

    let mut errors = Vec::new();
    let x = parse_coordinate(x, Axis::X, size.width, &mut errors);
    let y = parse_coordinate(y, Axis::Y, size.height, &mut errors);
    let direction = Direction::from_letter(direction);
    if direction.is_none() {
        errors.push(IntakeError::InvalidDirection);
    }

    match (x, y, direction) {
        (Some(x), Some(y), Some(direction)) => Ok(Position::at(x, y, direction)),
        _ => Err(errors),
    }
}

/// Parses a sequence of `L`, `R` and `M` letters. An empty sequence is valid.
pub fn parse_instructions(input: &str) -> Result<Vec<Instruction>, Vec<IntakeError>> {
    let mut instructions = Vec::with_capacity(input.len());
    let mut errors = Vec::new();
    for (index, letter) in input.chars().enumerate() {
        match Instruction::from_letter(letter) {
            Some(instruction) => instructions.push(instruction),
            None => errors.push(IntakeError::InvalidInstruction { letter, index }),
        }
    }

    if errors.is_empty() {
        Ok(instructions)
    } else {
        Err(errors)
    }
}

fn parse_dimension(text: &str, dimension: Dimension, errors: &mut Vec<IntakeError>) -> Option<u32> {
    let Ok(value) = text.parse::<i32>() else {
        errors.push(IntakeError::DimensionNotInteger(dimension));
        return None;
    };

    if value < MIN_DIMENSION {
        errors.push(IntakeError::DimensionTooSmall(dimension));
        None
    } else if value > MAX_DIMENSION {
        errors.push(IntakeError::DimensionTooLarge(dimension));
        None
    } else {
        u32::try_from(value).ok()
    }
}

fn parse_coordinate(
    text: &str,
    axis: Axis,
    limit: u32,
    errors: &mut Vec<IntakeError>,
) -> Option<i32> {
    let Ok(value) = text.parse::<i32>() else {
        errors.push(IntakeError::CoordinateNotInteger(axis));
        return None;
    };

    if value < 0 {
        errors.push(IntakeError::CoordinateNegative(axis));
        None
    } else if i64::from(value) > i64::from(limit) {
        errors.push(IntakeError::CoordinateOffPlateau(axis));
        None
    } else {
        Some(value)
    }
}
