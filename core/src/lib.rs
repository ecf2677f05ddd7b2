#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core value types shared across the Mars Rover simulation.
//!
//! This crate defines the vocabulary that connects the intake layer, the
//! authoritative plateau engine, and adapters. Intake hands the engine
//! validated [`Position`] and [`Instruction`] values, the engine advances
//! rovers and records [`LogEntry`] values through a [`LogSink`], and adapters
//! read final positions and the [`ExecutionLog`] back out for display.

use std::fmt;

use serde::{Deserialize, Serialize};

mod log;

pub use log::{ExecutionLog, LogEntry, LogKind, LogSink};

/// Compass heading a rover faces.
///
/// Headings form the cycle North, East, South, West and back to North.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Facing increasing `y`.
    #[serde(rename = "N")]
    North,
    /// Facing increasing `x`.
    #[serde(rename = "E")]
    East,
    /// Facing decreasing `y`.
    #[serde(rename = "S")]
    South,
    /// Facing decreasing `x`.
    #[serde(rename = "W")]
    West,
}

impl Direction {
    /// Every heading in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Heading reached by a quarter turn counter-clockwise.
    #[must_use]
    pub const fn left(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Heading reached by a quarter turn clockwise.
    #[must_use]
    pub const fn right(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Single upper-case compass letter for the heading.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Parses a compass letter, ignoring case.
    #[must_use]
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter.to_ascii_uppercase().as_str() {
            "N" => Some(Self::North),
            "E" => Some(Self::East),
            "S" => Some(Self::South),
            "W" => Some(Self::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Atomic command executed by a rover during a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// Rotate a quarter turn counter-clockwise in place.
    Left,
    /// Rotate a quarter turn clockwise in place.
    Right,
    /// Advance one cell along the current heading.
    Move,
}

impl Instruction {
    /// Letter used for the instruction in textual command sequences.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
            Self::Move => 'M',
        }
    }

    /// Parses an instruction letter. Only upper-case letters are accepted.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            'M' => Some(Self::Move),
            _ => None,
        }
    }
}

/// Location of a single plateau cell.
///
/// Coordinates compare and hash by value, so they can key per-tick booking
/// tables directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinates {
    x: i32,
    y: i32,
}

impl Coordinates {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component, growing eastwards.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component, growing northwards.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cell and heading of a rover.
///
/// Positions are replaced wholesale whenever a rover changes state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    coordinates: Coordinates,
    direction: Direction,
}

impl Position {
    /// Creates a position from a cell and a heading.
    #[must_use]
    pub const fn new(coordinates: Coordinates, direction: Direction) -> Self {
        Self {
            coordinates,
            direction,
        }
    }

    /// Convenience constructor taking raw components.
    #[must_use]
    pub const fn at(x: i32, y: i32, direction: Direction) -> Self {
        Self::new(Coordinates::new(x, y), direction)
    }

    /// Cell occupied by the rover.
    #[must_use]
    pub const fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Heading of the rover.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns a copy of this position facing `direction`.
    #[must_use]
    pub const fn facing(self, direction: Direction) -> Self {
        Self::new(self.coordinates, direction)
    }

    /// Returns a copy of this position relocated to `coordinates`.
    #[must_use]
    pub const fn relocated(self, coordinates: Coordinates) -> Self {
        Self::new(coordinates, self.direction)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.coordinates.x, self.coordinates.y, self.direction
        )
    }
}

/// Zero-based index of a rover within its plateau, in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoverIndex(usize);

impl RoverIndex {
    /// Creates a new rover index with the provided numeric value.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RoverIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
