//! Rover mechanics: next-position queries and single-instruction execution.

use mars_rover_core::{Coordinates, Direction, Instruction, LogSink, Position};
use thiserror::Error;

use crate::journal;

/// Upper bounds of the plateau as seen by a rover.
///
/// Both bounds are inclusive: a cell is on the plateau when
/// `0 <= x <= width` and `0 <= y <= height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    width: u32,
    height: u32,
}

impl Bounds {
    /// Creates bounds from inclusive width and height.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

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

    // Only upper bounds are checked here. Lower bounds are enforced when the
    // starting position is validated.
    fn violations(&self, candidate: Coordinates) -> Vec<MoveError> {
        let mut errors = Vec::new();
        if i64::from(candidate.x()) > i64::from(self.width) {
            errors.push(MoveError::OutsideWidth);
        }
        if i64::from(candidate.y()) > i64::from(self.height) {
            errors.push(MoveError::OutsideHeight);
        }
        errors
    }
}

/// Reasons a move candidate is rejected before it is committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum MoveError {
    /// The candidate lies east of the plateau's width.
    #[error("Rover cannot move outside the plateau's width.")]
    OutsideWidth,
    /// The candidate lies north of the plateau's height.
    #[error("Rover cannot move outside the plateau's height.")]
    OutsideHeight,
}

/// Outcome of asking a rover where its current instruction would take it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NextStep {
    /// Candidate position, or the current one when the rover stays put.
    pub position: Position,
    /// Boundary violations detected for a move candidate.
    pub errors: Vec<MoveError>,
    /// Indicates whether the rover would change cells.
    pub will_move: bool,
}

impl NextStep {
    fn stay(position: Position) -> Self {
        Self {
            position,
            errors: Vec::new(),
            will_move: false,
        }
    }
}

/// Wheeled agent executing a fixed instruction sequence on a plateau.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rover {
    bounds: Bounds,
    position: Position,
    instructions: Vec<Instruction>,
    cursor: usize,
}

impl Rover {
    /// Creates a rover that has not yet executed any instruction.
    #[must_use]
    pub fn new(bounds: Bounds, position: Position, instructions: Vec<Instruction>) -> Self {
        Self {
            bounds,
            position,
            instructions,
            cursor: 0,
        }
    }

    /// Current cell and heading.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Full instruction sequence given at construction.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Reports whether instructions remain to be executed.
    #[must_use]
    pub fn has_moves_remaining(&self) -> bool {
        self.cursor < self.instructions.len()
    }

    /// Instruction that the next execution would apply.
    #[must_use]
    pub fn current_instruction(&self) -> Option<Instruction> {
        self.instructions.get(self.cursor).copied()
    }

    /// Bounds the rover checks its moves against.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Computes the position the current instruction would produce without
    /// mutating the rover.
    ///
    /// Only a `Move` can yield `will_move`. A move that would leave the
    /// plateau reports one error per violated axis and keeps the current
    /// position.
    #[must_use]
    pub fn next_position(&self) -> NextStep {
        if self.current_instruction() != Some(Instruction::Move) {
            return NextStep::stay(self.position);
        }

        let candidate = step(self.position.coordinates(), self.position.direction());
        let errors = self.bounds.violations(candidate);
        if errors.is_empty() {
            NextStep {
                position: self.position.relocated(candidate),
                errors,
                will_move: true,
            }
        } else {
            NextStep {
                position: self.position,
                errors,
                will_move: false,
            }
        }
    }

    /// Applies the current instruction, returning whether the rover's state
    /// changed.
    ///
    /// Turns always succeed and advance the cursor. A blocked move records
    /// its boundary errors and leaves the cursor on the move.
    pub fn execute_current_instruction<L>(&mut self, log: &mut L) -> bool
    where
        L: LogSink + ?Sized,
    {
        journal::info(log, "Executing current instruction");
        let Some(instruction) = self.current_instruction() else {
            journal::info(
                log,
                "No moves remaining, keeping current position and direction",
            );
            return false;
        };

        match instruction {
            Instruction::Left => {
                journal::info(log, "Turning left");
                self.turn(self.position.direction().left());
                true
            }
            Instruction::Right => {
                journal::info(log, "Turning right");
                self.turn(self.position.direction().right());
                true
            }
            Instruction::Move => {
                journal::info(log, "Moving");
                self.advance(log)
            }
        }
    }

    fn turn(&mut self, direction: Direction) {
        self.position = self.position.facing(direction);
        self.cursor += 1;
    }

    fn advance<L>(&mut self, log: &mut L) -> bool
    where
        L: LogSink + ?Sized,
    {
        let next = self.next_position();
        if !next.errors.is_empty() {
            for error in next.errors {
                journal::error(log, error.to_string());
            }
            return false;
        }

        self.position = next.position;
        self.cursor += 1;
        true
    }
}

fn step(coordinates: Coordinates, direction: Direction) -> Coordinates {
    let (x, y) = (coordinates.x(), coordinates.y());
    match direction {
        Direction::North => Coordinates::new(x, y.saturating_add(1)),
        Direction::East => Coordinates::new(x.saturating_add(1), y),
        Direction::South => Coordinates::new(x, y.saturating_sub(1)),
        Direction::West => Coordinates::new(x.saturating_sub(1), y),
    }
}
