#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative plateau state and the tick engine for the Mars Rover
//! simulation.
//!
//! A [`Plateau`] owns its rovers and a [`LogSink`]. Calling
//! [`Plateau::execute_instructions`] advances every rover tick by tick until
//! all instructions are spent or a tick produces no state change. Each tick
//! books cells in two phases, stationary rovers first and moving rovers
//! second, so conflicts resolve the same way regardless of processing order.

use std::{collections::BTreeSet, fmt};

use mars_rover_core::{ExecutionLog, Instruction, LogSink, Position, RoverIndex};
use serde::{Deserialize, Serialize};

mod booking;
mod journal;
mod rover;

pub use rover::{Bounds, MoveError, NextStep, Rover};

use booking::BookingLedger;

/// Reason a simulation run ended. None of these are failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The plateau held no rovers.
    NoRovers,
    /// No rover had instructions left before the first tick.
    NothingToExecute,
    /// A tick finished without any rover changing state.
    NoMovement,
    /// Every rover spent its instructions.
    Completed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoRovers => "no rovers",
            Self::NothingToExecute => "nothing to execute",
            Self::NoMovement => "no movement",
            Self::Completed => "completed",
        };
        f.write_str(text)
    }
}

/// Summary of a finished run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of ticks in which at least one rover changed state.
    pub ticks: u64,
    /// Why the run ended.
    pub stop: StopReason,
}

/// Bounded grid that owns the rovers and drives the simulation.
#[derive(Debug)]
pub struct Plateau<L = ExecutionLog> {
    bounds: Bounds,
    rovers: Vec<Rover>,
    log: L,
}

impl<L> Plateau<L>
where
    L: LogSink,
{
    /// Creates an empty plateau. Valid cells satisfy `0 <= x <= width` and
    /// `0 <= y <= height`.
    #[must_use]
    pub fn new(width: u32, height: u32, log: L) -> Self {
        Self {
            bounds: Bounds::new(width, height),
            rovers: Vec::new(),
            log,
        }
    }

    /// Largest valid `x` coordinate.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.bounds.width()
    }

    /// Largest valid `y` coordinate.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// Bounds handed to every rover on this plateau.
    #[must_use]
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Places a new rover. Its index is the number of rovers added before it.
    pub fn add_rover(&mut self, position: Position, instructions: Vec<Instruction>) -> &Rover {
        let index = self.rovers.len();
        self.rovers
            .push(Rover::new(self.bounds, position, instructions));
        &self.rovers[index]
    }

    /// Rovers in insertion order.
    #[must_use]
    pub fn rovers(&self) -> &[Rover] {
        &self.rovers
    }

    /// Looks up a rover by index.
    #[must_use]
    pub fn rover(&self, index: RoverIndex) -> Option<&Rover> {
        self.rovers.get(index.get())
    }

    /// Sink receiving the plateau's and rovers' log entries.
    #[must_use]
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Consumes the plateau, yielding its log sink.
    #[must_use]
    pub fn into_log(self) -> L {
        self.log
    }

    /// Runs the simulation to completion.
    ///
    /// Boundary violations and collisions never abort the run; they are
    /// logged and the affected rover sits the tick out.
    pub fn execute_instructions(&mut self) -> RunSummary {
        let span = tracing::info_span!(
            "execute_instructions",
            width = self.bounds.width(),
            height = self.bounds.height(),
            rovers = self.rovers.len(),
        );
        let _entered = span.enter();

        self.info("Starting execution");
        if self.rovers.is_empty() {
            self.info("No rovers to execute. Simulation will stop.");
            return self.finish(0, StopReason::NoRovers);
        }

        if !self.any_moves_remaining() {
            self.info("All rovers have no moves remaining. Simulation cannot run.");
            return self.finish(0, StopReason::NothingToExecute);
        }

        let mut tick: u64 = 0;
        while self.any_moves_remaining() {
            self.info(format!("Starting tick {tick}"));
            let changed = self.execute_next_tick();
            if !changed.is_empty() {
                tick = tick.saturating_add(1);
                continue;
            }

            self.info("No rovers moved during this tick. Simulation will stop.");
            return self.finish(tick, StopReason::NoMovement);
        }

        self.finish(tick, StopReason::Completed)
    }

    fn any_moves_remaining(&self) -> bool {
        self.rovers.iter().any(Rover::has_moves_remaining)
    }

    fn finish(&self, ticks: u64, stop: StopReason) -> RunSummary {
        tracing::info!(ticks, %stop, "simulation finished");
        RunSummary { ticks, stop }
    }

    fn execute_next_tick(&mut self) -> Vec<RoverIndex> {
        let candidates: Vec<NextStep> = self.rovers.iter().map(Rover::next_position).collect();
        let mut ledger = BookingLedger::with_capacity(candidates.len());
        let mut eligible: BTreeSet<RoverIndex> = BTreeSet::new();

        // Stationary rovers claim their current cell before any mover is
        // considered, so a mover can never displace them.
        self.info("Booking positions for rovers turning left or right");
        let mut booked_stationary = false;
        for (index, next) in candidates.iter().enumerate() {
            if next.will_move {
                continue;
            }

            let index = RoverIndex::new(index);
            let cell = next.position.coordinates();
            self.info(format!("Booking present position {cell} for rover {index}"));
            let _ = ledger.claim(cell, index);
            if next.errors.is_empty() {
                booked_stationary = true;
                let _ = eligible.insert(index);
            } else {
                for error in &next.errors {
                    journal::error(&mut self.log, error.to_string());
                }
            }
        }
        if !booked_stationary {
            self.info("No rovers turning left or right in this iteration");
        }

        self.info("Booking positions for rovers moving forward");
        let mut booked_moving = false;
        for (index, next) in candidates.iter().enumerate() {
            if !next.will_move {
                continue;
            }

            let index = RoverIndex::new(index);
            let cell = next.position.coordinates();
            match ledger.claim(cell, index) {
                Ok(()) => {
                    self.info(format!(
                        "Booking target intended position {cell} for rover {index}"
                    ));
                    booked_moving = true;
                    let _ = eligible.insert(index);
                }
                Err(holder) => {
                    let message = format!(
                        "Collision detected at {cell} booked by rover {holder} when rover \
                         {index} attempted to move to {cell}; rover {index} will not move"
                    );
                    self.info(message.clone());
                    journal::error(&mut self.log, message);
                }
            }
        }
        if !booked_moving {
            self.info("No rovers moving forward in this iteration");
        }

        self.info("Executing instructions for rovers");
        let mut changed = Vec::with_capacity(eligible.len());
        for index in eligible {
            self.info(format!("Executing instruction for rover {index}"));
            let Some(rover) = self.rovers.get_mut(index.get()) else {
                continue;
            };
            if rover.execute_current_instruction(&mut self.log) {
                changed.push(index);
            }
        }

        changed
    }

    fn info(&mut self, message: impl Into<String>) {
        journal::info(&mut self.log, message);
    }
}
