use std::io::{self, Write};

use mars_rover_core::{LogEntry, Position};
use mars_rover_world::{Rover, RunSummary, StopReason};
use serde::Serialize;

/// Final state of a run in a form adapters can print or serialize.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct SimulationReport {
    /// Ticks in which at least one rover changed state.
    pub ticks: u64,
    /// Why the run ended.
    pub stop: StopReason,
    /// Rovers in insertion order.
    pub rovers: Vec<RoverReport>,
    /// Every log entry in emission order.
    pub log: Vec<LogEntry>,
}

/// Final state of a single rover.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct RoverReport {
    /// One-based rover number as shown to users.
    pub number: usize,
    /// Final cell and heading.
    pub position: Position,
    /// Indicates whether instructions were left unexecuted.
    pub moves_remaining: bool,
}

impl SimulationReport {
    /// Captures rover positions and log entries after a run.
    #[must_use]
    pub(crate) fn new(summary: RunSummary, rovers: &[Rover], log: &[LogEntry]) -> Self {
        Self {
            ticks: summary.ticks,
            stop: summary.stop,
            rovers: rovers
                .iter()
                .enumerate()
                .map(|(index, rover)| RoverReport {
                    number: index + 1,
                    position: rover.position(),
                    moves_remaining: rover.has_moves_remaining(),
                })
                .collect(),
            log: log.to_vec(),
        }
    }

    /// Writes the execution log followed by the final rover positions.
    pub(crate) fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Simulation complete. Execution log:")?;
        for entry in &self.log {
            writeln!(out, "{entry}")?;
        }

        writeln!(out)?;
        for rover in &self.rovers {
            writeln!(
                out,
                "Rover {} final position: {}",
                rover.number, rover.position
            )?;
        }
        Ok(())
    }

    /// Writes the report as pretty-printed JSON.
    pub(crate) fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}
