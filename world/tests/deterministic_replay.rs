use mars_rover_core::{Direction, ExecutionLog, Instruction, LogEntry, Position};
use mars_rover_world::{Plateau, RunSummary};

use Instruction::{Left, Move, Right};

#[test]
fn replay_from_fresh_construction_is_identical() {
    let first = replay();
    let second = replay();

    assert_eq!(first, second, "replay diverged between runs");
    assert!(
        first.log.iter().any(LogEntry::is_error),
        "scripted fleet should exercise collisions and edges"
    );
}

#[test]
fn reusing_a_cleared_log_matches_a_fresh_one() {
    let mut log = ExecutionLog::new();
    let first = replay_into(&mut log);
    let first_entries = log.entries().to_vec();

    log.clear();
    let second = replay_into(&mut log);

    assert_eq!(first, second);
    assert_eq!(first_entries, log.entries());
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    summary: RunSummary,
    positions: Vec<Position>,
    log: Vec<LogEntry>,
}

fn replay() -> ReplayOutcome {
    let mut log = ExecutionLog::new();
    let (summary, positions) = replay_into(&mut log);
    ReplayOutcome {
        summary,
        positions,
        log: log.into_entries(),
    }
}

fn replay_into(log: &mut ExecutionLog) -> (RunSummary, Vec<Position>) {
    let mut plateau = Plateau::new(6, 4, log);
    for (position, instructions) in scripted_fleet() {
        let _ = plateau.add_rover(position, instructions);
    }

    let summary = plateau.execute_instructions();
    let positions = plateau.rovers().iter().map(|rover| rover.position()).collect();
    (summary, positions)
}

fn scripted_fleet() -> Vec<(Position, Vec<Instruction>)> {
    vec![
        (
            Position::at(0, 0, Direction::North),
            vec![Move, Move, Right, Move, Move, Move],
        ),
        (
            Position::at(3, 0, Direction::North),
            vec![Move, Move, Left, Move, Move],
        ),
        (
            Position::at(6, 4, Direction::East),
            vec![Move, Left, Left, Move, Move],
        ),
        (
            Position::at(2, 4, Direction::North),
            vec![Move, Right, Right, Move],
        ),
        (Position::at(4, 2, Direction::West), Vec::new()),
    ]
}
