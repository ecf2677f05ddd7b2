use std::io::{self, BufRead, Write};

use mars_rover_core::{ExecutionLog, Position};
use mars_rover_system_intake::{
    or_default, parse_instructions, parse_plateau, parse_rover, IntakeError, PlateauSize,
    DEFAULT_INSTRUCTIONS, DEFAULT_PLATEAU, DEFAULT_ROVER,
};

use crate::report::SimulationReport;

/// Result of a single prompt-simulate-report cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CycleOutcome {
    /// Start another cycle.
    Continue,
    /// Input was rejected; the next cycle asks for the failing step again.
    InvalidInput,
    /// The user asked to leave.
    Exit,
}

enum Answer<T> {
    Accepted(T),
    Rejected,
    Exit,
}

/// Interactive console session that collects one rover per run.
///
/// Validated answers are kept across cycles, so after a rejection only the
/// failing prompt is repeated.
#[derive(Debug)]
pub(crate) struct ConsoleSession<R, W> {
    input: R,
    output: W,
    log: ExecutionLog,
    size: Option<PlateauSize>,
    rover: Option<Position>,
}

impl<R, W> ConsoleSession<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            log: ExecutionLog::new(),
            size: None,
            rover: None,
        }
    }

    /// Runs cycles until the user exits or input ends.
    pub(crate) fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Mars Rover")?;
        while self.run_one_cycle()? != CycleOutcome::Exit {}
        writeln!(self.output, "Goodbye!")
    }

    pub(crate) fn run_one_cycle(&mut self) -> io::Result<CycleOutcome> {
        let size = match self.size {
            Some(size) => size,
            None => {
                let prompt = format!("Enter the plateau dimensions (default '{DEFAULT_PLATEAU}'):");
                match self.ask(&prompt, DEFAULT_PLATEAU, parse_plateau)? {
                    Answer::Accepted(size) => *self.size.insert(size),
                    Answer::Rejected => return Ok(CycleOutcome::InvalidInput),
                    Answer::Exit => return Ok(CycleOutcome::Exit),
                }
            }
        };

        let position = match self.rover {
            Some(position) => position,
            None => {
                let prompt =
                    format!("Enter the rover's starting position (default '{DEFAULT_ROVER}'):");
                match self.ask(&prompt, DEFAULT_ROVER, |text| parse_rover(text, size))? {
                    Answer::Accepted(position) => *self.rover.insert(position),
                    Answer::Rejected => return Ok(CycleOutcome::InvalidInput),
                    Answer::Exit => return Ok(CycleOutcome::Exit),
                }
            }
        };

        let prompt =
            format!("Enter the rover's instructions (default '{DEFAULT_INSTRUCTIONS}'):");
        let instructions = match self.ask(&prompt, DEFAULT_INSTRUCTIONS, parse_instructions)? {
            Answer::Accepted(instructions) => instructions,
            Answer::Rejected => return Ok(CycleOutcome::InvalidInput),
            Answer::Exit => return Ok(CycleOutcome::Exit),
        };

        let report = {
            let mut plateau = size.plateau(&mut self.log);
            let _ = plateau.add_rover(position, instructions);
            let summary = plateau.execute_instructions();
            SimulationReport::new(summary, plateau.rovers(), plateau.log().entries())
        };
        report.write_text(&mut self.output)?;

        self.ask_to_continue()
    }

    fn ask<T, F>(&mut self, prompt: &str, default: &str, parse: F) -> io::Result<Answer<T>>
    where
        F: FnOnce(&str) -> Result<T, Vec<IntakeError>>,
    {
        writeln!(self.output, "{prompt}")?;
        let Some(line) = self.read_line()? else {
            return Ok(Answer::Exit);
        };
        if line.trim().eq_ignore_ascii_case("exit") {
            return Ok(Answer::Exit);
        }

        match parse(or_default(&line, default)) {
            Ok(value) => Ok(Answer::Accepted(value)),
            Err(errors) => {
                for error in errors {
                    writeln!(self.output, "{error}")?;
                }
                Ok(Answer::Rejected)
            }
        }
    }

    fn ask_to_continue(&mut self) -> io::Result<CycleOutcome> {
        writeln!(self.output)?;
        writeln!(self.output, "Do you want to continue? (y/n, default 'n')")?;
        let answer = self.read_line()?;
        if answer.is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")) {
            self.reset();
            Ok(CycleOutcome::Continue)
        } else {
            Ok(CycleOutcome::Exit)
        }
    }

    fn reset(&mut self) {
        self.log.clear();
        self.size = None;
        self.rover = None;
    }

    // `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLATEAU_PROMPT: &str = "Enter the plateau dimensions (default '5 5'):";
    const ROVER_PROMPT: &str = "Enter the rover's starting position (default '1 2 N'):";
    const INSTRUCTIONS_PROMPT: &str = "Enter the rover's instructions (default 'LMLMLMLMM'):";

    struct FakeConsole {
        session: ConsoleSession<&'static [u8], Vec<u8>>,
    }

    impl FakeConsole {
        fn new(input: &'static str) -> Self {
            Self {
                session: ConsoleSession::new(input.as_bytes(), Vec::new()),
            }
        }

        fn cycle(&mut self) -> CycleOutcome {
            self.session.run_one_cycle().expect("in-memory io")
        }

        fn output(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.session.output)
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    #[test]
    fn exit_at_plateau_prompt() {
        let mut console = FakeConsole::new("exit\n");

        assert_eq!(console.cycle(), CycleOutcome::Exit);
        assert_eq!(console.output(), [PLATEAU_PROMPT]);
    }

    #[test]
    fn exit_at_rover_prompt_is_case_insensitive() {
        let mut console = FakeConsole::new("5 5\nEXIT\n");

        assert_eq!(console.cycle(), CycleOutcome::Exit);
        assert_eq!(console.output(), [PLATEAU_PROMPT, ROVER_PROMPT]);
    }

    #[test]
    fn exit_at_instructions_prompt() {
        let mut console = FakeConsole::new("5 5\n1 2 N\nexit\n");

        assert_eq!(console.cycle(), CycleOutcome::Exit);
        assert_eq!(
            console.output(),
            [PLATEAU_PROMPT, ROVER_PROMPT, INSTRUCTIONS_PROMPT]
        );
    }

    #[test]
    fn invalid_plateau_is_reported_and_asked_again() {
        let mut console = FakeConsole::new("single\n5 5\nexit\n");

        assert_eq!(console.cycle(), CycleOutcome::InvalidInput);
        assert_eq!(
            console.output(),
            [PLATEAU_PROMPT, "Plateau input must have two parts."]
        );

        assert_eq!(console.cycle(), CycleOutcome::Exit);
        assert_eq!(
            console.output()[2..],
            [PLATEAU_PROMPT, ROVER_PROMPT]
        );
    }

    #[test]
    fn rejected_rover_keeps_accepted_plateau() {
        let mut console = FakeConsole::new("3 3\n4 1 N\n3 1 n\nexit\n");

        assert_eq!(console.cycle(), CycleOutcome::InvalidInput);
        assert_eq!(
            console.output(),
            [
                "Enter the plateau dimensions (default '5 5'):",
                ROVER_PROMPT,
                "Rover X coordinate must be less than or equal to the plateau width."
            ]
        );

        assert_eq!(console.cycle(), CycleOutcome::Exit);
        assert_eq!(
            console.output()[3..],
            [ROVER_PROMPT, INSTRUCTIONS_PROMPT]
        );
    }

    #[test]
    fn valid_run_reports_and_exits_on_no() {
        let mut console = FakeConsole::new("5 5\n1 2 N\nLMLMLMLMM\nn\n");

        assert_eq!(console.cycle(), CycleOutcome::Exit);
        let output = console.output();
        assert!(output.contains(&"Simulation complete. Execution log:".to_owned()));
        assert!(output.contains(&"Rover 1 final position: 1 3 N".to_owned()));
        assert_eq!(
            output.last().map(String::as_str),
            Some("Do you want to continue? (y/n, default 'n')")
        );
    }

    #[test]
    fn blank_answers_use_defaults() {
        let mut console = FakeConsole::new("\n\n\n\n");

        assert_eq!(console.cycle(), CycleOutcome::Exit);
        assert!(console
            .output()
            .contains(&"Rover 1 final position: 1 3 N".to_owned()));
    }

    #[test]
    fn continuing_starts_a_fresh_log() {
        let mut session = ConsoleSession::new(&b"\n\n\ny\n5 5\n0 0 E\nMM\nn\n"[..], Vec::new());

        session.run().expect("in-memory io");

        let output = String::from_utf8(session.output).expect("utf8");
        assert!(output.starts_with("Mars Rover\n"));
        assert!(output.ends_with("Goodbye!\n"));
        assert_eq!(output.matches("Starting execution").count(), 2);
        assert_eq!(output.matches(PLATEAU_PROMPT).count(), 2);
        assert!(output.contains("Rover 1 final position: 2 0 E"));
    }

    #[test]
    fn end_of_input_exits() {
        let mut session = ConsoleSession::new(&b"5 5\n"[..], Vec::new());

        session.run().expect("in-memory io");

        let output = String::from_utf8(session.output).expect("utf8");
        assert!(output.ends_with(&format!("{ROVER_PROMPT}\nGoodbye!\n")));
    }
}
