//! This module defines the `Simulator`, which runs a [`TuringMachine`] on an input string one
//! step at a time, and the [`simulate`] function that drives it to a verdict while recording a
//! configuration before every step.
//!
//! The tape is unbounded in both directions. Cells are materialized lazily: whenever the head
//! stands outside the stored cells, a blank is added on that side before reading.

use log::{debug, trace};

use crate::analyzer::analyze_runnable;
use crate::machine::TuringMachine;
use crate::types::{AutomatonError, Direction, State};

/// The final answer of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// The machine entered its accept sink.
    Accepted,
    /// The machine entered its reject sink.
    Rejected,
    /// The step budget ran out before the machine halted.
    StepLimit,
    /// The machine has no action for the current state and symbol.
    UndefinedTransition { state: State, symbol: char },
}

impl Halt {
    /// Only reaching the accept sink accepts; every other halt rejects.
    pub fn verdict(&self) -> Verdict {
        match self {
            Halt::Accepted => Verdict::Accept,
            _ => Verdict::Reject,
        }
    }
}

/// Represents the outcome of a single simulator step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a transition and can keep running.
    Continue,
    /// The machine has halted.
    Halt(Halt),
}

/// A snapshot of the machine: control state, materialized tape cells, and head position
/// relative to the first cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub state: State,
    pub tape: Vec<char>,
    pub head: isize,
}

/// The result of [`simulate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub verdict: Verdict,
    pub halt: Halt,
    /// One configuration per loop iteration, the last one being the halting configuration.
    pub trace: Vec<Configuration>,
}

impl Execution {
    pub fn accepted(&self) -> bool {
        self.verdict == Verdict::Accept
    }
}

/// A tape that grows on demand at either end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<char>,
    head: isize,
    blank: char,
}

impl Tape {
    /// Creates a tape holding `input` followed by one blank, with the head on the first cell.
    pub fn new(input: &str, blank: char) -> Self {
        Self {
            cells: input.chars().chain(std::iter::once(blank)).collect(),
            head: 0,
            blank,
        }
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    pub fn head(&self) -> isize {
        self.head
    }

    /// Adds blank cells until the head stands on a stored cell. Extending on the left shifts
    /// every index, so the head is renumbered to stay on the same cell.
    fn materialize(&mut self) {
        while self.head < 0 {
            self.cells.insert(0, self.blank);
            self.head += 1;
        }

        while self.head as usize >= self.cells.len() {
            self.cells.push(self.blank);
        }
    }

    /// Reads the symbol under the head, materializing the cell first.
    pub fn read(&mut self) -> char {
        self.materialize();
        self.cells[self.head as usize]
    }

    /// Writes `symbol` under the head, materializing the cell first.
    pub fn write(&mut self, symbol: char) {
        self.materialize();
        self.cells[self.head as usize] = symbol;
    }

    /// Moves the head one cell. The new cell is only materialized on the next read or write.
    pub fn shift(&mut self, direction: Direction) {
        self.head += direction.offset();
    }
}

/// Runs a [`TuringMachine`] step by step.
pub struct Simulator<'a> {
    machine: &'a TuringMachine,
    state: State,
    tape: Tape,
    max_steps: Option<usize>,
    step_count: usize,
}

impl<'a> Simulator<'a> {
    /// Creates a simulator in the machine's start state, with `input` on the tape.
    ///
    /// # Errors
    ///
    /// Returns `AutomatonError::ValidationError` when the machine cannot start: too many
    /// states to number its sinks, an inconsistent tape alphabet, or an unknown start state.
    /// The transition table is not checked here; a missing or unusable entry ends the run
    /// with [`Halt::UndefinedTransition`].
    pub fn new(
        machine: &'a TuringMachine,
        input: &str,
        max_steps: Option<usize>,
    ) -> Result<Self, AutomatonError> {
        analyze_runnable(machine)?;

        Ok(Self {
            machine,
            state: machine.start,
            tape: Tape::new(input, machine.blank),
            max_steps,
            step_count: 0,
        })
    }

    /// Executes a single step of the machine.
    ///
    /// Halting is checked first: the sinks halt, then an exhausted step budget. Otherwise the
    /// symbol under the head is read, and the matching action writes, moves and switches state.
    /// A missing action halts with [`Halt::UndefinedTransition`].
    pub fn step(&mut self) -> Step {
        if self.state == self.machine.accept_state() {
            return Step::Halt(Halt::Accepted);
        }
        if self.state == self.machine.reject_state() {
            return Step::Halt(Halt::Rejected);
        }
        if self.max_steps.is_some_and(|max| self.step_count >= max) {
            return Step::Halt(Halt::StepLimit);
        }

        let symbol = self.tape.read();
        let Some(action) = self.machine.action(self.state, symbol).copied() else {
            return Step::Halt(Halt::UndefinedTransition {
                state: self.state,
                symbol,
            });
        };

        trace!(
            "step {}: state {} reads {:?} -> {:?}",
            self.step_count,
            self.state,
            symbol,
            action
        );

        self.tape.write(action.write);
        self.tape.shift(action.direction);
        self.state = action.next;
        self.step_count += 1;

        Step::Continue
    }

    /// Runs until the machine halts, recording the configuration before every step.
    pub fn run(&mut self) -> Execution {
        let mut trace = Vec::new();

        loop {
            trace.push(self.configuration());

            if let Step::Halt(halt) = self.step() {
                debug!("Machine halted after {} steps: {:?}", self.step_count, halt);

                return Execution {
                    verdict: halt.verdict(),
                    halt,
                    trace,
                };
            }
        }
    }

    /// Returns a snapshot of the current configuration.
    pub fn configuration(&self) -> Configuration {
        Configuration {
            state: self.state,
            tape: self.tape.cells().to_vec(),
            head: self.tape.head(),
        }
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the number of transitions taken so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }
}

/// Runs `machine` on `input` until it halts or `max_steps` transitions have been taken.
///
/// Running out of steps or hitting an undefined transition is a rejection, not an error; the
/// trace collected so far is kept either way.
///
/// # Errors
///
/// Returns `AutomatonError::ValidationError` when the machine is malformed.
pub fn simulate(
    machine: &TuringMachine,
    input: &str,
    max_steps: Option<usize>,
) -> Result<Execution, AutomatonError> {
    Ok(Simulator::new(machine, input, max_steps)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisError;
    use crate::machine::Action;

    /// Accepts exactly the strings of a's; rejects on 'b'.
    fn all_as() -> TuringMachine {
        let mut machine = TuringMachine::new(1, 0, ['a', 'b'], '_');
        machine.add_transition(0, 'a', Action::new(0, 'a', Direction::Right));
        machine.add_transition(0, 'b', Action::new(2, 'b', Direction::Right));
        machine.add_transition(0, '_', Action::new(1, '_', Direction::Right));
        machine
    }

    #[test]
    fn test_tape_extends_on_both_sides() {
        let mut tape = Tape::new("ab", '_');
        assert_eq!(tape.cells(), &['a', 'b', '_']);

        tape.shift(Direction::Left);
        assert_eq!(tape.head(), -1);
        assert_eq!(tape.read(), '_');
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.cells(), &['_', 'a', 'b', '_']);

        for _ in 0..4 {
            tape.shift(Direction::Right);
        }
        tape.write('x');
        assert_eq!(tape.cells(), &['_', 'a', 'b', '_', 'x']);
    }

    #[test]
    fn test_accepting_run_trace() {
        let machine = all_as();
        let execution = simulate(&machine, "aa", None).unwrap();

        assert_eq!(execution.verdict, Verdict::Accept);
        assert_eq!(execution.halt, Halt::Accepted);
        assert_eq!(
            execution.trace,
            vec![
                Configuration { state: 0, tape: vec!['a', 'a', '_'], head: 0 },
                Configuration { state: 0, tape: vec!['a', 'a', '_'], head: 1 },
                Configuration { state: 0, tape: vec!['a', 'a', '_'], head: 2 },
                Configuration { state: 1, tape: vec!['a', 'a', '_'], head: 3 },
            ]
        );
    }

    #[test]
    fn test_rejecting_run() {
        let execution = simulate(&all_as(), "aba", None).unwrap();

        assert_eq!(execution.verdict, Verdict::Reject);
        assert_eq!(execution.halt, Halt::Rejected);
        assert_eq!(execution.trace.len(), 3);
        assert_eq!(execution.trace.last().map(|c| c.state), Some(2));
    }

    #[test]
    fn test_undefined_transition_rejects_and_keeps_trace() {
        let execution = simulate(&all_as(), "ac", None);

        // 'c' is not a tape symbol of the machine but may still appear in the input.
        let execution = execution.unwrap();
        assert_eq!(execution.verdict, Verdict::Reject);
        assert_eq!(
            execution.halt,
            Halt::UndefinedTransition { state: 0, symbol: 'c' }
        );
        assert_eq!(execution.trace.len(), 2);
    }

    #[test]
    fn test_step_limit_rejects() {
        // Walks left forever, growing the tape on the left.
        let mut machine = TuringMachine::new(1, 0, ['a'], '_');
        machine.add_transition(0, 'a', Action::new(0, 'a', Direction::Left));
        machine.add_transition(0, '_', Action::new(0, '_', Direction::Left));

        let execution = simulate(&machine, "a", Some(3)).unwrap();

        assert_eq!(execution.verdict, Verdict::Reject);
        assert_eq!(execution.halt, Halt::StepLimit);
        assert_eq!(execution.trace.len(), 4);
        assert_eq!(
            execution.trace[3],
            Configuration { state: 0, tape: vec!['_', '_', 'a', '_'], head: -1 }
        );
    }

    #[test]
    fn test_start_in_sink_halts_immediately() {
        let mut machine = all_as();
        machine.start = machine.accept_state();

        let execution = simulate(&machine, "bbb", Some(0)).unwrap();
        assert!(execution.accepted());
        assert_eq!(execution.trace.len(), 1);
    }

    #[test]
    fn test_single_steps() {
        let machine = all_as();
        let mut simulator = Simulator::new(&machine, "a", None).unwrap();

        assert_eq!(simulator.step(), Step::Continue);
        assert_eq!(simulator.tape().head(), 1);
        assert_eq!(simulator.step(), Step::Continue);
        assert_eq!(simulator.state(), 1);
        assert_eq!(simulator.step_count(), 2);
        assert_eq!(simulator.step(), Step::Halt(Halt::Accepted));
        assert_eq!(simulator.step_count(), 2);
    }

    #[test]
    fn test_writes_are_applied() {
        let mut machine = TuringMachine::new(1, 0, ['a', 'b'], '_');
        machine.add_transition(0, 'a', Action::new(0, 'b', Direction::Right));
        machine.add_transition(0, '_', Action::new(1, '_', Direction::Left));

        let execution = simulate(&machine, "aa", None).unwrap();

        assert!(execution.accepted());
        assert_eq!(
            execution.trace.last(),
            Some(&Configuration { state: 1, tape: vec!['b', 'b', '_'], head: 1 })
        );
    }

    #[test]
    fn test_malformed_machine_is_an_error() {
        let mut machine = all_as();
        machine.start = 5;

        assert!(matches!(
            simulate(&machine, "a", None),
            Err(AutomatonError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unknown_target_rejects_at_run_time() {
        let mut machine = TuringMachine::new(1, 0, ['a'], '_');
        machine.add_transition(0, 'a', Action::new(7, 'a', Direction::Right));

        let execution = simulate(&machine, "a", None).unwrap();

        assert_eq!(execution.verdict, Verdict::Reject);
        assert_eq!(
            execution.halt,
            Halt::UndefinedTransition { state: 7, symbol: '_' }
        );
        assert_eq!(
            execution.trace,
            vec![
                Configuration { state: 0, tape: vec!['a', '_'], head: 0 },
                Configuration { state: 7, tape: vec!['a', '_'], head: 1 },
            ]
        );
    }

    #[test]
    fn test_transitions_out_of_sinks_are_never_taken() {
        let mut machine = all_as();
        let accept = machine.accept_state();
        machine.add_transition(accept, '_', Action::new(0, '_', Direction::Left));

        let execution = simulate(&machine, "a", None).unwrap();

        assert_eq!(execution.halt, Halt::Accepted);
        assert_eq!(execution.trace.len(), 3);
    }

    #[test]
    fn test_unrepresentable_state_count_is_an_error() {
        let machine = TuringMachine::new(usize::MAX, 0, ['a'], '_');

        assert!(matches!(
            simulate(&machine, "a", None),
            Err(AutomatonError::ValidationError(AnalysisError::TooManyStates(_)))
        ));
    }
}
