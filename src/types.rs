//! This module defines the shared vocabulary of the pipeline: state identifiers, transition
//! labels, head directions, the tape alphabet configuration, and the crate-wide error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analyzer::AnalysisError;

/// The default blank symbol used to pad the Turing Machine tape.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The conventional two-symbol input alphabet used by the surrounding tooling.
pub const DEFAULT_INPUT_ALPHABET: [char; 2] = ['a', 'b'];

/// A state identifier. Automata and machines number their states with plain integers.
pub type State = usize;

/// The label of an automaton transition: either a real input symbol or an epsilon move.
///
/// Epsilon labels are only legal in NFA transition tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Label {
    /// A move that consumes no input.
    Epsilon,
    /// A move that consumes the given input symbol.
    Symbol(char),
}

impl Label {
    /// Returns the consumed symbol, or `None` for an epsilon move.
    pub fn symbol(self) -> Option<char> {
        match self {
            Label::Epsilon => None,
            Label::Symbol(c) => Some(c),
        }
    }
}

impl From<char> for Label {
    fn from(symbol: char) -> Self {
        Label::Symbol(symbol)
    }
}

impl From<Option<char>> for Label {
    fn from(symbol: Option<char>) -> Self {
        symbol.map_or(Label::Epsilon, Label::Symbol)
    }
}

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// The signed head offset produced by this direction.
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// The outer alphabet a decider is built over: the input symbols it may read, plus the blank
/// symbol that pads the tape and signals the end of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeAlphabet {
    /// Input symbols, in iteration order.
    pub input: Vec<char>,
    /// The blank symbol. Must not be one of the input symbols.
    pub blank: char,
}

impl TapeAlphabet {
    pub fn new(input: impl IntoIterator<Item = char>, blank: char) -> Self {
        Self {
            input: input.into_iter().collect(),
            blank,
        }
    }

    /// Returns the full tape alphabet: every input symbol followed by the blank.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.input.iter().copied().chain(std::iter::once(self.blank))
    }
}

impl Default for TapeAlphabet {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_ALPHABET, DEFAULT_BLANK_SYMBOL)
    }
}

/// Represents the errors that can occur while building, converting, or loading automata and
/// Turing machines.
///
/// Rejecting an input is not an error; see [`crate::simulator::Verdict`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutomatonError {
    /// The value violates a structural invariant (unknown states, symbols outside the alphabet...).
    #[error("Validation error: {0}")]
    ValidationError(#[from] AnalysisError),
    /// A transition table expected to be deterministic has an epsilon move or several targets.
    #[error("Transition table is not deterministic at state {state} on {label:?}")]
    NonDeterministic { state: State, label: Label },
    /// A DFA symbol is missing from the outer input alphabet of the decider.
    #[error("Symbol {0:?} is not part of the outer input alphabet")]
    SymbolOutsideAlphabet(char),
    /// The JSON text could not be turned into an automaton or machine.
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Reading an automaton file or directory failed.
    #[error("File error: {0}")]
    FileError(String),
}

impl From<serde_json::Error> for AutomatonError {
    fn from(error: serde_json::Error) -> Self {
        AutomatonError::ParseError(error.to_string())
    }
}
