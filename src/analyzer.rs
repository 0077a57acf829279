//! This module provides functions for validating automata and Turing machines before they enter
//! the pipeline. Each value is run through a list of independent checks: declared start and
//! accept states, transition endpoints, transition symbols, and alphabet consistency.

use std::collections::BTreeSet;
use thiserror::Error;

use crate::automaton::{Dfa, Nfa};
use crate::machine::TuringMachine;
use crate::types::{AutomatonError, State};

/// Represents the structural problems found while analyzing an automaton or machine.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum AnalysisError {
    /// The start state is not one of the declared states.
    #[error("Invalid start state: {0}")]
    InvalidStartState(State),
    /// Accept states that are not part of the declared states.
    #[error("Accept states not found in the state set: {0:?}")]
    UnknownAcceptStates(Vec<State>),
    /// Transitions reference states that are not declared.
    #[error("Transitions reference undefined states: {0:?}")]
    UndefinedStates(Vec<State>),
    /// Transitions use symbols that are not part of the alphabet.
    #[error("Transitions use symbols outside the alphabet: {0:?}")]
    UnknownSymbols(Vec<char>),
    /// The alphabet lists the same symbol more than once.
    #[error("Alphabet contains duplicated symbols: {0:?}")]
    DuplicateSymbols(Vec<char>),
    /// The blank symbol is also declared as a regular tape symbol.
    #[error("Blank symbol {0:?} is part of the alphabet")]
    BlankInAlphabet(char),
    /// The working state count leaves no room to number the two sinks.
    #[error("Too many states: {0}")]
    TooManyStates(usize),
    /// Sink (accept or reject) states that have outgoing transitions.
    #[error("Halting states have outgoing transitions: {0:?}")]
    SinkTransitions(Vec<State>),
}

/// A uniform view of a finite automaton: its declarations plus a flat list of edges.
/// Epsilon edges carry `None` as their symbol.
struct Outline<'a> {
    states: &'a BTreeSet<State>,
    alphabet: &'a [char],
    start: State,
    accept: &'a BTreeSet<State>,
    edges: Vec<(State, Option<char>, State)>,
}

impl<'a> From<&'a Nfa> for Outline<'a> {
    fn from(nfa: &'a Nfa) -> Self {
        Self {
            states: &nfa.states,
            alphabet: &nfa.alphabet,
            start: nfa.start,
            accept: &nfa.accept,
            edges: nfa
                .transitions
                .iter()
                .flat_map(|(&(from, label), targets)| {
                    targets.iter().map(move |&to| (from, label.symbol(), to))
                })
                .collect(),
        }
    }
}

impl<'a> From<&'a Dfa> for Outline<'a> {
    fn from(dfa: &'a Dfa) -> Self {
        Self {
            states: &dfa.states,
            alphabet: &dfa.alphabet,
            start: dfa.start,
            accept: &dfa.accept,
            edges: dfa
                .transitions
                .iter()
                .map(|(&(from, symbol), &to)| (from, Some(symbol), to))
                .collect(),
        }
    }
}

/// Analyzes an [`Nfa`] for structural errors.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(AutomatonError::ValidationError)` carrying the first failed check.
pub fn analyze_nfa(nfa: &Nfa) -> Result<(), AutomatonError> {
    analyze_outline(&Outline::from(nfa))
}

/// Analyzes a [`Dfa`] for structural errors.
///
/// Determinism itself is guaranteed by the type; this checks the same declarations as
/// [`analyze_nfa`].
pub fn analyze_dfa(dfa: &Dfa) -> Result<(), AutomatonError> {
    analyze_outline(&Outline::from(dfa))
}

fn analyze_outline(outline: &Outline) -> Result<(), AutomatonError> {
    let errors = [
        check_alphabet,
        check_start_state,
        check_accept_states,
        check_transition_states,
        check_transition_symbols,
    ]
    .iter()
    .filter_map(|f| f(outline).err())
    .collect::<Vec<_>>();

    match errors.into_iter().next() {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Analyzes a [`TuringMachine`] for structural errors.
///
/// A machine does not need a total transition table: missing entries reject at run time.
/// It must, however, start in a known state, only target known states, keep its sinks
/// terminal, and read and write symbols of its own tape alphabet.
pub fn analyze_machine(machine: &TuringMachine) -> Result<(), AutomatonError> {
    [
        check_machine_state_count,
        check_machine_alphabet,
        check_machine_start_state,
        check_machine_sinks,
        check_machine_targets,
        check_machine_symbols,
    ]
    .iter()
    .find_map(|f| f(machine).err())
    .map_or(Ok(()), |error| Err(error.into()))
}

/// Checks only what a run needs up front: a representable state count, a consistent tape
/// alphabet, and a known start state.
///
/// Gaps and bad entries in the transition table are left to the run, where the lookup that
/// fails ends it with a rejection.
pub fn analyze_runnable(machine: &TuringMachine) -> Result<(), AutomatonError> {
    [
        check_machine_state_count,
        check_machine_alphabet,
        check_machine_start_state,
    ]
    .iter()
    .find_map(|f| f(machine).err())
    .map_or(Ok(()), |error| Err(error.into()))
}

/// Checks that no symbol appears twice in the alphabet.
fn check_alphabet(outline: &Outline) -> Result<(), AnalysisError> {
    duplicates(outline.alphabet).map_or(Ok(()), |symbols| {
        Err(AnalysisError::DuplicateSymbols(symbols))
    })
}

/// Checks that the start state is a declared state.
fn check_start_state(outline: &Outline) -> Result<(), AnalysisError> {
    if !outline.states.contains(&outline.start) {
        return Err(AnalysisError::InvalidStartState(outline.start));
    }

    Ok(())
}

/// Checks that every accept state is a declared state.
fn check_accept_states(outline: &Outline) -> Result<(), AnalysisError> {
    let unknown: Vec<State> = outline.accept.difference(outline.states).copied().collect();

    if !unknown.is_empty() {
        return Err(AnalysisError::UnknownAcceptStates(unknown));
    }

    Ok(())
}

/// Checks that both endpoints of every transition are declared states.
fn check_transition_states(outline: &Outline) -> Result<(), AnalysisError> {
    let undefined: BTreeSet<State> = outline
        .edges
        .iter()
        .flat_map(|&(from, _, to)| [from, to])
        .filter(|state| !outline.states.contains(state))
        .collect();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedStates(undefined.into_iter().collect()));
    }

    Ok(())
}

/// Checks that every non-epsilon transition consumes a symbol of the alphabet.
fn check_transition_symbols(outline: &Outline) -> Result<(), AnalysisError> {
    let unknown: BTreeSet<char> = outline
        .edges
        .iter()
        .filter_map(|&(_, symbol, _)| symbol)
        .filter(|symbol| !outline.alphabet.contains(symbol))
        .collect();

    if !unknown.is_empty() {
        return Err(AnalysisError::UnknownSymbols(unknown.into_iter().collect()));
    }

    Ok(())
}

/// Checks that both sinks fit after the working states. Runs first: every other machine
/// check computes the sink numbers.
fn check_machine_state_count(machine: &TuringMachine) -> Result<(), AnalysisError> {
    if machine.num_states > State::MAX - 2 {
        return Err(AnalysisError::TooManyStates(machine.num_states));
    }

    Ok(())
}

/// Checks that the tape symbols are distinct and do not include the blank.
fn check_machine_alphabet(machine: &TuringMachine) -> Result<(), AnalysisError> {
    if let Some(symbols) = duplicates(&machine.alphabet) {
        return Err(AnalysisError::DuplicateSymbols(symbols));
    }

    if machine.alphabet.contains(&machine.blank) {
        return Err(AnalysisError::BlankInAlphabet(machine.blank));
    }

    Ok(())
}

/// Checks that the start state is either a working state or one of the two sinks.
fn check_machine_start_state(machine: &TuringMachine) -> Result<(), AnalysisError> {
    if !machine.is_state(machine.start) {
        return Err(AnalysisError::InvalidStartState(machine.start));
    }

    Ok(())
}

/// Checks that transitions only leave working states.
fn check_machine_sinks(machine: &TuringMachine) -> Result<(), AnalysisError> {
    let sources: BTreeSet<State> = machine
        .transitions
        .keys()
        .map(|&(state, _)| state)
        .filter(|&state| state >= machine.num_states)
        .collect();

    if !sources.is_empty() {
        return Err(AnalysisError::SinkTransitions(sources.into_iter().collect()));
    }

    Ok(())
}

/// Checks that every transition targets a working state or a sink.
fn check_machine_targets(machine: &TuringMachine) -> Result<(), AnalysisError> {
    let undefined: BTreeSet<State> = machine
        .transitions
        .values()
        .map(|action| action.next)
        .filter(|&state| !machine.is_state(state))
        .collect();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedStates(undefined.into_iter().collect()));
    }

    Ok(())
}

/// Checks that every read and written symbol belongs to the tape alphabet.
fn check_machine_symbols(machine: &TuringMachine) -> Result<(), AnalysisError> {
    let unknown: BTreeSet<char> = machine
        .transitions
        .iter()
        .flat_map(|(&(_, read), action)| [read, action.write])
        .filter(|&symbol| !machine.is_tape_symbol(symbol))
        .collect();

    if !unknown.is_empty() {
        return Err(AnalysisError::UnknownSymbols(unknown.into_iter().collect()));
    }

    Ok(())
}

fn duplicates(alphabet: &[char]) -> Option<Vec<char>> {
    let mut seen = BTreeSet::new();
    let repeated: BTreeSet<char> = alphabet
        .iter()
        .copied()
        .filter(|&symbol| !seen.insert(symbol))
        .collect();

    (!repeated.is_empty()).then(|| repeated.into_iter().collect())
}
