//! Builds a Turing machine decider from a [`Dfa`].
//!
//! The machine sweeps right over its input, following the DFA one symbol per step and writing
//! back every symbol it reads. Reading the blank after the input ends the sweep: accepting DFA
//! states move to the accept sink, all others to the reject sink. Undefined DFA transitions, and
//! symbols the DFA does not know, go straight to the reject sink.

use log::debug;
use std::collections::BTreeMap;

use crate::analyzer::{analyze_dfa, analyze_machine};
use crate::automaton::Dfa;
use crate::machine::{Action, TuringMachine};
use crate::types::{AutomatonError, Direction, State, TapeAlphabet, DEFAULT_BLANK_SYMBOL};

/// Builds a decider over the DFA's own alphabet, padded with [`DEFAULT_BLANK_SYMBOL`].
pub fn to_tm_decider(dfa: &Dfa) -> Result<TuringMachine, AutomatonError> {
    let tape = TapeAlphabet::new(dfa.alphabet.iter().copied(), DEFAULT_BLANK_SYMBOL);
    to_tm_decider_with(dfa, &tape)
}

/// Builds a decider over an explicit outer alphabet, which must contain every DFA symbol.
///
/// DFA states are renumbered `0..n` in ascending order; the sinks follow as `n` (accept) and
/// `n + 1` (reject). The resulting transition table is total over every working state and every
/// tape symbol.
///
/// # Errors
///
/// * `AutomatonError::ValidationError` if the DFA is malformed, or if the blank is one of the
///   input symbols.
/// * `AutomatonError::SymbolOutsideAlphabet` if the DFA reads a symbol the outer alphabet lacks.
pub fn to_tm_decider_with(dfa: &Dfa, tape: &TapeAlphabet) -> Result<TuringMachine, AutomatonError> {
    analyze_dfa(dfa)?;

    if let Some(&symbol) = dfa.alphabet.iter().find(|s| !tape.input.contains(s)) {
        return Err(AutomatonError::SymbolOutsideAlphabet(symbol));
    }

    let renumbered: BTreeMap<State, State> = dfa
        .states
        .iter()
        .enumerate()
        .map(|(index, &state)| (state, index))
        .collect();

    let start = renumbered.get(&dfa.start).copied().unwrap_or_default();
    let mut machine = TuringMachine::new(
        dfa.states.len(),
        start,
        tape.input.iter().copied(),
        tape.blank,
    );
    let accept = machine.accept_state();
    let reject = machine.reject_state();

    for (&state, &index) in &renumbered {
        for &symbol in &tape.input {
            let next = dfa
                .next(state, symbol)
                .and_then(|target| renumbered.get(&target).copied())
                .unwrap_or(reject);

            machine.add_transition(index, symbol, Action::new(next, symbol, Direction::Right));
        }

        // End of input. The direction is irrelevant: both targets halt.
        let verdict = if dfa.is_accepting(state) { accept } else { reject };
        machine.add_transition(
            index,
            tape.blank,
            Action::new(verdict, tape.blank, Direction::Right),
        );
    }

    analyze_machine(&machine)?;

    debug!(
        "Built decider with {} working states over {} tape symbols",
        machine.num_states,
        tape.input.len() + 1
    );

    Ok(machine)
}
