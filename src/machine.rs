//! This module defines the `TuringMachine` value consumed by the simulator: a single-tape
//! machine with `num_states` working states followed by two terminal sinks, the accept state
//! and the reject state.
//!
//! Deciders built by [`crate::decider`] have a total transition table. Hand-built machines may
//! leave entries out; the simulator rejects when it reaches one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Direction, State};

/// What a machine does for one `(state, read symbol)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The state to switch to.
    pub next: State,
    /// The symbol written over the cell under the head.
    pub write: char,
    /// Where the head moves after writing.
    pub direction: Direction,
}

impl Action {
    pub fn new(next: State, write: char, direction: Direction) -> Self {
        Self {
            next,
            write,
            direction,
        }
    }
}

/// A single-tape Turing machine.
///
/// States `0..num_states` are working states. State `num_states` accepts and state
/// `num_states + 1` rejects; neither has outgoing transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuringMachine {
    /// The number of working (non-sink) states.
    pub num_states: usize,
    /// The initial state.
    pub start: State,
    /// The symbol that pads the tape on both sides.
    pub blank: char,
    /// Every non-blank tape symbol, in iteration order.
    pub alphabet: Vec<char>,
    /// Actions keyed by current state and read symbol.
    #[serde(with = "machine_rows")]
    pub transitions: BTreeMap<(State, char), Action>,
}

impl TuringMachine {
    /// Creates a machine without transitions.
    pub fn new(
        num_states: usize,
        start: State,
        alphabet: impl IntoIterator<Item = char>,
        blank: char,
    ) -> Self {
        Self {
            num_states,
            start,
            blank,
            alphabet: alphabet.into_iter().collect(),
            transitions: BTreeMap::new(),
        }
    }

    /// The accepting sink.
    pub fn accept_state(&self) -> State {
        self.num_states
    }

    /// The rejecting sink.
    pub fn reject_state(&self) -> State {
        self.num_states + 1
    }

    /// Checks whether `state` is a working state or one of the sinks.
    pub fn is_state(&self, state: State) -> bool {
        state <= self.reject_state()
    }

    /// Checks whether `state` is the accept or the reject sink.
    pub fn is_sink(&self, state: State) -> bool {
        state == self.accept_state() || state == self.reject_state()
    }

    /// Checks whether `symbol` may appear on the tape.
    pub fn is_tape_symbol(&self, symbol: char) -> bool {
        symbol == self.blank || self.alphabet.contains(&symbol)
    }

    /// Returns every tape symbol: the alphabet followed by the blank.
    pub fn tape_alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.alphabet
            .iter()
            .copied()
            .chain(std::iter::once(self.blank))
    }

    /// Sets the action for `(state, read)`, replacing any previous one.
    pub fn add_transition(&mut self, state: State, read: char, action: Action) {
        self.transitions.insert((state, read), action);
    }

    /// Returns the action for `(state, read)`, if defined.
    pub fn action(&self, state: State, read: char) -> Option<&Action> {
        self.transitions.get(&(state, read))
    }

    /// Checks that every working state has an action for every tape symbol.
    pub fn is_total(&self) -> bool {
        (0..self.num_states).all(|state| {
            self.tape_alphabet()
                .all(|symbol| self.transitions.contains_key(&(state, symbol)))
        })
    }
}

mod machine_rows {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    use super::Action;
    use crate::types::{Direction, State};

    #[derive(Serialize, Deserialize)]
    struct Row {
        state: State,
        read: char,
        next: State,
        write: char,
        direction: Direction,
    }

    pub fn serialize<S: Serializer>(
        table: &BTreeMap<(State, char), Action>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(table.iter().map(|(&(state, read), action)| Row {
            state,
            read,
            next: action.next,
            write: action.write,
            direction: action.direction,
        }))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<(State, char), Action>, D::Error> {
        let mut table = BTreeMap::new();

        for row in Vec::<Row>::deserialize(deserializer)? {
            let action = Action::new(row.next, row.write, row.direction);
            if let Some(previous) = table.insert((row.state, row.read), action) {
                if previous != action {
                    return Err(D::Error::custom(format!(
                        "state {} has several actions on {:?}",
                        row.state, row.read
                    )));
                }
            }
        }

        Ok(table)
    }
}
