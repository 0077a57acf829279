//! This module defines the finite automata the pipeline works on: the nondeterministic
//! [`Nfa`], whose transitions may be epsilon moves and may have several targets, and the
//! deterministic [`Dfa`] produced by subset construction.
//!
//! Both serialize to JSON with their transition tables written as lists of rows, e.g.
//! `{"from": 0, "on": "a", "to": [0, 1]}`. An epsilon row uses `"on": null`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::closure::{epsilon_closure, subset_move};
use crate::types::{AutomatonError, Label, State};

/// A nondeterministic finite automaton with epsilon moves.
///
/// A missing `(state, label)` entry means the empty successor set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nfa {
    /// Every state of the automaton.
    pub states: BTreeSet<State>,
    /// The input symbols, in iteration order. Order only affects discovery order during
    /// subset construction.
    pub alphabet: Vec<char>,
    /// The start state.
    pub start: State,
    /// The accepting states.
    pub accept: BTreeSet<State>,
    /// Successor sets keyed by source state and label.
    #[serde(with = "nfa_rows")]
    pub transitions: BTreeMap<(State, Label), BTreeSet<State>>,
}

impl Nfa {
    /// Creates an NFA without transitions.
    pub fn new(
        states: impl IntoIterator<Item = State>,
        alphabet: impl IntoIterator<Item = char>,
        start: State,
        accept: impl IntoIterator<Item = State>,
    ) -> Self {
        Self {
            states: states.into_iter().collect(),
            alphabet: alphabet.into_iter().collect(),
            start,
            accept: accept.into_iter().collect(),
            transitions: BTreeMap::new(),
        }
    }

    /// Adds `to` to the successor set of `(from, label)`.
    pub fn add_transition(&mut self, from: State, label: impl Into<Label>, to: State) {
        self.transitions
            .entry((from, label.into()))
            .or_default()
            .insert(to);
    }

    /// Adds an epsilon move from `from` to `to`.
    pub fn add_epsilon(&mut self, from: State, to: State) {
        self.add_transition(from, Label::Epsilon, to);
    }

    /// Returns the direct successors of `state` on `label`.
    pub fn successors(&self, state: State, label: Label) -> impl Iterator<Item = State> + '_ {
        self.transitions
            .get(&(state, label))
            .into_iter()
            .flatten()
            .copied()
    }

    /// Checks whether any state of `subset` is accepting.
    pub fn is_accepting_subset<'a>(&self, subset: impl IntoIterator<Item = &'a State>) -> bool {
        subset.into_iter().any(|state| self.accept.contains(state))
    }

    /// Decides membership of `input` by tracking the set of active states directly.
    pub fn accepts(&self, input: &str) -> bool {
        let mut active = epsilon_closure(self, [self.start]);

        for symbol in input.chars() {
            if active.is_empty() {
                return false;
            }
            active = epsilon_closure(self, subset_move(self, &active, symbol));
        }

        self.is_accepting_subset(&active)
    }
}

/// A deterministic finite automaton.
///
/// A missing `(state, symbol)` entry is an implicit rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dfa {
    /// Every state of the automaton.
    pub states: BTreeSet<State>,
    /// The input symbols, in iteration order.
    pub alphabet: Vec<char>,
    /// The start state.
    pub start: State,
    /// The accepting states.
    pub accept: BTreeSet<State>,
    /// The single successor of each defined `(state, symbol)` pair.
    #[serde(with = "dfa_rows")]
    pub transitions: BTreeMap<(State, char), State>,
}

impl Dfa {
    /// Creates a DFA without transitions.
    pub fn new(
        states: impl IntoIterator<Item = State>,
        alphabet: impl IntoIterator<Item = char>,
        start: State,
        accept: impl IntoIterator<Item = State>,
    ) -> Self {
        Self {
            states: states.into_iter().collect(),
            alphabet: alphabet.into_iter().collect(),
            start,
            accept: accept.into_iter().collect(),
            transitions: BTreeMap::new(),
        }
    }

    /// Sets the successor of `(from, symbol)`, replacing any previous one.
    pub fn add_transition(&mut self, from: State, symbol: char, to: State) {
        self.transitions.insert((from, symbol), to);
    }

    /// Returns the successor of `state` on `symbol`, if defined.
    pub fn next(&self, state: State, symbol: char) -> Option<State> {
        self.transitions.get(&(state, symbol)).copied()
    }

    pub fn is_accepting(&self, state: State) -> bool {
        self.accept.contains(&state)
    }

    /// Decides membership of `input`. An undefined transition rejects.
    pub fn accepts(&self, input: &str) -> bool {
        input
            .chars()
            .try_fold(self.start, |state, symbol| self.next(state, symbol))
            .is_some_and(|state| self.is_accepting(state))
    }
}

impl TryFrom<&Nfa> for Dfa {
    type Error = AutomatonError;

    /// Reinterprets an NFA whose table is already deterministic: no epsilon moves and at most
    /// one successor per entry. Empty successor sets become undefined transitions.
    fn try_from(nfa: &Nfa) -> Result<Self, Self::Error> {
        let mut dfa = Dfa::new(
            nfa.states.iter().copied(),
            nfa.alphabet.iter().copied(),
            nfa.start,
            nfa.accept.iter().copied(),
        );

        for (&(state, label), targets) in &nfa.transitions {
            let non_deterministic = AutomatonError::NonDeterministic { state, label };
            let symbol = label.symbol().ok_or_else(|| non_deterministic.clone())?;

            let mut targets = targets.iter();
            match (targets.next(), targets.next()) {
                (None, _) => {}
                (Some(&target), None) => dfa.add_transition(state, symbol, target),
                (Some(_), Some(_)) => return Err(non_deterministic),
            }
        }

        Ok(dfa)
    }
}

mod nfa_rows {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::{BTreeMap, BTreeSet};

    use crate::types::{Label, State};

    #[derive(Serialize)]
    struct RowRef<'a> {
        from: State,
        on: Option<char>,
        to: &'a BTreeSet<State>,
    }

    #[derive(Deserialize)]
    struct Row {
        from: State,
        on: Option<char>,
        to: BTreeSet<State>,
    }

    pub fn serialize<S: Serializer>(
        table: &BTreeMap<(State, Label), BTreeSet<State>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(table.iter().map(|(&(from, label), to)| RowRef {
            from,
            on: label.symbol(),
            to,
        }))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<(State, Label), BTreeSet<State>>, D::Error> {
        let mut table: BTreeMap<(State, Label), BTreeSet<State>> = BTreeMap::new();

        // Rows for the same (state, label) are merged.
        for row in Vec::<Row>::deserialize(deserializer)? {
            table
                .entry((row.from, Label::from(row.on)))
                .or_default()
                .extend(row.to);
        }

        Ok(table)
    }
}

mod dfa_rows {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    use crate::types::State;

    #[derive(Serialize, Deserialize)]
    struct Row {
        from: State,
        on: char,
        to: State,
    }

    pub fn serialize<S: Serializer>(
        table: &BTreeMap<(State, char), State>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(table.iter().map(|(&(from, on), &to)| Row { from, on, to }))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<(State, char), State>, D::Error> {
        let mut table = BTreeMap::new();

        for row in Vec::<Row>::deserialize(deserializer)? {
            if let Some(previous) = table.insert((row.from, row.on), row.to) {
                if previous != row.to {
                    return Err(D::Error::custom(format!(
                        "state {} has several targets on {:?}",
                        row.from, row.on
                    )));
                }
            }
        }

        Ok(table)
    }
}
