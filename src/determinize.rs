//! Subset construction: converts an [`Nfa`] into an equivalent [`Dfa`].
//!
//! Each DFA state stands for a set of NFA states. Sets are interned in a [`SubsetTable`], so
//! set-equal subsets always map to the same DFA index whatever order they are discovered in.
//! The table doubles as the worklist: index `i` is expanded only after `0..i`, and new subsets
//! are appended at the end.

use log::{debug, trace};
use std::collections::{BTreeSet, HashMap};

use crate::analyzer::analyze_nfa;
use crate::automaton::{Dfa, Nfa};
use crate::closure::{epsilon_closure, subset_move};
use crate::types::{AutomatonError, State};

/// A canonical set of NFA states: sorted, deduplicated and immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subset(Box<[State]>);

impl Subset {
    pub fn states(&self) -> &[State] {
        &self.0
    }

    pub fn contains(&self, state: State) -> bool {
        self.0.binary_search(&state).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<BTreeSet<State>> for Subset {
    fn from(states: BTreeSet<State>) -> Self {
        Self(states.into_iter().collect())
    }
}

/// Append-only interning table from subsets to DFA state indices.
#[derive(Debug, Default)]
struct SubsetTable {
    index: HashMap<Subset, State>,
    subsets: Vec<Subset>,
}

impl SubsetTable {
    /// Returns the index of `subset`, assigning the next free one if it is new.
    fn intern(&mut self, subset: Subset) -> State {
        if let Some(&existing) = self.index.get(&subset) {
            return existing;
        }

        let state = self.subsets.len();
        trace!("DFA state {} = NFA subset {:?}", state, subset.states());
        self.index.insert(subset.clone(), state);
        self.subsets.push(subset);
        state
    }

    fn get(&self, state: State) -> Option<&Subset> {
        self.subsets.get(state)
    }

    fn len(&self) -> usize {
        self.subsets.len()
    }
}

/// Converts `nfa` into a DFA accepting the same language.
///
/// The result has states `0..n`, start state `0`, and a transition for every state and every
/// alphabet symbol. Symbols with no NFA successors lead to the state of the empty subset, which
/// is created like any other subset and loops to itself.
///
/// # Errors
///
/// Returns `AutomatonError::ValidationError` when the NFA is malformed, e.g. its start state is
/// not one of its states.
pub fn determinize(nfa: &Nfa) -> Result<Dfa, AutomatonError> {
    determinize_with_subsets(nfa).map(|(dfa, _)| dfa)
}

/// Same as [`determinize`], also returning the NFA subset behind every DFA state, indexed by
/// DFA state.
pub fn determinize_with_subsets(nfa: &Nfa) -> Result<(Dfa, Vec<Subset>), AutomatonError> {
    analyze_nfa(nfa)?;

    let mut table = SubsetTable::default();
    let mut transitions = Vec::new();
    let mut accept = BTreeSet::new();

    table.intern(epsilon_closure(nfa, [nfa.start]).into());

    let mut current = 0;
    while let Some(subset) = table.get(current) {
        if nfa.is_accepting_subset(subset.states()) {
            accept.insert(current);
        }

        let members: BTreeSet<State> = subset.states().iter().copied().collect();
        for &symbol in &nfa.alphabet {
            let moved = subset_move(nfa, &members, symbol);
            let target = if moved.is_empty() {
                moved
            } else {
                epsilon_closure(nfa, moved)
            };

            let next = table.intern(target.into());
            transitions.push((current, symbol, next));
        }

        current += 1;
    }

    let mut dfa = Dfa::new(0..table.len(), nfa.alphabet.iter().copied(), 0, accept);
    for (from, symbol, to) in transitions {
        dfa.add_transition(from, symbol, to);
    }

    debug!(
        "Determinized NFA with {} states into DFA with {} states",
        nfa.states.len(),
        dfa.states.len()
    );

    Ok((dfa, table.subsets))
}
