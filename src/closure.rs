//! Set operations over NFA states used by subset construction: the epsilon-closure of a set
//! of states, and the one-symbol move of a set of states.

use std::collections::BTreeSet;

use crate::automaton::Nfa;
use crate::types::{Label, State};

/// Computes every state reachable from `states` through epsilon moves alone, including the
/// states themselves.
///
/// Each state enters the worklist at most once, so the loop terminates on any finite NFA.
pub fn epsilon_closure(nfa: &Nfa, states: impl IntoIterator<Item = State>) -> BTreeSet<State> {
    let mut closure: BTreeSet<State> = states.into_iter().collect();
    let mut pending: Vec<State> = closure.iter().copied().collect();

    while let Some(state) = pending.pop() {
        for next in nfa.successors(state, Label::Epsilon) {
            if closure.insert(next) {
                pending.push(next);
            }
        }
    }

    closure
}

/// Computes the union of the direct successors on `symbol` of every state in `states`.
///
/// Epsilon moves are not followed; callers close the result with [`epsilon_closure`].
pub fn subset_move(nfa: &Nfa, states: &BTreeSet<State>, symbol: char) -> BTreeSet<State> {
    states
        .iter()
        .flat_map(|&state| nfa.successors(state, Label::Symbol(symbol)))
        .collect()
}
