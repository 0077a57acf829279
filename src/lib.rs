//! This crate converts nondeterministic finite automata into deterministic ones by subset
//! construction, turns a DFA into a Turing machine decider, and simulates Turing machines on
//! an unbounded tape while recording every configuration.
//!
//! ```
//! use tmd::{determinize, simulate, to_tm_decider, Nfa, Verdict};
//!
//! let mut nfa = Nfa::new([0, 1, 2], ['a', 'b'], 0, [2]);
//! nfa.add_transition(0, 'a', 0);
//! nfa.add_transition(0, 'a', 1);
//! nfa.add_transition(0, 'b', 0);
//! nfa.add_transition(1, 'b', 2);
//!
//! let machine = to_tm_decider(&determinize(&nfa)?)?;
//! let execution = simulate(&machine, "bab", None)?;
//!
//! assert_eq!(execution.verdict, Verdict::Accept);
//! assert_eq!(execution.trace.len(), 5);
//! # Ok::<(), tmd::AutomatonError>(())
//! ```

pub mod analyzer;
pub mod automaton;
pub mod catalog;
pub mod closure;
pub mod decider;
pub mod determinize;
pub mod loader;
pub mod machine;
pub mod simulator;
pub mod types;

/// Re-exports the validation entry points and `AnalysisError` from the analyzer module.
pub use analyzer::{analyze_dfa, analyze_machine, analyze_nfa, analyze_runnable, AnalysisError};
/// Re-exports the `Nfa` and `Dfa` structs from the automaton module.
pub use automaton::{Dfa, Nfa};
/// Re-exports the built-in example automata.
pub use catalog::{Catalog, CatalogEntry, CATALOG};
/// Re-exports the closure operations used by subset construction.
pub use closure::{epsilon_closure, subset_move};
/// Re-exports the decider builders.
pub use decider::{to_tm_decider, to_tm_decider_with};
/// Re-exports subset construction.
pub use determinize::{determinize, determinize_with_subsets, Subset};
/// Re-exports the `AutomatonLoader` struct from the loader module.
pub use loader::AutomatonLoader;
/// Re-exports the `TuringMachine` and `Action` structs from the machine module.
pub use machine::{Action, TuringMachine};
/// Re-exports the simulator and its results.
pub use simulator::{simulate, Configuration, Execution, Halt, Simulator, Step, Tape, Verdict};
/// Re-exports the shared types of the pipeline.
pub use types::{
    AutomatonError, Direction, Label, State, TapeAlphabet, DEFAULT_BLANK_SYMBOL,
    DEFAULT_INPUT_ALPHABET,
};
