//! This module provides the `AutomatonLoader` struct, responsible for loading automata and
//! Turing machines from JSON text, either given directly or read from files.
//!
//! Every loaded value is validated before it is returned.

use std::fs;
use std::path::{Path, PathBuf};

use crate::analyzer::{analyze_dfa, analyze_machine, analyze_nfa};
use crate::automaton::{Dfa, Nfa};
use crate::machine::TuringMachine;
use crate::types::AutomatonError;

/// `AutomatonLoader` is a utility struct for loading automata and machines.
pub struct AutomatonLoader;

impl AutomatonLoader {
    /// Parses and validates an NFA from JSON.
    pub fn load_nfa_from_string(content: &str) -> Result<Nfa, AutomatonError> {
        let nfa: Nfa = serde_json::from_str(content)?;
        analyze_nfa(&nfa)?;
        Ok(nfa)
    }

    /// Parses and validates a DFA from JSON. Conflicting rows for one `(state, symbol)` are a
    /// parse error.
    pub fn load_dfa_from_string(content: &str) -> Result<Dfa, AutomatonError> {
        let dfa: Dfa = serde_json::from_str(content)?;
        analyze_dfa(&dfa)?;
        Ok(dfa)
    }

    /// Parses and validates a Turing machine from JSON.
    pub fn load_machine_from_string(content: &str) -> Result<TuringMachine, AutomatonError> {
        let machine: TuringMachine = serde_json::from_str(content)?;
        analyze_machine(&machine)?;
        Ok(machine)
    }

    /// Loads an NFA from the JSON file at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(Nfa)` if the file is read, parsed and valid.
    /// * `Err(AutomatonError::FileError)` if the file cannot be read.
    /// * `Err(AutomatonError::ParseError)` if the content is not an NFA.
    /// * `Err(AutomatonError::ValidationError)` if the NFA is malformed.
    pub fn load_nfa(path: &Path) -> Result<Nfa, AutomatonError> {
        Self::load_nfa_from_string(&read(path)?)
    }

    /// Loads a DFA from the JSON file at `path`.
    pub fn load_dfa(path: &Path) -> Result<Dfa, AutomatonError> {
        Self::load_dfa_from_string(&read(path)?)
    }

    /// Loads a Turing machine from the JSON file at `path`.
    pub fn load_machine(path: &Path) -> Result<TuringMachine, AutomatonError> {
        Self::load_machine_from_string(&read(path)?)
    }

    /// Loads every `.json` NFA in `directory`, sorted by path.
    ///
    /// Directories and files with other extensions are skipped. Each element of the result
    /// carries either the loaded NFA with its path, or the error for that file.
    pub fn load_nfas(directory: &Path) -> Vec<Result<(PathBuf, Nfa), AutomatonError>> {
        load_all(directory, Self::load_nfa)
    }
}

fn read(path: &Path) -> Result<String, AutomatonError> {
    fs::read_to_string(path).map_err(|e| {
        AutomatonError::FileError(format!("Failed to read file {}: {}", path.display(), e))
    })
}

fn load_all<T>(
    directory: &Path,
    load: impl Fn(&Path) -> Result<T, AutomatonError>,
) -> Vec<Result<(PathBuf, T), AutomatonError>> {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            return vec![Err(AutomatonError::FileError(format!(
                "Failed to read directory {}: {}",
                directory.display(),
                e
            )))]
        }
    };

    let mut paths = Vec::new();
    let mut results = Vec::new();

    for entry in entries {
        match entry {
            Ok(entry) => paths.push(entry.path()),
            Err(e) => results.push(Err(AutomatonError::FileError(format!(
                "Failed to read directory entry: {}",
                e
            )))),
        }
    }

    paths.retain(|path| !path.is_dir() && path.extension().is_some_and(|ext| ext == "json"));
    paths.sort();

    results.extend(paths.into_iter().map(|path| {
        load(&path).map(|value| (path.clone(), value)).map_err(|e| {
            AutomatonError::FileError(format!("Failed to load {}: {}", path.display(), e))
        })
    }));

    results
}
