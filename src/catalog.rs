//! Built-in example automata, embedded at compile time from the `automata/` directory.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::analyzer::analyze_nfa;
use crate::automaton::Nfa;
use crate::types::AutomatonError;

const AUTOMATON_TEXTS: [&str; 4] = [
    include_str!("../automata/ends-with-ab.json"),
    include_str!("../automata/a-star.json"),
    include_str!("../automata/contains-aa-or-bb.json"),
    include_str!("../automata/even-length.json"),
];

/// A named example NFA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    pub nfa: Nfa,
}

lazy_static::lazy_static! {
    pub static ref CATALOG: Vec<CatalogEntry> = parse_entries(&AUTOMATON_TEXTS);
}

fn parse_entries(texts: &[&str]) -> Vec<CatalogEntry> {
    texts
        .iter()
        .filter_map(|text| match parse_entry(text) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping built-in automaton: {}", e);
                None
            }
        })
        .collect()
}

fn parse_entry(text: &str) -> Result<CatalogEntry, AutomatonError> {
    let entry: CatalogEntry = serde_json::from_str(text)?;
    analyze_nfa(&entry.nfa)?;
    Ok(entry)
}

pub struct Catalog;

impl Catalog {
    /// Get the number of built-in automata
    pub fn count() -> usize {
        CATALOG.len()
    }

    /// Get an entry by its index
    pub fn get_by_index(index: usize) -> Option<&'static CatalogEntry> {
        CATALOG.get(index)
    }

    /// Get an entry by its name
    pub fn get_by_name(name: &str) -> Option<&'static CatalogEntry> {
        CATALOG.iter().find(|entry| entry.name == name)
    }

    /// List all entry names
    pub fn names() -> Vec<&'static str> {
        CATALOG.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Search entries by name, case-insensitively
    pub fn search(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        CATALOG
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }
}
