use crate::domain::entities::watchlist::Watchlist;
use crate::domain::error::{DomainError, StoreError};
use crate::domain::ports::watchlist_repository::WatchlistRepository;
use crate::domain::values::symbol::{parse_symbol_list, Symbol};
use log::info;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddOutcome {
    pub added: Vec<Symbol>,
    pub already_present: Vec<Symbol>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemoveOutcome {
    pub removed: Vec<Symbol>,
    pub not_found: Vec<Symbol>,
}

pub struct WatchlistStore {
    repo: Arc<dyn WatchlistRepository>,
}

impl WatchlistStore {
    pub fn new(repo: Arc<dyn WatchlistRepository>) -> Self {
        Self { repo }
    }

    pub fn load(&self) -> Result<Watchlist, StoreError> {
        self.repo.load()
    }

    /// Appends new symbols in first-seen order and persists once if any were new.
    /// Inputs are validated before the watchlist is read.
    pub fn add<S: AsRef<str>>(&self, inputs: &[S]) -> Result<AddOutcome, DomainError> {
        let symbols = unique(parse_symbol_list(inputs)?);
        let mut watchlist = self.repo.load()?;

        let mut outcome = AddOutcome::default();
        for symbol in symbols {
            if watchlist.insert(symbol.clone()) {
                outcome.added.push(symbol);
            } else {
                outcome.already_present.push(symbol);
            }
        }

        if !outcome.added.is_empty() {
            self.persist(&watchlist)?;
        }
        Ok(outcome)
    }

    /// Removes matching symbols and persists once if any were removed.
    pub fn remove<S: AsRef<str>>(&self, inputs: &[S]) -> Result<RemoveOutcome, DomainError> {
        let symbols = unique(parse_symbol_list(inputs)?);
        let mut watchlist = self.repo.load()?;

        let mut outcome = RemoveOutcome::default();
        for symbol in symbols {
            if watchlist.remove(&symbol) {
                outcome.removed.push(symbol);
            } else {
                outcome.not_found.push(symbol);
            }
        }

        if !outcome.removed.is_empty() {
            self.persist(&watchlist)?;
        }
        Ok(outcome)
    }

    pub fn persist(&self, watchlist: &Watchlist) -> Result<(), StoreError> {
        self.repo.save(watchlist)?;
        info!("Watchlist saved ({} symbols)", watchlist.len());
        Ok(())
    }
}

/// Drops repeats within one batch, keeping first occurrences.
fn unique(symbols: Vec<Symbol>) -> Vec<Symbol> {
    let mut seen = std::collections::HashSet::new();
    symbols
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
