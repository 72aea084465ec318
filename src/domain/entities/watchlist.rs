use crate::domain::values::symbol::Symbol;
use serde::{Deserialize, Serialize};

/// Ordered set of tracked symbols. Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct Watchlist {
    symbols: Vec<Symbol>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    /// Appends `symbol` unless already present. Returns whether it was added.
    pub fn insert(&mut self, symbol: Symbol) -> bool {
        if self.contains(&symbol) {
            return false;
        }
        self.symbols.push(symbol);
        true
    }

    /// Returns whether `symbol` was present.
    pub fn remove(&mut self, symbol: &Symbol) -> bool {
        match self.symbols.iter().position(|s| s == symbol) {
            Some(idx) => {
                self.symbols.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl TryFrom<Vec<Symbol>> for Watchlist {
    type Error = String;
    fn try_from(symbols: Vec<Symbol>) -> Result<Self, Self::Error> {
        let mut watchlist = Watchlist::new();
        for symbol in symbols {
            let dup = symbol.to_string();
            if !watchlist.insert(symbol) {
                return Err(format!("duplicate symbol {dup}"));
            }
        }
        Ok(watchlist)
    }
}

impl From<Watchlist> for Vec<Symbol> {
    fn from(w: Watchlist) -> Self {
        w.symbols
    }
}
