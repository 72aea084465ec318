use crate::domain::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_LEN: usize = 16;

/// Normalized ticker symbol: trimmed, uppercase, non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }
        // Checked before case mapping: Unicode uppercasing can turn
        // non-ASCII letters into ASCII ones ("ß" -> "SS").
        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=');
        if trimmed.len() > MAX_LEN || !trimmed.chars().all(allowed) {
            return Err(ValidationError::Invalid(trimmed.to_string()));
        }
        Ok(Symbol(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Splits user input on commas and whitespace into validated symbols.
///
/// Blank segments are skipped; any invalid segment rejects the whole input.
pub fn parse_symbol_list<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Symbol>, ValidationError> {
    let symbols = inputs
        .iter()
        .flat_map(|input| {
            input
                .as_ref()
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.trim().is_empty())
                .map(Symbol::parse)
                .collect::<Vec<_>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    if symbols.is_empty() {
        return Err(ValidationError::NoSymbols);
    }
    Ok(symbols)
}

impl FromStr for Symbol {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::parse(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Symbol::parse(&s)
    }
}

impl From<Symbol> for String {
    fn from(s: Symbol) -> Self {
        s.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
