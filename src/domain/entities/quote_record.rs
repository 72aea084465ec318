use crate::domain::ports::market_data::ProviderInfo;
use crate::domain::values::direction::Direction;
use crate::domain::values::symbol::Symbol;
use serde::Serialize;

pub const NAME_WIDTH: usize = 28;
pub const ELLIPSIS: &str = "...";
pub const MISSING_NAME: &str = "N/A";

/// One symbol's quote snapshot with derived change metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRecord {
    symbol: Symbol,
    display_name: String,
    current_price: Option<f64>,
    previous_close: Option<f64>,
    change: f64,
    percent_change: f64,
    direction: Direction,
    market_cap: f64,
}

impl QuoteRecord {
    pub fn from_info(symbol: Symbol, info: &ProviderInfo) -> Self {
        let current_price = info.current_price();
        let previous_close = info.previous_close();

        // A zero price carries no more information than a missing one.
        let (change, percent_change, direction) = match (current_price, previous_close) {
            (Some(current), Some(previous)) if current > 0.0 && previous > 0.0 => {
                let change = current - previous;
                (change, change / previous * 100.0, Direction::from_change(change))
            }
            _ => (0.0, 0.0, Direction::Unknown),
        };

        Self {
            symbol,
            display_name: truncate_name(info.long_name().unwrap_or(MISSING_NAME)),
            current_price,
            previous_close,
            change,
            percent_change,
            direction,
            market_cap: info.market_cap(),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn current_price(&self) -> Option<f64> {
        self.current_price
    }

    pub fn previous_close(&self) -> Option<f64> {
        self.previous_close
    }

    pub fn change(&self) -> f64 {
        self.change
    }

    pub fn percent_change(&self) -> f64 {
        self.percent_change
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn market_cap(&self) -> f64 {
        self.market_cap
    }
}

/// Cuts names longer than `NAME_WIDTH` characters and marks the cut.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let mut cut: String = name.chars().take(NAME_WIDTH).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(current: Option<f64>, previous: Option<f64>) -> ProviderInfo {
        ProviderInfo {
            current_price: current,
            previous_close: previous,
            long_name: Some("Apple Inc.".into()),
            market_cap: Some(3.0e12),
        }
    }

    fn record(current: Option<f64>, previous: Option<f64>) -> QuoteRecord {
        QuoteRecord::from_info(Symbol::parse("AAPL").unwrap(), &info(current, previous))
    }

    #[test]
    fn test_percent_change_formula() {
        let cases = [(110.0, 100.0), (95.5, 100.0), (0.5, 0.25), (187.44, 189.98)];
        for (current, previous) in cases {
            let r = record(Some(current), Some(previous));
            let expected = (current - previous) / previous * 100.0;
            assert!((r.change() - (current - previous)).abs() < 1e-9);
            assert!((r.percent_change() - expected).abs() < 1e-9);
            assert_eq!(r.direction() == Direction::Up, current - previous >= 0.0);
        }
    }

    #[test]
    fn test_unchanged_price_is_up() {
        let r = record(Some(100.0), Some(100.0));
        assert_eq!(r.change(), 0.0);
        assert_eq!(r.direction(), Direction::Up);
    }

    #[test]
    fn test_falling_price_is_down() {
        let r = record(Some(90.0), Some(100.0));
        assert_eq!(r.direction(), Direction::Down);
        assert!((r.percent_change() + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_previous_close_is_guarded() {
        let r = record(Some(50.0), Some(0.0));
        assert_eq!(r.change(), 0.0);
        assert_eq!(r.percent_change(), 0.0);
        assert_eq!(r.direction(), Direction::Unknown);
        assert!(r.percent_change().is_finite());
        assert_eq!(r.previous_close(), Some(0.0));
    }

    #[test]
    fn test_absent_prices_are_unknown() {
        for (current, previous) in [(None, Some(100.0)), (Some(100.0), None), (None, None)] {
            let r = record(current, previous);
            assert_eq!(r.change(), 0.0);
            assert_eq!(r.percent_change(), 0.0);
            assert_eq!(r.direction(), Direction::Unknown);
        }
    }

    #[test]
    fn test_long_name_truncated_with_ellipsis() {
        let name = "A".repeat(50);
        let truncated = truncate_name(&name);
        assert_eq!(truncated.chars().count(), 31);
        assert_eq!(truncated, format!("{}...", "A".repeat(28)));
    }

    #[test]
    fn test_exact_width_name_untouched() {
        let name = "B".repeat(28);
        assert_eq!(truncate_name(&name), name);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let name = "é".repeat(30);
        let truncated = truncate_name(&name);
        assert_eq!(truncated.chars().count(), 31);
    }

    #[test]
    fn test_missing_name_and_cap() {
        let r = QuoteRecord::from_info(Symbol::parse("xyz").unwrap(), &ProviderInfo::default());
        assert_eq!(r.display_name(), "N/A");
        assert_eq!(r.market_cap(), 0.0);
        assert_eq!(r.symbol().as_str(), "XYZ");
    }
}
