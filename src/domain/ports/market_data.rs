/// Market data provider port: fetch-by-symbol access to a quote source.
///
/// Providers return loosely populated data. Every field of `ProviderInfo`
/// may be missing, and callers must treat absence as "unknown" rather than
/// as an error.
use crate::domain::error::FetchError;
use crate::domain::values::history_period::HistoryPeriod;
use crate::domain::values::symbol::Symbol;
use chrono::NaiveDate;
use serde::Serialize;

/// Snapshot fields a provider may report for one symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderInfo {
    pub current_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub long_name: Option<String>,
    pub market_cap: Option<f64>,
}

impl ProviderInfo {
    pub fn current_price(&self) -> Option<f64> {
        usable(self.current_price)
    }

    pub fn previous_close(&self) -> Option<f64> {
        usable(self.previous_close)
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Market cap, 0 when the provider omits it.
    pub fn market_cap(&self) -> f64 {
        usable(self.market_cap).unwrap_or(0.0)
    }
}

/// Negative and non-finite values never describe a real price.
fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

/// One daily close in a historical series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_info(&self, symbol: &Symbol) -> Result<ProviderInfo, FetchError>;

    async fn fetch_history(
        &self,
        symbol: &Symbol,
        period: HistoryPeriod,
    ) -> Result<Vec<PricePoint>, FetchError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
