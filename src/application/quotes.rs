use crate::domain::entities::quote_record::QuoteRecord;
use crate::domain::error::FetchError;
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::values::symbol::Symbol;
use futures::future::join_all;
use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// A symbol whose quote could not be fetched.
#[derive(Debug, Serialize)]
pub struct FetchFailure {
    pub symbol: Symbol,
    #[serde(serialize_with = "serialize_error")]
    pub error: FetchError,
}

fn serialize_error<S: serde::Serializer>(e: &FetchError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(e)
}

/// Result of a batch fetch: successes in input order plus per-symbol failures.
#[derive(Debug, Default, Serialize)]
pub struct QuoteBatch {
    pub records: Vec<QuoteRecord>,
    pub failures: Vec<FetchFailure>,
}

impl QuoteBatch {
    /// True when no symbol produced a record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}

pub struct QuoteAggregator {
    provider: Arc<dyn MarketDataProvider>,
    timeout: Option<Duration>,
}

impl QuoteAggregator {
    pub fn new(provider: Arc<dyn MarketDataProvider>, timeout: Option<Duration>) -> Self {
        Self { provider, timeout }
    }

    pub async fn fetch_one(&self, symbol: &Symbol) -> Result<QuoteRecord, FetchError> {
        debug!("Fetching {symbol} from {}", self.provider.name());
        let info = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.provider.fetch_info(symbol))
                .await
                .map_err(|_| FetchError::Timeout(limit))??,
            None => self.provider.fetch_info(symbol).await?,
        };
        Ok(QuoteRecord::from_info(symbol.clone(), &info))
    }

    /// Fetches every symbol concurrently. Output order follows input order;
    /// duplicates in the input produce duplicate records.
    pub async fn fetch_many(&self, symbols: &[Symbol]) -> QuoteBatch {
        let results = join_all(symbols.iter().map(|s| self.fetch_one(s))).await;

        let mut batch = QuoteBatch::default();
        for (symbol, result) in symbols.iter().zip(results) {
            match result {
                Ok(record) => batch.records.push(record),
                Err(error) => {
                    warn!("Failed to fetch {symbol}: {error}");
                    batch.failures.push(FetchFailure {
                        symbol: symbol.clone(),
                        error,
                    });
                }
            }
        }
        batch
    }
}
