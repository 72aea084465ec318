pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::history::HistoryUseCase;
use crate::application::quotes::{QuoteAggregator, QuoteBatch};
use crate::application::watchlist::{AddOutcome, RemoveOutcome, WatchlistStore};
use crate::config::Settings;
use crate::domain::entities::price_series::PriceSeries;
use crate::domain::entities::watchlist::Watchlist;
use crate::domain::error::{DomainError, StoreError};
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::ports::watchlist_repository::WatchlistRepository;
use crate::domain::values::history_period::HistoryPeriod;
use crate::domain::values::symbol::{parse_symbol_list, Symbol};
use crate::infrastructure::feeds::yahoo::YahooProvider;
use crate::infrastructure::storage::json_file::JsonWatchlistFile;
use std::sync::Arc;
use std::time::Duration;

pub struct StockDash {
    quotes_uc: QuoteAggregator,
    watchlist_uc: WatchlistStore,
    history_uc: HistoryUseCase,
}

impl StockDash {
    pub fn new(settings: &Settings) -> Self {
        Self::with_providers(
            Arc::new(YahooProvider::new()),
            Arc::new(JsonWatchlistFile::new(&settings.watchlist_path)),
            settings.fetch_timeout,
        )
    }

    pub fn with_providers(
        provider: Arc<dyn MarketDataProvider>,
        repo: Arc<dyn WatchlistRepository>,
        fetch_timeout: Option<Duration>,
    ) -> Self {
        Self {
            quotes_uc: QuoteAggregator::new(provider.clone(), fetch_timeout),
            watchlist_uc: WatchlistStore::new(repo),
            history_uc: HistoryUseCase::new(provider, fetch_timeout),
        }
    }

    /// Validates raw ticker input, then fetches quotes in input order.
    pub async fn check<S: AsRef<str>>(&self, inputs: &[S]) -> Result<QuoteBatch, DomainError> {
        let symbols = parse_symbol_list(inputs)?;
        Ok(self.quotes_uc.fetch_many(&symbols).await)
    }

    pub async fn quotes(&self, symbols: &[Symbol]) -> QuoteBatch {
        self.quotes_uc.fetch_many(symbols).await
    }

    pub fn watchlist(&self) -> Result<Watchlist, StoreError> {
        self.watchlist_uc.load()
    }

    pub fn add<S: AsRef<str>>(&self, inputs: &[S]) -> Result<AddOutcome, DomainError> {
        self.watchlist_uc.add(inputs)
    }

    pub fn remove<S: AsRef<str>>(&self, inputs: &[S]) -> Result<RemoveOutcome, DomainError> {
        self.watchlist_uc.remove(inputs)
    }

    pub async fn history(
        &self,
        input: &str,
        period: HistoryPeriod,
    ) -> Result<PriceSeries, DomainError> {
        let symbol = Symbol::parse(input)?;
        Ok(self.history_uc.series(&symbol, period).await?)
    }
}
