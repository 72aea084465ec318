//! Shared test helpers.

#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stockdash::domain::entities::watchlist::Watchlist;
use stockdash::domain::error::{FetchError, StoreError};
use stockdash::domain::ports::market_data::{MarketDataProvider, PricePoint, ProviderInfo};
use stockdash::domain::ports::watchlist_repository::WatchlistRepository;
use stockdash::domain::values::history_period::HistoryPeriod;
use stockdash::domain::values::symbol::Symbol;
use stockdash::StockDash;

/// Provider serving canned data. Unlisted symbols fail as unknown.
#[derive(Default)]
pub struct StubProvider {
    infos: HashMap<String, ProviderInfo>,
    history: HashMap<String, Vec<PricePoint>>,
    delays: HashMap<String, Duration>,
    pub info_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, symbol: &str, current: f64, previous: f64, name: &str) -> Self {
        self.infos.insert(
            symbol.to_string(),
            ProviderInfo {
                current_price: Some(current),
                previous_close: Some(previous),
                long_name: Some(name.to_string()),
                market_cap: Some(1.0e12),
            },
        );
        self
    }

    pub fn with_info(mut self, symbol: &str, info: ProviderInfo) -> Self {
        self.infos.insert(symbol.to_string(), info);
        self
    }

    pub fn with_history(mut self, symbol: &str, closes: &[(u32, Option<f64>)]) -> Self {
        let points = closes
            .iter()
            .filter_map(|(day, close)| {
                Some(PricePoint {
                    date: NaiveDate::from_ymd_opt(2025, 3, *day)?,
                    close: (*close)?,
                })
            })
            .collect();
        self.history.insert(symbol.to_string(), points);
        self
    }

    pub fn with_delay(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_string(), delay);
        self
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for StubProvider {
    async fn fetch_info(&self, symbol: &Symbol) -> Result<ProviderInfo, FetchError> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(symbol.as_str()) {
            tokio::time::sleep(*delay).await;
        }
        self.infos
            .get(symbol.as_str())
            .cloned()
            .ok_or_else(|| FetchError::UnknownSymbol(symbol.to_string()))
    }

    async fn fetch_history(
        &self,
        symbol: &Symbol,
        _period: HistoryPeriod,
    ) -> Result<Vec<PricePoint>, FetchError> {
        self.history
            .get(symbol.as_str())
            .cloned()
            .ok_or_else(|| FetchError::UnknownSymbol(symbol.to_string()))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// In-memory watchlist that counts saves.
#[derive(Default)]
pub struct CountingRepo {
    stored: Mutex<Watchlist>,
    pub loads: AtomicUsize,
    pub saves: AtomicUsize,
}

impl CountingRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl WatchlistRepository for CountingRepo {
    fn load(&self) -> Result<Watchlist, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored.lock().unwrap().clone())
    }

    fn save(&self, watchlist: &Watchlist) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.stored.lock().unwrap() = watchlist.clone();
        Ok(())
    }
}

pub fn symbols(list: &Watchlist) -> Vec<&str> {
    list.symbols().iter().map(|s| s.as_str()).collect()
}

pub fn setup(provider: StubProvider) -> (StockDash, Arc<CountingRepo>) {
    let repo = Arc::new(CountingRepo::new());
    let app = StockDash::with_providers(Arc::new(provider), repo.clone(), None);
    (app, repo)
}
