use crate::domain::entities::price_series::PriceSeries;
use crate::domain::error::FetchError;
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::values::history_period::HistoryPeriod;
use crate::domain::values::symbol::Symbol;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

pub struct HistoryUseCase {
    provider: Arc<dyn MarketDataProvider>,
    timeout: Option<Duration>,
}

impl HistoryUseCase {
    pub fn new(provider: Arc<dyn MarketDataProvider>, timeout: Option<Duration>) -> Self {
        Self { provider, timeout }
    }

    pub async fn series(
        &self,
        symbol: &Symbol,
        period: HistoryPeriod,
    ) -> Result<PriceSeries, FetchError> {
        debug!("Fetching {period} history for {symbol}");
        let fetch = self.provider.fetch_history(symbol, period);
        let points = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| FetchError::Timeout(limit))??,
            None => fetch.await?,
        };

        let series = PriceSeries::new(symbol.clone(), period, points);
        if series.is_empty() {
            return Err(FetchError::NoData(symbol.to_string()));
        }
        Ok(series)
    }
}
