use crate::domain::error::FetchError;
use crate::domain::ports::market_data::{MarketDataProvider, PricePoint, ProviderInfo};
use crate::domain::values::history_period::HistoryPeriod;
use crate::domain::values::symbol::Symbol;
use async_trait::async_trait;
use chrono::DateTime;
use log::{debug, warn};
use reqwest::header;
use reqwest::StatusCode;
use tokio::sync::Mutex;

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";

/// Session cookie plus the crumb Yahoo expects alongside it.
#[derive(Debug, Clone)]
struct Crumb {
    cookie: String,
    crumb: String,
}

/// Yahoo Finance quotes.
///
/// Prices, names and history come from the v8 chart API, which needs no
/// auth. Market cap is only served by quoteSummary, which needs a session
/// crumb; when that lookup fails the chart data is returned on its own.
pub struct YahooProvider {
    client: reqwest::Client,
    crumb: Mutex<Option<Crumb>>,
}

impl YahooProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(
                    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                     AppleWebKit/537.36 (KHTML, like Gecko) \
                     Chrome/120.0.0.0 Safari/537.36",
                )
                .build()
                .unwrap_or_default(),
            crumb: Mutex::new(None),
        }
    }

    async fn fetch_chart(
        &self,
        symbol: &Symbol,
        range: &str,
        interval: &str,
    ) -> Result<ChartData, FetchError> {
        let url = format!("{CHART_URL}/{symbol}");
        debug!("GET {url} range={range} interval={interval}");

        let resp = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", interval)])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        decode_chart(symbol, status, &body)
    }

    /// Returns the cached crumb, fetching one on first use.
    async fn ensure_crumb(&self) -> Result<Crumb, FetchError> {
        let mut slot = self.crumb.lock().await;
        if let Some(crumb) = slot.as_ref() {
            return Ok(crumb.clone());
        }
        let fresh = self.fetch_crumb().await?;
        *slot = Some(fresh.clone());
        Ok(fresh)
    }

    async fn fetch_crumb(&self) -> Result<Crumb, FetchError> {
        debug!("GET {COOKIE_URL}");
        let resp = self
            .client
            .get(COOKIE_URL)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Yahoo cookie request failed: {e}")))?;

        let cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| FetchError::Malformed("Yahoo sent no session cookie".to_string()))?;

        debug!("GET {CRUMB_URL}");
        let resp = self
            .client
            .get(CRUMB_URL)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Yahoo crumb request failed: {e}")))?;

        let status = resp.status();
        let crumb = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read Yahoo crumb: {e}")))?;
        if !status.is_success() || crumb.trim().is_empty() {
            return Err(FetchError::Network(format!(
                "Yahoo crumb request returned {status}"
            )));
        }

        Ok(Crumb {
            cookie,
            crumb: crumb.trim().to_string(),
        })
    }

    async fn clear_crumb(&self) {
        *self.crumb.lock().await = None;
    }

    async fn fetch_market_cap(&self, symbol: &Symbol) -> Result<Option<f64>, FetchError> {
        let crumb = self.ensure_crumb().await?;
        let url = format!("{SUMMARY_URL}/{symbol}");
        debug!("GET {url} modules=price");

        let resp = self
            .client
            .get(&url)
            .query(&[("modules", "price"), ("crumb", crumb.crumb.as_str())])
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.clear_crumb().await;
            return Err(FetchError::Network(format!(
                "Yahoo session expired ({status})"
            )));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "Yahoo quoteSummary returned {status} for {symbol}"
            )));
        }

        market_cap_from_summary(&body)
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, serde::Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartData {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    chart_previous_close: Option<f64>,
    #[serde(default)]
    previous_close: Option<f64>,
    #[serde(default)]
    market_cap: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<IndicatorQuote>,
}

#[derive(Debug, serde::Deserialize)]
struct IndicatorQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

fn decode_chart(symbol: &Symbol, status: u16, body: &str) -> Result<ChartData, FetchError> {
    let parsed: Result<ChartResponse, _> = serde_json::from_str(body);

    if let Ok(ChartResponse {
        chart: ChartResult {
            error: Some(err), ..
        },
    }) = &parsed
    {
        return Err(match err.code.as_deref() {
            Some("Not Found") => FetchError::UnknownSymbol(symbol.to_string()),
            _ => FetchError::Malformed(format!(
                "Yahoo error for {symbol}: {}",
                err.description.as_deref().unwrap_or("unknown error")
            )),
        });
    }

    if status == 404 {
        return Err(FetchError::UnknownSymbol(symbol.to_string()));
    }
    if !(200..300).contains(&status) {
        return Err(FetchError::Network(format!(
            "Yahoo API returned {status} for {symbol}"
        )));
    }

    let data = parsed.map_err(|e| FetchError::Malformed(e.to_string()))?;
    data.chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| FetchError::Malformed(format!("No chart results for {symbol}")))
}

fn info_from_chart(data: &ChartData) -> ProviderInfo {
    let meta = &data.meta;
    ProviderInfo {
        current_price: meta.regular_market_price,
        previous_close: meta.chart_previous_close.or(meta.previous_close),
        long_name: meta.long_name.clone().or_else(|| meta.short_name.clone()),
        market_cap: meta.market_cap,
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    quote_summary: SummaryResult,
}

#[derive(Debug, serde::Deserialize)]
struct SummaryResult {
    #[serde(default)]
    result: Option<Vec<SummaryData>>,
}

#[derive(Debug, serde::Deserialize)]
struct SummaryData {
    #[serde(default)]
    price: Option<SummaryPrice>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryPrice {
    #[serde(default)]
    market_cap: Option<RawValue>,
}

/// Yahoo wraps numbers as `{"raw": 123.0, "fmt": "123"}`.
#[derive(Debug, serde::Deserialize)]
struct RawValue {
    #[serde(default)]
    raw: Option<f64>,
}

fn market_cap_from_summary(body: &str) -> Result<Option<f64>, FetchError> {
    let parsed: SummaryResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    Ok(parsed
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .and_then(|data| data.price)
        .and_then(|price| price.market_cap)
        .and_then(|cap| cap.raw))
}

/// Fills a missing market cap from the quoteSummary lookup; a failed
/// lookup leaves the chart data as it was.
fn with_market_cap(
    mut info: ProviderInfo,
    symbol: &Symbol,
    lookup: Result<Option<f64>, FetchError>,
) -> ProviderInfo {
    match lookup {
        Ok(cap) => info.market_cap = info.market_cap.or(cap),
        Err(e) => warn!("Market cap unavailable for {symbol}: {e}"),
    }
    info
}

fn history_from_chart(data: &ChartData) -> Vec<PricePoint> {
    let timestamps = data.timestamp.as_deref().unwrap_or_default();
    let closes = data
        .indicators
        .as_ref()
        .and_then(|ind| ind.quote.first())
        .map(|q| q.close.as_slice())
        .unwrap_or_default();

    timestamps
        .iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let date = DateTime::from_timestamp(*ts, 0)?.date_naive();
            Some(PricePoint {
                date,
                close: (*close)?,
            })
        })
        .collect()
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn fetch_info(&self, symbol: &Symbol) -> Result<ProviderInfo, FetchError> {
        let data = self.fetch_chart(symbol, "1d", "1d").await?;
        let info = info_from_chart(&data);
        if info.market_cap.is_some() {
            return Ok(info);
        }
        let lookup = self.fetch_market_cap(symbol).await;
        Ok(with_market_cap(info, symbol, lookup))
    }

    async fn fetch_history(
        &self,
        symbol: &Symbol,
        period: HistoryPeriod,
    ) -> Result<Vec<PricePoint>, FetchError> {
        let data = self.fetch_chart(symbol, period.as_str(), "1d").await?;
        Ok(history_from_chart(&data))
    }

    fn name(&self) -> &str {
        "yahoo_finance"
    }
}
